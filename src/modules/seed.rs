//! Demo records loaded when `catalog.seed_demo_data` is set.

use super::books::models::Book;
use super::orders::models::{Order, OrderItem};

fn book(
    id: i64,
    title: &str,
    author: &str,
    price: f64,
    page_count: u32,
    category_id: i64,
) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        description: String::new(),
        price,
        page_count,
        category_id,
    }
}

pub(super) fn demo_books() -> Vec<Book> {
    vec![
        book(1, "The Rust Programming Language", "Steve Klabnik", 39.95, 560, 1),
        book(2, "Programming Rust", "Jim Blandy", 59.99, 738, 1),
        book(3, "Rust for Rustaceans", "Jon Gjengset", 39.99, 280, 1),
        book(4, "Dune", "Frank Herbert", 10.99, 412, 2),
        book(5, "Foundation", "Isaac Asimov", 8.99, 255, 2),
        book(6, "Hyperion", "Dan Simmons", 12.50, 482, 2),
        book(7, "Designing Data-Intensive Applications", "Martin Kleppmann", 45.00, 616, 3),
        book(8, "Database Internals", "Alex Petrov", 49.99, 370, 3),
    ]
}

pub(super) fn demo_orders() -> Vec<Order> {
    let item = |book_id, quantity, unit_price| OrderItem {
        book_id,
        quantity,
        unit_price,
    };

    vec![
        Order {
            id: 1,
            user_id: 1,
            confirmed: true,
            items: vec![item(1, 1, 39.95), item(4, 2, 10.99)],
        },
        Order {
            id: 2,
            user_id: 1,
            confirmed: false,
            items: vec![item(7, 1, 45.00)],
        },
        Order {
            id: 3,
            user_id: 2,
            confirmed: true,
            items: vec![item(5, 3, 8.99)],
        },
        Order {
            id: 4,
            user_id: 2,
            confirmed: false,
            items: vec![item(2, 1, 59.99), item(3, 1, 39.99)],
        },
    ]
}
