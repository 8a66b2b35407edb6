pub mod books;
pub mod orders;
mod seed;

use std::sync::Arc;

use bookshop_kernel::{settings::Settings, ModuleRegistry};

use books::service::MemoryBookService;
use orders::service::MemoryOrderService;

/// Register all project-specific modules with the registry, each with its
/// in-memory service collaborator.
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let page_size = settings.catalog.page_size;

    let (book_service, order_service) = if settings.catalog.seed_demo_data {
        tracing::info!("seeding demo catalog");
        (
            MemoryBookService::with_data(page_size, seed::demo_books()),
            MemoryOrderService::with_data(seed::demo_orders()),
        )
    } else {
        (MemoryBookService::new(page_size), MemoryOrderService::new())
    };

    registry.register(books::create_module(Arc::new(book_service)))?;
    registry.register(orders::create_module(Arc::new(order_service)))?;
    Ok(())
}
