//! Project-specific utilities live here.

/// Case-insensitive substring match of `search` against any of `fields`.
///
/// A blank search key matches everything.
pub fn matches_search(search: &str, fields: &[&str]) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
