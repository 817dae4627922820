pub mod health;
pub mod items;
pub mod metrics;
pub mod root;
pub mod shows;
pub mod users;

pub use health::{health_check, readiness_check};
pub use items::read_item;
pub use metrics::metrics;
pub use root::read_root;
pub use shows::{list_shows, read_shows_by_title};
pub use users::read_user;

/// Counts a store read by collection and whether anything came back.
pub(crate) fn record_lookup(collection: &'static str, found: bool) {
    let outcome = if found { "found" } else { "missing" };
    ::metrics::counter!("store_lookups_total", "collection" => collection, "outcome" => outcome)
        .increment(1);
}
