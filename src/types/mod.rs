//! Public types for the Cachedash API.

mod card;
mod snapshot;

pub use card::{CachePath, CardViewModel};
pub use snapshot::{MetricsSnapshot, coerce_number};
