pub mod listing;
pub mod normalize;

pub use listing::{NormalizedListing, COLUMNS};
pub use normalize::{normalize_batch, AreaPolicy};
