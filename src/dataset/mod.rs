pub mod dedup;
mod raw;
mod store;
pub mod summary;

pub use dedup::{merge, Dataset};
pub use raw::write_raw_snapshot;
pub use store::DatasetStore;
pub use summary::summarize;
