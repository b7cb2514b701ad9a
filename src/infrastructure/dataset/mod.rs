//! Dataset manifest loading and result persistence

mod loader;
mod results;

pub use loader::{DatasetLoader, DEFAULT_MANIFEST_FILE};
pub use results::{load_results, persist_results};
