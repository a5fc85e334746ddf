pub mod json_backend;
pub mod memory;

use crate::{domain::ClassRecord, errors::Result};

/// Key/value document store holding whole class collections.
///
/// `load` returns an empty collection for unknown keys; `save` replaces the
/// stored collection in one step.
pub trait CollectionStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Vec<ClassRecord>>;
    fn save(&self, key: &str, classes: &[ClassRecord]) -> Result<()>;
}

pub use json_backend::JsonStore;
pub use memory::MemoryStore;
