use std::{collections::HashMap, sync::Mutex};

use crate::{
    domain::ClassRecord,
    errors::{ClassBookError, Result},
};

use super::CollectionStore;

/// Process-local store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Vec<ClassRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(key: &str, classes: Vec<ClassRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut documents) = store.documents.lock() {
            documents.insert(key.to_string(), classes);
        }
        store
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Vec<ClassRecord>> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| ClassBookError::Storage("memory store lock poisoned".into()))?;
        Ok(documents.get(key).cloned().unwrap_or_default())
    }

    fn save(&self, key: &str, classes: &[ClassRecord]) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| ClassBookError::Storage("memory store lock poisoned".into()))?;
        documents.insert(key.to_string(), classes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonthTag;

    #[test]
    fn keys_are_independent() {
        let store = MemoryStore::new();
        let class = ClassRecord::new("Art", 10.0, MonthTag::new(2024, 0).unwrap());
        store.save("a", &[class]).unwrap();
        assert_eq!(store.load("a").unwrap().len(), 1);
        assert!(store.load("b").unwrap().is_empty());
    }
}
