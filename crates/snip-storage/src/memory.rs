use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::repository::{ReadRepository, Repository, Result, UrlRecord};
use snip_core::{ShortCode, StorageError};

/// In-memory implementation of the Repository trait using DashMap.
///
/// Two maps mirror the two uniqueness constraints of the SQL schema:
/// `codes` is keyed by short code and `urls` by original URL. An insert
/// holds the `urls` entry lock while it claims the `codes` entry, always in
/// that order, so both constraints are checked and applied as one step and
/// concurrent inserts for the same URL cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    codes: DashMap<String, UrlRecord>,
    urls: DashMap<String, ShortCode>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.codes.get(code.as_str()).map(|entry| entry.value().clone()))
    }

    async fn find_code(&self, original_url: &str) -> Result<Option<ShortCode>> {
        Ok(self.urls.get(original_url).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.codes.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        let url_slot = match self.urls.entry(record.original_url.clone()) {
            Entry::Occupied(_) => return Err(StorageError::UrlConflict(record.original_url)),
            Entry::Vacant(slot) => slot,
        };

        match self.codes.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::CodeConflict(code.to_string())),
            Entry::Vacant(code_slot) => {
                code_slot.insert(record);
                url_slot.insert(code.clone());
                Ok(())
            }
        }
    }
}
