// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use bson::Document;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(test)]
pub mod memory;
pub mod models;
pub mod mongo;

/// Every collection the API reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Courses,
    Divisions,
    Minors,
    Games,
    GameUsers,
    Links,
    Tutorials,
    LinkUsers,
}

/// Result of an acknowledged write.
///
/// `NotFound` means the store accepted the operation but no document matched
/// its filter. Both variants count as acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    NotFound,
}

impl WriteOutcome {
    pub fn acknowledged(self) -> bool {
        matches!(self, WriteOutcome::Applied | WriteOutcome::NotFound)
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Driver(#[from] mongodb::error::Error),
    #[error("Storage error: malformed document: {0}")]
    Decode(#[from] bson::de::Error),
    #[error("Storage error: cannot encode document: {0}")]
    Encode(#[from] bson::ser::Error),
}

/// Document store capability shared by every request.
///
/// Filters and updates use MongoDB query syntax.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn find(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Vec<Document>, StorageError>;

    async fn find_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Option<Document>, StorageError>;

    async fn insert_one(
        &self,
        collection: CollectionKind,
        document: Document,
    ) -> Result<WriteOutcome, StorageError>;

    async fn update_one(
        &self,
        collection: CollectionKind,
        filter: Document,
        update: Document,
    ) -> Result<WriteOutcome, StorageError>;

    async fn delete_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<WriteOutcome, StorageError>;
}

/// Runs `find` and decodes every returned document into `T`.
pub async fn find_as<T: DeserializeOwned>(
    store: &dyn Store,
    collection: CollectionKind,
    filter: Document,
) -> Result<Vec<T>, StorageError> {
    store
        .find(collection, filter)
        .await?
        .into_iter()
        .map(|document| bson::from_document(document).map_err(StorageError::from))
        .collect()
}

pub async fn find_one_as<T: DeserializeOwned>(
    store: &dyn Store,
    collection: CollectionKind,
    filter: Document,
) -> Result<Option<T>, StorageError> {
    store
        .find_one(collection, filter)
        .await?
        .map(bson::from_document)
        .transpose()
        .map_err(StorageError::from)
}
