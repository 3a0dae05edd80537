// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory [`Store`] for tests.
//!
//! Understands the filter subset the API emits: plain equality, `$in`, and
//! `$regex` with an optional `$options: "i"`. Updates support `$set` only.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use bson::{Bson, Document, oid::ObjectId};
use regex::RegexBuilder;

use super::{CollectionKind, StorageError, Store, WriteOutcome};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionKind, Vec<Document>>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds documents without counting them as writes.
    pub fn seed(&self, collection: CollectionKind, documents: impl IntoIterator<Item = Document>) {
        let mut collections = self.collections.lock().unwrap();
        let entries = collections.entry(collection).or_default();
        for mut document in documents {
            if !document.contains_key("_id") {
                document.insert("_id", ObjectId::new());
            }
            entries.push(document);
        }
    }

    /// Number of insert, update and delete calls that reached the store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn documents(&self, collection: CollectionKind) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }
}

fn numeric(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

fn values_equal(stored: &Bson, expected: &Bson) -> bool {
    match (numeric(stored), numeric(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => stored == expected,
    }
}

fn condition_matches(stored: Option<&Bson>, condition: &Bson) -> bool {
    let operators = match condition {
        Bson::Document(operators) if operators.keys().all(|k| k.starts_with('$')) => operators,
        expected => return stored.is_some_and(|value| values_equal(value, expected)),
    };
    operators.iter().all(|(operator, argument)| match operator.as_str() {
        "$in" => match (stored, argument) {
            (Some(value), Bson::Array(candidates)) => {
                candidates.iter().any(|candidate| values_equal(value, candidate))
            }
            _ => false,
        },
        "$regex" => {
            let case_insensitive = operators
                .get_str("$options")
                .is_ok_and(|options| options.contains('i'));
            let (Some(Bson::String(value)), Bson::String(pattern)) = (stored, argument) else {
                return false;
            };
            RegexBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
                .is_ok_and(|re| re.is_match(value))
        }
        "$options" => true,
        other => panic!("MemoryStore does not support operator {other}"),
    })
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, condition)| condition_matches(document.get(field), condition))
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn find(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Vec<Document>, StorageError> {
        Ok(self
            .documents(collection)
            .into_iter()
            .filter(|document| matches(document, &filter))
            .collect())
    }

    async fn find_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Option<Document>, StorageError> {
        Ok(self
            .documents(collection)
            .into_iter()
            .find(|document| matches(document, &filter)))
    }

    async fn insert_one(
        &self,
        collection: CollectionKind,
        mut document: Document,
    ) -> Result<WriteOutcome, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(document);
        Ok(WriteOutcome::Applied)
    }

    async fn update_one(
        &self,
        collection: CollectionKind,
        filter: Document,
        update: Document,
    ) -> Result<WriteOutcome, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.collections.lock().unwrap();
        let entries = collections.entry(collection).or_default();
        let Some(target) = entries.iter_mut().find(|document| matches(document, &filter)) else {
            return Ok(WriteOutcome::NotFound);
        };
        if let Ok(set) = update.get_document("$set") {
            for (field, value) in set {
                target.insert(field.clone(), value.clone());
            }
        }
        Ok(WriteOutcome::Applied)
    }

    async fn delete_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<WriteOutcome, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut collections = self.collections.lock().unwrap();
        let entries = collections.entry(collection).or_default();
        match entries.iter().position(|document| matches(document, &filter)) {
            Some(index) => {
                entries.remove(index);
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::NotFound),
        }
    }
}
