// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! MongoDB-backed [`Store`].

use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection};

use crate::config::Config;

use super::{CollectionKind, StorageError, Store, WriteOutcome};

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    courses: Collection<Document>,
    divisions: Collection<Document>,
    minors: Collection<Document>,
    games: Collection<Document>,
    game_users: Collection<Document>,
    links: Collection<Document>,
    tutorials: Collection<Document>,
    link_users: Collection<Document>,
}

impl MongoStore {
    /// Connects and pings the catalog database so a bad URI fails at startup.
    pub async fn connect(config: &Config) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(&config.db_uri).await?;

        client
            .database(&config.catalog.database)
            .run_command(doc! { "ping": 1 })
            .await?;

        let catalog = client.database(&config.catalog.database);
        let gameday = client.database(&config.gameday.database);
        let loguelink = client.database(&config.loguelink.database);

        tracing::info!(
            "Connected to MongoDB (databases: {}, {}, {})",
            catalog.name(),
            gameday.name(),
            loguelink.name()
        );

        Ok(Self {
            courses: catalog.collection(&config.catalog.courses),
            divisions: catalog.collection(&config.catalog.divisions),
            minors: catalog.collection(&config.catalog.minors),
            games: gameday.collection(&config.gameday.games),
            game_users: gameday.collection(&config.gameday.users),
            links: loguelink.collection(&config.loguelink.links),
            tutorials: loguelink.collection(&config.loguelink.tutorials),
            link_users: loguelink.collection(&config.loguelink.users),
            client,
        })
    }

    fn collection(&self, kind: CollectionKind) -> &Collection<Document> {
        match kind {
            CollectionKind::Courses => &self.courses,
            CollectionKind::Divisions => &self.divisions,
            CollectionKind::Minors => &self.minors,
            CollectionKind::Games => &self.games,
            CollectionKind::GameUsers => &self.game_users,
            CollectionKind::Links => &self.links,
            CollectionKind::Tutorials => &self.tutorials,
            CollectionKind::LinkUsers => &self.link_users,
        }
    }

    /// Closes pooled connections. Pending operations on clones of the client
    /// are allowed to finish first.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB client closed");
    }
}

#[async_trait::async_trait]
impl Store for MongoStore {
    async fn find(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Vec<Document>, StorageError> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Option<Document>, StorageError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(
        &self,
        collection: CollectionKind,
        document: Document,
    ) -> Result<WriteOutcome, StorageError> {
        self.collection(collection).insert_one(document).await?;
        Ok(WriteOutcome::Applied)
    }

    async fn update_one(
        &self,
        collection: CollectionKind,
        filter: Document,
        update: Document,
    ) -> Result<WriteOutcome, StorageError> {
        let result = self.collection(collection).update_one(filter, update).await?;
        Ok(if result.matched_count == 0 {
            WriteOutcome::NotFound
        } else {
            WriteOutcome::Applied
        })
    }

    async fn delete_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<WriteOutcome, StorageError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(if result.deleted_count == 0 {
            WriteOutcome::NotFound
        } else {
            WriteOutcome::Applied
        })
    }
}
