// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use bson::{Document, doc, oid::ObjectId};
use juniper::{FieldResult, ID, graphql_object};

use crate::{
    db::{
        CollectionKind, WriteOutcome, find_as,
        models::{GameEntry, GameFields},
    },
    graphql::{ApiError, Context},
};

#[graphql_object]
#[graphql(name = "Game")]
impl GameEntry {
    #[graphql(name = "_id")]
    pub fn object_id(&self) -> Option<ID> {
        self.object_id.map(|id| ID::new(id.to_hex()))
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn game(&self) -> Option<&str> {
        self.game.as_deref()
    }

    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

pub(crate) fn parse_document_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidDocumentId)
}

pub async fn get_games(context: &Context) -> FieldResult<Vec<GameEntry>> {
    Ok(find_as(context.store(), CollectionKind::Games, Document::new()).await?)
}

pub async fn create_game(context: &Context, fields: GameFields) -> FieldResult<bool> {
    let identity = context.require_authentication()?;

    let outcome = context
        .store()
        .insert_one(CollectionKind::Games, bson::to_document(&fields)?)
        .await?;

    tracing::info!("Game entry created by {}", identity.user.id);
    Ok(outcome.acknowledged())
}

/// Overwrites all four fields; absent arguments are stored as null.
pub async fn update_game(context: &Context, id: ID, fields: GameFields) -> FieldResult<bool> {
    let identity = context.require_authentication()?;
    let object_id = parse_document_id(&id)?;

    let outcome = context
        .store()
        .update_one(
            CollectionKind::Games,
            doc! { "_id": object_id },
            doc! { "$set": bson::to_document(&fields)? },
        )
        .await?;

    match outcome {
        WriteOutcome::Applied => {
            tracing::info!("Game entry {object_id} updated by {}", identity.user.id)
        }
        WriteOutcome::NotFound => tracing::debug!("Game entry {object_id} not found for update"),
    }
    Ok(outcome.acknowledged())
}

pub async fn delete_game(context: &Context, id: ID) -> FieldResult<bool> {
    let identity = context.require_authentication()?;
    let object_id = parse_document_id(&id)?;

    let outcome = context
        .store()
        .delete_one(CollectionKind::Games, doc! { "_id": object_id })
        .await?;

    match outcome {
        WriteOutcome::Applied => {
            tracing::info!("Game entry {object_id} deleted by {}", identity.user.id)
        }
        WriteOutcome::NotFound => tracing::debug!("Game entry {object_id} not found for delete"),
    }
    Ok(outcome.acknowledged())
}
