// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Links and tutorials. Both share one stored shape and differ only in the
//! collection they live in.

use bson::{Document, doc};
use juniper::{FieldResult, ID, graphql_object};

use crate::{
    db::{
        CollectionKind, WriteOutcome, find_as,
        models::{NewResource, Resource},
    },
    graphql::{Context, handlers::games::parse_document_id},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Link,
    Tutorial,
}

impl ResourceKind {
    fn collection(self) -> CollectionKind {
        match self {
            ResourceKind::Link => CollectionKind::Links,
            ResourceKind::Tutorial => CollectionKind::Tutorials,
        }
    }
}

pub struct Link(pub Resource);

pub struct Tutorial(pub Resource);

#[graphql_object]
impl Link {
    #[graphql(name = "_id")]
    pub fn object_id(&self) -> Option<ID> {
        self.0.object_id.map(|id| ID::new(id.to_hex()))
    }

    pub fn id(&self) -> Option<&str> {
        self.0.id.as_deref()
    }

    pub fn uri(&self) -> Option<&str> {
        self.0.uri.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.0.title.as_deref()
    }
}

#[graphql_object]
impl Tutorial {
    #[graphql(name = "_id")]
    pub fn object_id(&self) -> Option<ID> {
        self.0.object_id.map(|id| ID::new(id.to_hex()))
    }

    pub fn id(&self) -> Option<&str> {
        self.0.id.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.0.title.as_deref()
    }

    pub fn uri(&self) -> Option<&str> {
        self.0.uri.as_deref()
    }
}

/// 128 random bits, hex encoded.
pub fn new_resource_id() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

pub async fn get_resources(context: &Context, kind: ResourceKind) -> FieldResult<Vec<Resource>> {
    Ok(find_as(context.store(), kind.collection(), Document::new()).await?)
}

/// Inserts a resource under a freshly generated identifier.
pub async fn create_resource(
    context: &Context,
    kind: ResourceKind,
    uri: Option<String>,
    title: Option<String>,
) -> FieldResult<bool> {
    let identity = context.require_authentication()?;

    let resource = NewResource {
        id: new_resource_id(),
        uri,
        title,
    };
    let outcome = context
        .store()
        .insert_one(kind.collection(), bson::to_document(&resource)?)
        .await?;

    tracing::info!("{kind:?} {} created by {}", resource.id, identity.user.id);
    Ok(outcome.acknowledged())
}

pub async fn delete_resource(context: &Context, kind: ResourceKind, id: ID) -> FieldResult<bool> {
    let identity = context.require_authentication()?;
    let object_id = parse_document_id(&id)?;

    let outcome = context
        .store()
        .delete_one(kind.collection(), doc! { "_id": object_id })
        .await?;

    match outcome {
        WriteOutcome::Applied => {
            tracing::info!("{kind:?} {object_id} deleted by {}", identity.user.id)
        }
        WriteOutcome::NotFound => tracing::debug!("{kind:?} {object_id} not found for delete"),
    }
    Ok(outcome.acknowledged())
}
