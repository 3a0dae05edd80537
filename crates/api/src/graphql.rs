// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use juniper::{EmptySubscription, RootNode};
pub use mutation::Mutation;
pub use query::Query;
use thiserror::Error;

use crate::db::{StorageError, Store};

pub mod auth;
mod handlers;
mod mutation;
mod query;

pub use auth::{Identity, TokenSigner, UserPool};
pub use handlers::sessions::{AuthUser, SessionUser};

/// Process-wide handles, cloned into every request.
#[derive(Clone)]
pub struct BaseContext {
    pub store: Arc<dyn Store>,
    pub signer: TokenSigner,
}

pub struct Context {
    base: BaseContext,
    identity: Option<Identity>,
}

impl juniper::Context for Context {}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Authentication Error. Please sign in")]
    AuthenticationRequired,
    #[error("Invalid credentials!")]
    InvalidCredentials,
    #[error("Invalid document id")]
    InvalidDocumentId,
}

impl Context {
    pub fn new(base: BaseContext, identity: Option<Identity>) -> Self {
        Self { base, identity }
    }

    /// Builds the context for one request from its `Authorization` header.
    pub async fn from_authorization(
        base: BaseContext,
        authorization: Option<&str>,
    ) -> Result<Self, StorageError> {
        let token = authorization.and_then(auth::bearer_token);
        let identity = auth::resolve_identity(token, &base.signer, base.store.as_ref()).await?;
        Ok(Self::new(base, identity))
    }

    pub fn store(&self) -> &dyn Store {
        self.base.store.as_ref()
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.base.signer
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn require_authentication(&self) -> Result<&Identity, ApiError> {
        self.identity
            .as_ref()
            .ok_or(ApiError::AuthenticationRequired)
    }
}

pub type Schema = RootNode<Query, Mutation, EmptySubscription<Context>>;

pub fn schema() -> Schema {
    RootNode::new(Query, Mutation, EmptySubscription::new())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use bson::{doc, oid::ObjectId};

    use super::{BaseContext, Context, Identity, TokenSigner, UserPool};
    use crate::db::{memory::MemoryStore, models::UserAccount};

    pub const SECRET: &str = "test-secret";

    pub fn base(store: Arc<MemoryStore>) -> BaseContext {
        BaseContext {
            store,
            signer: TokenSigner::new(SECRET, None),
        }
    }

    pub fn anonymous(store: Arc<MemoryStore>) -> Context {
        Context::new(base(store), None)
    }

    /// Seeds a user into `pool` and returns a context acting as that user.
    pub fn signed_in(store: Arc<MemoryStore>, pool: UserPool) -> Context {
        let object_id = ObjectId::new();
        store.seed(
            pool.collection(),
            [doc! { "_id": object_id, "id": "tester", "pass": "unused" }],
        );
        let identity = Identity {
            pool,
            user: UserAccount {
                object_id,
                id: "tester".to_string(),
                pass: "unused".to_string(),
                name: None,
            },
        };
        Context::new(base(store), Some(identity))
    }
}
