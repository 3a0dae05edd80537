// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::{FieldResult, ID, graphql_object};

use crate::{
    db::models::GameFields,
    graphql::{
        UserPool,
        handlers::{self, resources::ResourceKind, sessions::AuthUser},
    },
};

use super::Context;

pub struct Mutation;

#[graphql_object]
#[graphql(
    context = Context,
)]
impl Mutation {
    async fn sign_in_game(
        context: &Context,
        id: Option<String>,
        pass: Option<String>,
    ) -> FieldResult<AuthUser> {
        handlers::users::sign_in(context, UserPool::Game, id, pass).await
    }

    async fn sign_in_link(
        context: &Context,
        id: Option<String>,
        pass: Option<String>,
    ) -> FieldResult<AuthUser> {
        handlers::users::sign_in(context, UserPool::Link, id, pass).await
    }

    async fn create_game(
        context: &Context,
        note: Option<String>,
        game: Option<String>,
        solution: Option<String>,
        title: Option<String>,
    ) -> FieldResult<bool> {
        let fields = GameFields {
            note,
            game,
            solution,
            title,
        };
        handlers::games::create_game(context, fields).await
    }

    /// Replaces all four fields of the entry. Omitted fields are cleared.
    async fn update_game(
        context: &Context,
        id: ID,
        note: Option<String>,
        game: Option<String>,
        solution: Option<String>,
        title: Option<String>,
    ) -> FieldResult<bool> {
        let fields = GameFields {
            note,
            game,
            solution,
            title,
        };
        handlers::games::update_game(context, id, fields).await
    }

    async fn delete_game(context: &Context, id: ID) -> FieldResult<bool> {
        handlers::games::delete_game(context, id).await
    }

    async fn create_link(
        context: &Context,
        #[graphql(name = "id", description = "Ignored. Link identifiers are generated by the server.")]
        client_id: Option<String>,
        uri: Option<String>,
        title: Option<String>,
    ) -> FieldResult<bool> {
        if client_id.is_some() {
            tracing::debug!("Discarding client-supplied link id");
        }
        handlers::resources::create_resource(context, ResourceKind::Link, uri, title).await
    }

    async fn delete_link(context: &Context, id: ID) -> FieldResult<bool> {
        handlers::resources::delete_resource(context, ResourceKind::Link, id).await
    }

    async fn create_tutorial(
        context: &Context,
        #[graphql(name = "id", description = "Ignored. Tutorial identifiers are generated by the server.")]
        client_id: Option<String>,
        uri: Option<String>,
        title: Option<String>,
    ) -> FieldResult<bool> {
        if client_id.is_some() {
            tracing::debug!("Discarding client-supplied tutorial id");
        }
        handlers::resources::create_resource(context, ResourceKind::Tutorial, uri, title).await
    }

    async fn delete_tutorial(context: &Context, id: ID) -> FieldResult<bool> {
        handlers::resources::delete_resource(context, ResourceKind::Tutorial, id).await
    }
}
