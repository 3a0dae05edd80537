// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::GraphQLObject;

use crate::{
    db::models::UserAccount,
    graphql::{
        Context, UserPool,
        auth::{AuthJwtPayload, JwtPayload, generate_jwt},
    },
};

#[derive(GraphQLObject, Debug, Clone, PartialEq)]
#[graphql(name = "User")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
}

#[derive(GraphQLObject, Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

/// Issues an access token bound to the user's storage id.
pub fn create_session(
    ctx: &Context,
    user: &UserAccount,
    pool: UserPool,
) -> juniper::FieldResult<AuthUser> {
    let claims = AuthJwtPayload {
        id: user.object_id.to_hex(),
        pool: Some(pool),
    };
    let payload = match ctx.signer().ttl() {
        Some(ttl) => JwtPayload::new_with_duration(claims, ttl),
        None => JwtPayload::new(claims),
    };
    let token = generate_jwt(&payload, ctx.signer())?;

    Ok(AuthUser {
        user: SessionUser {
            id: user.id.clone(),
            name: user.display_name().to_string(),
        },
        token,
    })
}
