// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use bson::doc;
use juniper::FieldResult;

use crate::{
    db::models::UserAccount,
    graphql::{
        ApiError, Context, UserPool,
        auth::verify_password,
        handlers::sessions::{AuthUser, create_session},
    },
};

/// Signs in against one user pool.
///
/// Unknown users and wrong passwords produce the same error.
pub async fn sign_in(
    context: &Context,
    pool: UserPool,
    id: Option<String>,
    password: Option<String>,
) -> FieldResult<AuthUser> {
    let (Some(id), Some(password)) = (id, password) else {
        return Err(ApiError::InvalidCredentials.into());
    };

    let record = context
        .store()
        .find_one(pool.collection(), doc! { "id": id.as_str() })
        .await?;
    let user = match record.map(bson::from_document::<UserAccount>).transpose() {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("User record for {id} ({pool:?} pool) could not be decoded: {e}");
            None
        }
    };

    match user {
        Some(user) if verify_password(&password, &user.pass) => {
            tracing::info!("User {} signed in ({pool:?} pool)", user.id);
            create_session(context, &user, pool)
        }
        _ => Err(ApiError::InvalidCredentials.into()),
    }
}
