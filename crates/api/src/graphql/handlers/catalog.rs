// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use bson::Document;
use juniper::FieldResult;

use crate::{
    db::{
        CollectionKind, find_as,
        models::{Division, Minor},
    },
    graphql::Context,
};

pub async fn get_divisions(context: &Context) -> FieldResult<Vec<Division>> {
    Ok(find_as(context.store(), CollectionKind::Divisions, Document::new()).await?)
}

pub async fn get_minors(context: &Context) -> FieldResult<Vec<Minor>> {
    Ok(find_as(context.store(), CollectionKind::Minors, Document::new()).await?)
}
