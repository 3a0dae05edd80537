// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::{FieldResult, graphql_object};

use crate::{
    db::models::{Course, Division, GameEntry, Minor},
    graphql::handlers::{
        self,
        courses::CourseFilter,
        resources::{Link, ResourceKind, Tutorial},
    },
};

use super::Context;

pub struct Query;

#[graphql_object]
#[graphql(context = Context)]
impl Query {
    async fn courses(context: &Context) -> FieldResult<Vec<Course>> {
        handlers::courses::get_all_courses(context).await
    }

    /// Courses matching every provided search argument. Empty arguments are ignored.
    async fn courses_by(
        context: &Context,
        division_codes: Option<Vec<String>>,
        course_code: Option<String>,
        course_title: Option<String>,
    ) -> FieldResult<Vec<Course>> {
        handlers::courses::search_courses(context, division_codes, course_code, course_title).await
    }

    async fn course_by_division(
        context: &Context,
        division_codes: Option<Vec<String>>,
    ) -> FieldResult<Vec<Course>> {
        handlers::courses::search_courses(context, division_codes, None, None).await
    }

    /// Case-sensitive substring match on the course code.
    async fn course_by_code(
        context: &Context,
        course_code: Option<String>,
    ) -> FieldResult<Vec<Course>> {
        handlers::courses::search_courses(context, None, course_code, None).await
    }

    /// Case-insensitive substring match on the course title.
    async fn course_by_title(
        context: &Context,
        course_title: Option<String>,
    ) -> FieldResult<Vec<Course>> {
        handlers::courses::search_courses(context, None, None, course_title).await
    }

    async fn course_by_credits(context: &Context, credits: f64) -> FieldResult<Vec<Course>> {
        handlers::courses::find_courses(context, &CourseFilter::credits(credits)).await
    }

    async fn course_by_type(
        context: &Context,
        credit_type_code: String,
    ) -> FieldResult<Vec<Course>> {
        handlers::courses::find_courses(context, &CourseFilter::credit_type(credit_type_code))
            .await
    }

    async fn divisions(context: &Context) -> FieldResult<Vec<Division>> {
        handlers::catalog::get_divisions(context).await
    }

    async fn minors(context: &Context) -> FieldResult<Vec<Minor>> {
        handlers::catalog::get_minors(context).await
    }

    async fn games(context: &Context) -> FieldResult<Vec<GameEntry>> {
        handlers::games::get_games(context).await
    }

    /// Whether the request carries a valid access token.
    fn game_signed_in(context: &Context) -> bool {
        context.is_authenticated()
    }

    async fn links(context: &Context) -> FieldResult<Vec<Link>> {
        let links = handlers::resources::get_resources(context, ResourceKind::Link).await?;
        Ok(links.into_iter().map(Link).collect())
    }

    async fn tutorials(context: &Context) -> FieldResult<Vec<Tutorial>> {
        let tutorials = handlers::resources::get_resources(context, ResourceKind::Tutorial).await?;
        Ok(tutorials.into_iter().map(Tutorial).collect())
    }
}
