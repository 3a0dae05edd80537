// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::FieldResult;

use crate::{
    db::{CollectionKind, find_as, models::Course},
    graphql::Context,
};

pub mod filter;

pub use filter::CourseFilter;

/// Runs a course filter. Results come back in store order.
pub async fn find_courses(context: &Context, filter: &CourseFilter) -> FieldResult<Vec<Course>> {
    tracing::debug!("Course query: {:?}", filter.predicates());
    Ok(find_as(context.store(), CollectionKind::Courses, filter.to_document()).await?)
}

pub async fn get_all_courses(context: &Context) -> FieldResult<Vec<Course>> {
    find_courses(context, &CourseFilter::match_all()).await
}

pub async fn search_courses(
    context: &Context,
    division_codes: Option<Vec<String>>,
    course_code: Option<String>,
    course_title: Option<String>,
) -> FieldResult<Vec<Course>> {
    find_courses(
        context,
        &CourseFilter::search(division_codes, course_code, course_title),
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bson::doc;

    use super::*;
    use crate::{db::memory::MemoryStore, graphql::test_support};

    fn fixture() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            CollectionKind::Courses,
            [
                doc! { "divisionCode": "CS", "courseCode": "CS-101", "courseTitle": "Introduction to Programming", "credits": 3.0, "creditTypeCode": "LEC" },
                doc! { "divisionCode": "CS", "courseCode": "CS-240", "courseTitle": "Data Structures", "credits": 4.0, "creditTypeCode": "LEC" },
                doc! { "divisionCode": "MA", "courseCode": "MA-101", "courseTitle": "Intro to Proofs", "credits": 3.0, "creditTypeCode": "SEM" },
                doc! { "divisionCode": "PH", "courseCode": "PH-110", "courseTitle": "Physics Lab", "credits": 1, "creditTypeCode": "LAB" },
            ],
        );
        store
    }

    fn course_codes(courses: &[Course]) -> Vec<&str> {
        courses
            .iter()
            .filter_map(|course| course.course_code.as_deref())
            .collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_no_arguments_returns_everything() {
        let ctx = test_support::anonymous(fixture());
        let all = get_all_courses(&ctx).await.unwrap();
        assert_eq!(all.len(), 4);
        let searched = search_courses(&ctx, Some(Vec::new()), Some(String::new()), None)
            .await
            .unwrap();
        assert_eq!(searched, all);
    }

    #[tokio::test]
    async fn test_course_code_is_case_sensitive() {
        let ctx = test_support::anonymous(fixture());
        let upper = search_courses(&ctx, None, Some("CS".to_string()), None).await.unwrap();
        assert_eq!(course_codes(&upper), ["CS-101", "CS-240"]);
        let lower = search_courses(&ctx, None, Some("cs".to_string()), None).await.unwrap();
        assert!(lower.is_empty());
    }

    #[tokio::test]
    async fn test_course_title_is_case_insensitive() {
        let ctx = test_support::anonymous(fixture());
        let found = search_courses(&ctx, None, None, Some("intro".to_string()))
            .await
            .unwrap();
        assert_eq!(course_codes(&found), ["CS-101", "MA-101"]);
    }

    #[tokio::test]
    async fn test_predicates_are_combined() {
        let ctx = test_support::anonymous(fixture());
        let found = search_courses(
            &ctx,
            Some(strings(&["MA", "PH"])),
            Some("101".to_string()),
            Some("INTRO".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(course_codes(&found), ["MA-101"]);
    }

    #[tokio::test]
    async fn test_search_terms_match_literally() {
        let ctx = test_support::anonymous(fixture());
        let found = search_courses(&ctx, None, Some("CS.101".to_string()), None)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_exact_credit_filters() {
        let ctx = test_support::anonymous(fixture());
        let three = find_courses(&ctx, &CourseFilter::credits(3.0)).await.unwrap();
        assert_eq!(course_codes(&three), ["CS-101", "MA-101"]);
        // Stored as an integer, matched numerically.
        let one = find_courses(&ctx, &CourseFilter::credits(1.0)).await.unwrap();
        assert_eq!(course_codes(&one), ["PH-110"]);
        let labs = find_courses(&ctx, &CourseFilter::credit_type("LAB".to_string()))
            .await
            .unwrap();
        assert_eq!(course_codes(&labs), ["PH-110"]);
    }
}
