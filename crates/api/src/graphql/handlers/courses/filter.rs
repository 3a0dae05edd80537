// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Course search filters.
//!
//! Course code matching is a case-sensitive substring match, course title
//! matching is case-insensitive. Search terms are matched literally.

use bson::{Bson, Document, doc};

/// One condition on a course document.
#[derive(Debug, Clone, PartialEq)]
pub enum CoursePredicate {
    DivisionIn(Vec<String>),
    CodeContains(String),
    TitleContains(String),
    CreditsEqual(f64),
    CreditTypeEqual(String),
}

impl CoursePredicate {
    fn field(&self) -> &'static str {
        match self {
            CoursePredicate::DivisionIn(_) => "divisionCode",
            CoursePredicate::CodeContains(_) => "courseCode",
            CoursePredicate::TitleContains(_) => "courseTitle",
            CoursePredicate::CreditsEqual(_) => "credits",
            CoursePredicate::CreditTypeEqual(_) => "creditTypeCode",
        }
    }

    fn condition(&self) -> Bson {
        match self {
            CoursePredicate::DivisionIn(codes) => Bson::Document(doc! { "$in": codes.clone() }),
            CoursePredicate::CodeContains(code) => {
                Bson::Document(doc! { "$regex": regex::escape(code) })
            }
            CoursePredicate::TitleContains(title) => {
                Bson::Document(doc! { "$regex": regex::escape(title), "$options": "i" })
            }
            CoursePredicate::CreditsEqual(credits) => Bson::Double(*credits),
            CoursePredicate::CreditTypeEqual(code) => Bson::String(code.clone()),
        }
    }
}

/// A conjunction of course predicates. No predicates matches every course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    predicates: Vec<CoursePredicate>,
}

trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for Vec<String> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// The one presence rule for search arguments: absent and empty are the same.
fn present<T: Blank>(value: Option<T>) -> Option<T> {
    value.filter(|v| !v.is_blank())
}

impl CourseFilter {
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Combines whichever search arguments are present.
    pub fn search(
        division_codes: Option<Vec<String>>,
        course_code: Option<String>,
        course_title: Option<String>,
    ) -> Self {
        let predicates = [
            present(division_codes).map(CoursePredicate::DivisionIn),
            present(course_code).map(CoursePredicate::CodeContains),
            present(course_title).map(CoursePredicate::TitleContains),
        ]
        .into_iter()
        .flatten()
        .collect();
        Self { predicates }
    }

    pub fn credits(credits: f64) -> Self {
        Self {
            predicates: vec![CoursePredicate::CreditsEqual(credits)],
        }
    }

    pub fn credit_type(code: String) -> Self {
        Self {
            predicates: vec![CoursePredicate::CreditTypeEqual(code)],
        }
    }

    pub fn predicates(&self) -> &[CoursePredicate] {
        &self.predicates
    }

    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn to_document(&self) -> Document {
        self.predicates
            .iter()
            .map(|predicate| (predicate.field().to_string(), predicate.condition()))
            .collect()
    }
}
