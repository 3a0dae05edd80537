// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use bson::oid::ObjectId;
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

/* =========================
 * CATALOG (read-only)
 * ========================= */

#[derive(GraphQLObject, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub division_code: Option<String>,
    pub course_code: Option<String>,
    pub course_title: Option<String>,
    pub credits: Option<f64>,
    pub credit_type_code: Option<String>,
}

#[derive(GraphQLObject, Deserialize, Debug, Clone, PartialEq)]
pub struct Division {
    pub code: Option<String>,
    pub name: Option<String>,
}

#[derive(GraphQLObject, Deserialize, Debug, Clone, PartialEq)]
pub struct Minor {
    pub title: Option<String>,
    pub required: Option<Vec<Option<String>>>,
    pub elective: Option<Vec<Option<String>>>,
    pub count: Option<f64>,
}

/* =========================
 * GAME ENTRIES
 * ========================= */

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GameEntry {
    #[serde(rename = "_id")]
    pub object_id: Option<ObjectId>,
    pub note: Option<String>,
    pub game: Option<String>,
    pub solution: Option<String>,
    pub title: Option<String>,
}

/// The four writable fields of a game entry. Absent fields are stored as null.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct GameFields {
    pub note: Option<String>,
    pub game: Option<String>,
    pub solution: Option<String>,
    pub title: Option<String>,
}

/* =========================
 * LINKS AND TUTORIALS
 * ========================= */

/// Stored shape shared by links and tutorials.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Resource {
    #[serde(rename = "_id")]
    pub object_id: Option<ObjectId>,
    /// Server-generated hex token, independent of `object_id`.
    pub id: Option<String>,
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewResource {
    pub id: String,
    pub uri: Option<String>,
    pub title: Option<String>,
}

/* =========================
 * USERS
 * ========================= */

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UserAccount {
    #[serde(rename = "_id")]
    pub object_id: ObjectId,
    /// Login name.
    pub id: String,
    /// Argon2 PHC hash.
    pub pass: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserAccount {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn test_course_accepts_integer_credits_and_missing_fields() {
        let course: Course = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "divisionCode": "CS",
            "courseCode": "CS-101",
            "credits": 3,
        })
        .expect("course should decode");
        assert_eq!(course.credits, Some(3.0));
        assert_eq!(course.course_title, None);
        assert_eq!(course.credit_type_code, None);
    }

    #[test]
    fn test_minor_lists_may_be_missing_or_null() {
        let minor: Minor = bson::from_document(doc! { "title": "Mathematics", "count": 2.0 })
            .expect("minor should decode");
        assert_eq!(minor.required, None);
        assert_eq!(minor.elective, None);

        let minor: Minor = bson::from_document(doc! {
            "title": "Mathematics",
            "required": null,
            "elective": ["MATH 301", null],
        })
        .expect("minor with null lists should decode");
        assert_eq!(minor.required, None);
        assert_eq!(minor.elective, Some(vec![Some("MATH 301".to_string()), None]));
    }

    #[test]
    fn test_game_fields_store_absent_values_as_null() {
        let document = bson::to_document(&GameFields {
            note: Some("n".to_string()),
            ..Default::default()
        })
        .expect("fields should encode");
        assert_eq!(document.get_str("note").ok(), Some("n"));
        assert_eq!(document.get("game"), Some(&bson::Bson::Null));
        assert_eq!(document.len(), 4);
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let mut user = UserAccount {
            object_id: ObjectId::new(),
            id: "ada".to_string(),
            pass: String::new(),
            name: None,
        };
        assert_eq!(user.display_name(), "ada");
        user.name = Some("Ada Lovelace".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }
}
