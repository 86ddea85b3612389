// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::entity::Entity;
use chrono::NaiveDateTime;

/// An account as stored by the web application's identity store
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for User {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn id_label(&self) -> &'static str {
        "User ID"
    }

    fn get_data(&self) -> Vec<(String, String)> {
        let last_login = match &self.last_login {
            Some(last_login) => last_login.to_string(),
            None => "None".into(),
        };

        vec![
            ("Username".into(), self.username.clone()),
            ("Email".into(), self.email.clone()),
            ("First Name".into(), self.first_name.clone()),
            ("Last Name".into(), self.last_name.clone()),
            ("Is Active".into(), self.is_active.to_string()),
            ("Is Staff".into(), self.is_staff.to_string()),
            ("Is Superuser".into(), self.is_superuser.to_string()),
            ("Date Joined".into(), self.date_joined.to_string()),
            ("Last Login".into(), last_login),
        ]
    }
}

/// A star score given by one user to one movie
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    // Copied from the catalog at rating time, never validated here
    pub movie_title: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entity for Rating {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn id_label(&self) -> &'static str {
        "Rating ID"
    }

    fn get_data(&self) -> Vec<(String, String)> {
        vec![
            ("Movie ID".into(), self.movie_id.to_string()),
            ("Movie Title".into(), self.movie_title.clone()),
            ("Rating".into(), format!("{}/5 stars", self.rating)),
            ("Created At".into(), self.created_at.to_string()),
            ("Updated At".into(), self.updated_at.to_string()),
        ]
    }
}
