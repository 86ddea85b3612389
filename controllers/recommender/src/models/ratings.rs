// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::recommender_rating;
use chrono::NaiveDateTime;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[table_name = "recommender_rating"]
pub struct Rating {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub movie_title: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Rating> for controller::Rating {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            movie_title: rating.movie_title,
            rating: rating.rating,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}
