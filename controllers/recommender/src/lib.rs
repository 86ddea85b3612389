// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod models;
pub mod schema;

use crate::models::{ratings::Rating, users::User};
use crate::schema::{auth_user, recommender_postercache, recommender_rating};
use anyhow::Error;
use controller::{error::ErrorKind, Controller, RatingCounts};
use diesel::dsl::sql;
use diesel::sql_types::BigInt;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::path::Path;

const IN_MEMORY: &str = ":memory:";

/// Open the database, a plain path must point to an existing file since
/// sqlite would otherwise create an empty one
pub fn establish_connection(url: &str) -> Result<SqliteConnection, Error> {
    let is_file_path = url != IN_MEMORY && !url.starts_with("file:");
    if is_file_path && !Path::new(url).exists() {
        return Err(ErrorKind::MissingDatabase(url.into()).into());
    }

    log::debug!("Connecting to {}", url);
    SqliteConnection::establish(url)
        .map_err(|e| ErrorKind::ConnectionFailed(url.into(), e.to_string()).into())
}

pub struct RecommenderController {
    conn: SqliteConnection,
}

impl RecommenderController {
    pub fn with_url(url: &str) -> Result<Self, Error> {
        let conn = establish_connection(url)?;
        Ok(Self { conn })
    }
}

impl Controller for RecommenderController {
    fn users(&self) -> Result<Vec<controller::User>, Error> {
        let users = auth_user::table
            .order(auth_user::id.asc())
            .load::<User>(&self.conn)?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    fn user_by_username(&self, username: &str) -> Result<controller::User, Error> {
        let user = auth_user::table
            .filter(auth_user::username.eq(username))
            .first::<User>(&self.conn)
            .optional()?;

        match user {
            Some(user) => Ok(user.into()),
            None => Err(ErrorKind::NotFoundByUsername(username.into()).into()),
        }
    }

    fn ratings(&self) -> Result<Vec<(controller::Rating, controller::User)>, Error> {
        let ratings = recommender_rating::table
            .inner_join(auth_user::table)
            .order((
                recommender_rating::updated_at.desc(),
                recommender_rating::id.asc(),
            ))
            .load::<(Rating, User)>(&self.conn)?;

        Ok(ratings
            .into_iter()
            .map(|(rating, user)| (rating.into(), user.into()))
            .collect())
    }

    fn ratings_by(&self, user: &controller::User) -> Result<Vec<controller::Rating>, Error> {
        let ratings = recommender_rating::table
            .filter(recommender_rating::user_id.eq(user.id))
            .order((
                recommender_rating::updated_at.desc(),
                recommender_rating::id.asc(),
            ))
            .load::<Rating>(&self.conn)?;

        Ok(ratings.into_iter().map(Into::into).collect())
    }

    fn rating_counts(&self) -> Result<RatingCounts, Error> {
        let counts = recommender_rating::table
            .group_by(recommender_rating::user_id)
            .select((recommender_rating::user_id, sql::<BigInt>("COUNT(*)")))
            .load::<(i32, i64)>(&self.conn)?;

        Ok(counts
            .into_iter()
            .map(|(user_id, count)| (user_id, count as usize))
            .collect())
    }

    fn users_count(&self) -> Result<i64, Error> {
        Ok(auth_user::table.count().get_result(&self.conn)?)
    }

    fn ratings_count(&self) -> Result<i64, Error> {
        Ok(recommender_rating::table.count().get_result(&self.conn)?)
    }

    fn posters_count(&self) -> Result<i64, Error> {
        Ok(recommender_postercache::table
            .count()
            .get_result(&self.conn)?)
    }
}
