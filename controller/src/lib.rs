// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;
pub mod records;
pub mod stats;

use anyhow::Error;
use std::collections::HashMap;

pub use entity::{Entity, ToTable};
pub use records::{Rating, User};
pub use stats::{GlobalStats, MovieStats, RatingStats, StarHistogram};

pub type Result<T> = std::result::Result<T, Error>;
pub type RatingCounts = HashMap<i32, usize>;

/// Read-only access to the users, ratings and poster cache of the
/// recommender store
pub trait Controller {
    /// Get all users, ordered by id
    fn users(&self) -> Result<Vec<User>>;

    /// Get the user with exactly this username, fails with
    /// `ErrorKind::NotFoundByUsername` when there is none
    fn user_by_username(&self, username: &str) -> Result<User>;

    /// Get every rating along with its owner, most recently updated first
    fn ratings(&self) -> Result<Vec<(Rating, User)>>;

    /// Get the ratings of the specified user, most recently updated first
    fn ratings_by(&self, user: &User) -> Result<Vec<Rating>>;

    /// Number of ratings per user id, users without ratings are absent
    fn rating_counts(&self) -> Result<RatingCounts>;

    fn users_count(&self) -> Result<i64>;

    fn ratings_count(&self) -> Result<i64>;

    fn posters_count(&self) -> Result<i64>;

    /// Totals over the whole store, rows are only loaded when there are
    /// ratings to average
    fn global_stats(&self) -> Result<GlobalStats> {
        let total_ratings = self.ratings_count()?;
        let cached_posters = self.posters_count()?;

        if total_ratings == 0 {
            return Ok(GlobalStats {
                total_users: self.users_count()?,
                total_ratings,
                cached_posters,
                mean: None,
                most_active: None,
            });
        }

        let users = self.users()?;
        let ratings = self.ratings()?;
        let counts = self.rating_counts()?;

        Ok(GlobalStats::from_rows(
            &users,
            &ratings,
            &counts,
            cached_posters,
        ))
    }
}
