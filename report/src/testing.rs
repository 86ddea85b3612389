use anyhow::Error;
use chrono::{NaiveDate, NaiveDateTime};
use controller::{error::ErrorKind, Controller, Rating, RatingCounts, User};

pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .unwrap()
}

/// Store kept in vectors, queries answer like the sqlite one
#[derive(Debug, Default)]
pub struct MemoryController {
    pub users: Vec<User>,
    pub ratings: Vec<Rating>,
    pub posters: i64,
}

impl MemoryController {
    pub fn user(mut self, id: i32, username: &str) -> Self {
        self.users.push(User {
            id,
            username: username.into(),
            email: format!("{}@example.com", username),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: at(1, 8),
            last_login: None,
        });
        self
    }

    /// Created at noon of `day`, updated at `updated` (day, hour)
    pub fn rating(
        mut self,
        user_id: i32,
        movie_id: i32,
        title: &str,
        stars: i32,
        day: u32,
        updated: (u32, u32),
    ) -> Self {
        let id = self.ratings.len() as i32 + 1;
        self.ratings.push(Rating {
            id,
            user_id,
            movie_id,
            movie_title: title.into(),
            rating: stars,
            created_at: at(day, 12),
            updated_at: at(updated.0, updated.1),
        });
        self
    }

    fn owner(&self, rating: &Rating) -> Option<&User> {
        self.users.iter().find(|u| u.id == rating.user_id)
    }

    fn sorted(mut ratings: Vec<Rating>) -> Vec<Rating> {
        ratings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        ratings
    }
}

impl Controller for MemoryController {
    fn users(&self) -> Result<Vec<User>, Error> {
        let mut users = self.users.clone();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    fn user_by_username(&self, username: &str) -> Result<User, Error> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| ErrorKind::NotFoundByUsername(username.into()).into())
    }

    fn ratings(&self) -> Result<Vec<(Rating, User)>, Error> {
        Ok(Self::sorted(self.ratings.clone())
            .into_iter()
            .filter_map(|r| self.owner(&r).cloned().map(|u| (r, u)))
            .collect())
    }

    fn ratings_by(&self, user: &User) -> Result<Vec<Rating>, Error> {
        let ratings = self
            .ratings
            .iter()
            .filter(|r| r.user_id == user.id)
            .cloned()
            .collect();

        Ok(Self::sorted(ratings))
    }

    fn rating_counts(&self) -> Result<RatingCounts, Error> {
        let mut counts = RatingCounts::new();
        for rating in &self.ratings {
            *counts.entry(rating.user_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    fn users_count(&self) -> Result<i64, Error> {
        Ok(self.users.len() as i64)
    }

    fn ratings_count(&self) -> Result<i64, Error> {
        Ok(self.ratings.len() as i64)
    }

    fn posters_count(&self) -> Result<i64, Error> {
        Ok(self.posters)
    }
}
