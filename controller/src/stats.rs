// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::records::{Rating, User};
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::HashMap;

pub fn mean<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0i64, 0usize), |(sum, count), score| {
            (sum + score as i64, count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Counts of ratings per star value, only 1 to 5 are tracked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarHistogram([usize; 5]);

impl StarHistogram {
    pub fn add(&mut self, stars: i32) {
        if (1..=5).contains(&stars) {
            self.0[(stars - 1) as usize] += 1;
        }
    }

    pub fn count(&self, stars: i32) -> usize {
        if (1..=5).contains(&stars) {
            self.0[(stars - 1) as usize]
        } else {
            0
        }
    }

    /// Counts ordered from 5 stars down to 1 star
    pub fn descending(&self) -> [usize; 5] {
        [self.0[4], self.0[3], self.0[2], self.0[1], self.0[0]]
    }
}

/// Aggregate over the ratings of a single user
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub count: usize,
    pub mean: f64,
    pub histogram: StarHistogram,
    pub first_created: NaiveDateTime,
    pub last_updated: NaiveDateTime,
}

impl RatingStats {
    /// `None` when there's nothing to aggregate
    pub fn from_ratings(ratings: &[Rating]) -> Option<Self> {
        let mean = mean(ratings.iter().map(|r| r.rating))?;
        let first_created = ratings.iter().map(|r| r.created_at).min()?;
        let last_updated = ratings.iter().map(|r| r.updated_at).max()?;

        let mut histogram = StarHistogram::default();
        for rating in ratings {
            histogram.add(rating.rating);
        }

        Some(Self {
            count: ratings.len(),
            mean,
            histogram,
            first_created,
            last_updated,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieStats {
    pub movie_id: i32,
    pub movie_title: String,
    pub count: usize,
    pub mean: f64,
}

/// Movies grouped by (id, title), most rated first, ties go to the higher
/// mean and then to the lower movie id
pub fn top_movies<'a, I>(ratings: I, limit: usize) -> Vec<MovieStats>
where
    I: IntoIterator<Item = &'a Rating>,
{
    let mut grouped: HashMap<(i32, &str), (usize, i64)> = HashMap::new();
    for rating in ratings {
        let entry = grouped
            .entry((rating.movie_id, rating.movie_title.as_str()))
            .or_insert((0, 0));

        entry.0 += 1;
        entry.1 += rating.rating as i64;
    }

    let mut movies: Vec<_> = grouped
        .into_iter()
        .map(|((movie_id, title), (count, sum))| MovieStats {
            movie_id,
            movie_title: title.to_owned(),
            count,
            mean: sum as f64 / count as f64,
        })
        .collect();

    movies.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.mean.partial_cmp(&a.mean).unwrap_or(Ordering::Equal))
            .then_with(|| a.movie_id.cmp(&b.movie_id))
            .then_with(|| a.movie_title.cmp(&b.movie_title))
    });

    movies.truncate(limit);
    movies
}

/// The user with most ratings, lowest id wins a tie
pub fn most_active<'a>(
    users: &'a [User],
    counts: &HashMap<i32, usize>,
) -> Option<(&'a User, usize)> {
    let mut best: Option<(&User, usize)> = None;

    for user in users {
        let count = counts.get(&user.id).copied().unwrap_or(0);
        best = match best {
            Some((top, top_count))
                if top_count > count || (top_count == count && top.id < user.id) =>
            {
                Some((top, top_count))
            }
            _ => Some((user, count)),
        };
    }

    best
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalStats {
    pub total_users: i64,
    pub total_ratings: i64,
    pub cached_posters: i64,
    pub mean: Option<f64>,
    pub most_active: Option<(User, usize)>,
}

impl GlobalStats {
    /// Totals from rows already loaded from the store, the most active user
    /// is only reported when there is at least one rating
    pub fn from_rows(
        users: &[User],
        ratings: &[(Rating, User)],
        counts: &HashMap<i32, usize>,
        cached_posters: i64,
    ) -> Self {
        let most_active = if ratings.is_empty() {
            None
        } else {
            self::most_active(users, counts).map(|(user, count)| (user.clone(), count))
        };

        Self {
            total_users: users.len() as i64,
            total_ratings: ratings.len() as i64,
            cached_posters,
            mean: self::mean(ratings.iter().map(|(rating, _)| rating.rating)),
            most_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;
    use common_macros::hash_map;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn rating(id: i32, movie_id: i32, title: &str, stars: i32, day: u32) -> Rating {
        Rating {
            id,
            user_id: 1,
            movie_id,
            movie_title: title.into(),
            rating: stars,
            created_at: at(day),
            updated_at: at(day + 1),
        }
    }

    fn user(id: i32, username: &str) -> User {
        User {
            id,
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: at(1),
            last_login: None,
        }
    }

    #[test]
    fn mean_of_nothing() {
        assert_eq!(mean(Vec::new()), None);
        assert_approx_eq!(mean(vec![5, 3]).unwrap(), 4.0);
    }

    #[test]
    fn alice_summary() {
        let ratings = vec![rating(1, 1, "Heat", 5, 2), rating(2, 2, "Ronin", 3, 5)];
        let stats = RatingStats::from_ratings(&ratings).unwrap();

        assert_eq!(stats.count, 2);
        assert_approx_eq!(stats.mean, 4.0);
        assert_eq!(stats.histogram.descending(), [1, 0, 1, 0, 0]);
        assert_eq!(stats.first_created, at(2));
        assert_eq!(stats.last_updated, at(6));
    }

    #[test]
    fn no_stats_without_ratings() {
        assert_eq!(RatingStats::from_ratings(&[]), None);
    }

    #[test]
    fn histogram_ignores_out_of_range() {
        let mut histogram = StarHistogram::default();
        histogram.add(0);
        histogram.add(6);
        histogram.add(4);

        assert_eq!(histogram.count(4), 1);
        assert_eq!(histogram.count(0), 0);
        assert_eq!(histogram.descending(), [0, 1, 0, 0, 0]);
    }

    #[test]
    fn top_movies_order() {
        let ratings = vec![
            rating(1, 10, "Alien", 3, 1),
            rating(2, 10, "Alien", 3, 1),
            rating(3, 20, "Brazil", 5, 1),
            rating(4, 20, "Brazil", 4, 1),
            rating(5, 30, "Casablanca", 5, 1),
            rating(6, 40, "Dune", 5, 1),
        ];

        let top = top_movies(&ratings, 50);
        let ids: Vec<_> = top.iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![20, 10, 30, 40]);
        assert_eq!(top[0].count, 2);
        assert_approx_eq!(top[0].mean, 4.5);
    }

    #[test]
    fn top_movies_limit() {
        let ratings: Vec<_> = (0..60).map(|i| rating(i, i, "Movie", 3, 1)).collect();

        assert_eq!(top_movies(&ratings, 50).len(), 50);
        assert!(top_movies(&[], 50).is_empty());
    }

    #[test]
    fn most_active_ties_on_lowest_id() {
        let users = vec![user(3, "carol"), user(1, "alice"), user(2, "bob")];
        let counts = hash_map! {
            1 => 4,
            2 => 4,
            3 => 1,
        };

        let (top, count) = most_active(&users, &counts).unwrap();
        assert_eq!(top.username, "alice");
        assert_eq!(count, 4);

        assert!(most_active(&[], &counts).is_none());
    }

    #[test]
    fn global_stats_from_loaded_rows() {
        let users = vec![user(1, "alice"), user(2, "bob")];
        let ratings = vec![
            (rating(1, 10, "Heat", 5, 2), users[0].clone()),
            (rating(2, 11, "Ronin", 2, 3), users[0].clone()),
        ];
        let counts = hash_map! { 1 => 2 };

        let stats = GlobalStats::from_rows(&users, &ratings, &counts, 7);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_ratings, 2);
        assert_eq!(stats.cached_posters, 7);
        assert_approx_eq!(stats.mean.unwrap(), 3.5);
        assert_eq!(stats.most_active.map(|(u, c)| (u.id, c)), Some((1, 2)));

        let empty = GlobalStats::from_rows(&users, &[], &HashMap::new(), 0);
        assert_eq!(empty.mean, None);
        assert!(empty.most_active.is_none());
    }
}
