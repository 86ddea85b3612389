use crate::format;
use anyhow::Error;
use chrono::NaiveDateTime;
use config::ExportConfig;
use controller::{stats, Controller, GlobalStats, Rating, RatingCounts, RatingStats, User};
use indicatif::ProgressIterator;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const STATISTICS_FILE: &str = "1_statistics.csv";
pub const USERS_FILE: &str = "2_users.csv";
pub const ALL_RATINGS_FILE: &str = "3_all_ratings.csv";
pub const USER_SUMMARY_FILE: &str = "4_user_summary.csv";
pub const TOP_MOVIES_FILE: &str = "6_top_rated_movies.csv";

pub const STATISTICS_HEADER: [&str; 2] = ["Metric", "Value"];

pub const USERS_HEADER: [&str; 11] = [
    "User ID",
    "Username",
    "Email",
    "First Name",
    "Last Name",
    "Is Active",
    "Is Staff",
    "Is Superuser",
    "Date Joined",
    "Last Login",
    "Total Ratings",
];

pub const ALL_RATINGS_HEADER: [&str; 8] = [
    "Rating ID",
    "User ID",
    "Username",
    "Movie ID",
    "Movie Title",
    "Rating (Stars)",
    "Created At",
    "Updated At",
];

pub const USER_SUMMARY_HEADER: [&str; 11] = [
    "User ID",
    "Username",
    "Total Ratings",
    "Average Rating",
    "5 Stars",
    "4 Stars",
    "3 Stars",
    "2 Stars",
    "1 Star",
    "First Rating",
    "Last Rating",
];

pub const USER_RATINGS_HEADER: [&str; 5] =
    ["Movie Title", "Movie ID", "Rating", "Rated On", "First Rated"];

pub const TOP_MOVIES_HEADER: [&str; 4] =
    ["Movie ID", "Movie Title", "Number of Ratings", "Average Rating"];

pub fn user_ratings_file(username: &str) -> String {
    format!("5_{}_ratings.csv", username)
}

/// Ratings of each user that has any, in the order of `users`. Each list
/// keeps the order it had in `ratings`.
pub fn group_by_user<'u>(
    users: &'u [User],
    ratings: &[(Rating, User)],
) -> Vec<(&'u User, Vec<Rating>)> {
    let mut by_user: HashMap<i32, Vec<Rating>> = HashMap::new();
    for (rating, _) in ratings {
        by_user
            .entry(rating.user_id)
            .or_insert_with(Vec::new)
            .push(rating.clone());
    }

    users
        .iter()
        .filter_map(|user| by_user.remove(&user.id).map(|ratings| (user, ratings)))
        .collect()
}

fn report_written(path: &Path) {
    println!("  [OK] {}", path.display());
}

/// Writes the whole set of CSV files for a store into one directory
pub struct Exporter<'a, C: Controller> {
    controller: &'a C,
    output_dir: PathBuf,
    top_movies: usize,
}

impl<'a, C: Controller> Exporter<'a, C> {
    pub fn with_controller(controller: &'a C, config: &ExportConfig) -> Self {
        Self {
            controller,
            output_dir: config.output_dir.clone(),
            top_movies: config.top_movies,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run every export, existing files with the same names are replaced.
    /// Returns the written paths in the order they were produced.
    pub fn export(&self, now: NaiveDateTime) -> Result<Vec<PathBuf>, Error> {
        fs::create_dir_all(&self.output_dir)?;
        println!(
            "Exporting data to CSV files in '{}/' folder...",
            self.output_dir.display()
        );

        let users = self.controller.users()?;
        let ratings = self.controller.ratings()?;
        let counts = self.controller.rating_counts()?;
        let global =
            GlobalStats::from_rows(&users, &ratings, &counts, self.controller.posters_count()?);
        log::debug!(
            "Loaded {} users and {} ratings",
            users.len(),
            ratings.len()
        );

        let grouped = group_by_user(&users, &ratings);
        let mut written = Vec::new();

        for path in vec![
            self.write_statistics(&global, now)?,
            self.write_users(&users, &counts)?,
            self.write_all_ratings(&ratings)?,
            self.write_user_summary(&grouped)?,
        ] {
            report_written(&path);
            written.push(path);
        }

        let mut per_user = Vec::with_capacity(grouped.len());
        for (user, user_ratings) in grouped.iter().progress() {
            per_user.push(self.write_user_ratings(user, user_ratings)?);
        }

        for path in per_user {
            report_written(&path);
            written.push(path);
        }

        let top = self.write_top_movies(&ratings)?;
        report_written(&top);
        written.push(top);

        log::info!(
            "Exported {} files to {}",
            written.len(),
            self.output_dir.display()
        );

        Ok(written)
    }

    fn writer(&self, name: &str) -> Result<(PathBuf, csv::Writer<File>), Error> {
        let path = self.output_dir.join(name);
        let writer = csv::Writer::from_path(&path)?;
        Ok((path, writer))
    }

    pub fn write_statistics(
        &self,
        stats: &GlobalStats,
        now: NaiveDateTime,
    ) -> Result<PathBuf, Error> {
        let (path, mut wtr) = self.writer(STATISTICS_FILE)?;
        wtr.write_record(&STATISTICS_HEADER)?;

        let rows = vec![
            ("Total Users", stats.total_users.to_string()),
            ("Total Ratings", stats.total_ratings.to_string()),
            ("Cached Posters", stats.cached_posters.to_string()),
            ("Average Rating", format::average(stats.mean)),
            ("Export Date", now.format("%Y-%m-%d").to_string()),
            ("Export Time", now.format("%H:%M:%S").to_string()),
        ];

        for (metric, value) in rows {
            wtr.write_record(&[metric, value.as_str()])?;
        }

        wtr.flush()?;
        Ok(path)
    }

    pub fn write_users(&self, users: &[User], counts: &RatingCounts) -> Result<PathBuf, Error> {
        let (path, mut wtr) = self.writer(USERS_FILE)?;
        wtr.write_record(&USERS_HEADER)?;

        for user in users {
            wtr.write_record(&[
                user.id.to_string(),
                user.username.clone(),
                format::or_na(&user.email).to_owned(),
                format::or_na(&user.first_name).to_owned(),
                format::or_na(&user.last_name).to_owned(),
                format::flag(user.is_active).to_owned(),
                format::flag(user.is_staff).to_owned(),
                format::flag(user.is_superuser).to_owned(),
                format::timestamp(Some(&user.date_joined)),
                format::timestamp(user.last_login.as_ref()),
                counts.get(&user.id).copied().unwrap_or(0).to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(path)
    }

    /// `ratings` are expected most recently updated first
    pub fn write_all_ratings(&self, ratings: &[(Rating, User)]) -> Result<PathBuf, Error> {
        let (path, mut wtr) = self.writer(ALL_RATINGS_FILE)?;
        wtr.write_record(&ALL_RATINGS_HEADER)?;

        for (rating, user) in ratings {
            wtr.write_record(&[
                rating.id.to_string(),
                user.id.to_string(),
                user.username.clone(),
                rating.movie_id.to_string(),
                rating.movie_title.clone(),
                rating.rating.to_string(),
                format::timestamp(Some(&rating.created_at)),
                format::timestamp(Some(&rating.updated_at)),
            ])?;
        }

        wtr.flush()?;
        Ok(path)
    }

    pub fn write_user_summary(&self, grouped: &[(&User, Vec<Rating>)]) -> Result<PathBuf, Error> {
        let (path, mut wtr) = self.writer(USER_SUMMARY_FILE)?;
        wtr.write_record(&USER_SUMMARY_HEADER)?;

        for (user, ratings) in grouped {
            let stats = match RatingStats::from_ratings(ratings) {
                Some(stats) => stats,
                None => continue,
            };

            let mut record = vec![
                user.id.to_string(),
                user.username.clone(),
                stats.count.to_string(),
                format::average(Some(stats.mean)),
            ];
            record.extend(stats.histogram.descending().iter().map(ToString::to_string));
            record.push(format::timestamp(Some(&stats.first_created)));
            record.push(format::timestamp(Some(&stats.last_updated)));

            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(path)
    }

    /// `ratings` are expected most recently updated first
    pub fn write_user_ratings(&self, user: &User, ratings: &[Rating]) -> Result<PathBuf, Error> {
        let (path, mut wtr) = self.writer(&user_ratings_file(&user.username))?;
        wtr.write_record(&USER_RATINGS_HEADER)?;

        for rating in ratings {
            wtr.write_record(&[
                rating.movie_title.clone(),
                rating.movie_id.to_string(),
                rating.rating.to_string(),
                format::timestamp(Some(&rating.updated_at)),
                format::timestamp(Some(&rating.created_at)),
            ])?;
        }

        wtr.flush()?;
        Ok(path)
    }

    pub fn write_top_movies(&self, ratings: &[(Rating, User)]) -> Result<PathBuf, Error> {
        let (path, mut wtr) = self.writer(TOP_MOVIES_FILE)?;
        wtr.write_record(&TOP_MOVIES_HEADER)?;

        let movies = stats::top_movies(ratings.iter().map(|(rating, _)| rating), self.top_movies);
        for movie in movies {
            wtr.write_record(&[
                movie.movie_id.to_string(),
                movie.movie_title,
                movie.count.to_string(),
                format::average(Some(movie.mean)),
            ])?;
        }

        wtr.flush()?;
        Ok(path)
    }
}
