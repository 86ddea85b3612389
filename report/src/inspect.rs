use crate::{banner, RULE_WIDTH};
use anyhow::Error;
use controller::{error::ErrorKind, Controller, Entity, ToTable};
use std::io::Write;

fn divider<W: Write>(out: &mut W) -> Result<(), Error> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

/// Console reports over a store, none of them modify it
pub struct Inspector<'a, C: Controller> {
    controller: &'a C,
}

impl<'a, C: Controller> Inspector<'a, C> {
    pub fn with_controller(controller: &'a C) -> Self {
        Self { controller }
    }

    pub fn show_statistics<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        banner(out, '=', "DATABASE STATISTICS")?;
        let stats = self.controller.global_stats()?;

        let mut rows = vec![
            ("Total Users".to_string(), stats.total_users.to_string()),
            ("Total Ratings".to_string(), stats.total_ratings.to_string()),
            ("Cached Posters".to_string(), stats.cached_posters.to_string()),
        ];

        if let Some(mean) = stats.mean {
            rows.push(("Average Rating".into(), format!("{:.2}/5 stars", mean)));
        }

        if let Some((user, count)) = &stats.most_active {
            rows.push((
                "Most Active User".into(),
                format!("{} ({} ratings)", user.username, count),
            ));
        }

        writeln!(out, "\n{}", rows[..].to_table())?;
        divider(out)
    }

    pub fn show_all_users<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        banner(out, '=', "ALL USERS (Login Data)")?;

        let users = self.controller.users()?;
        if users.is_empty() {
            writeln!(out, "No users found in database.")?;
            return Ok(());
        }

        for user in users {
            writeln!(out, "\n{}", user.to_table())?;
            divider(out)?;
        }

        Ok(())
    }

    pub fn show_all_ratings<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        banner(out, '=', "ALL RATINGS (User Rating Data)")?;

        let ratings = self.controller.ratings()?;
        if ratings.is_empty() {
            writeln!(out, "No ratings found in database.")?;
            return Ok(());
        }

        for (rating, user) in ratings {
            let mut rows = vec![
                (rating.id_label().to_string(), rating.get_id().to_string()),
                (
                    "User".to_string(),
                    format!("{} (ID: {})", user.username, user.id),
                ),
            ];
            rows.extend(rating.get_data());

            writeln!(out, "\n{}", rows[..].to_table())?;
            divider(out)?;
        }

        Ok(())
    }

    /// Profile and rating history of the user with exactly this username
    pub fn show_user_profile<W: Write>(&self, username: &str, out: &mut W) -> Result<(), Error> {
        banner(out, '=', &format!("USER PROFILE: {}", username))?;

        let user = match self.controller.user_by_username(username) {
            Ok(user) => user,
            Err(e) => match e.downcast_ref::<ErrorKind>() {
                Some(ErrorKind::NotFoundByUsername(_)) => {
                    writeln!(out, "User '{}' not found.", username)?;
                    return Ok(());
                }
                _ => return Err(e),
            },
        };

        let last_login = user
            .last_login
            .map(|t| t.to_string())
            .unwrap_or_else(|| "None".into());

        writeln!(out, "\nUser ID: {}", user.id)?;
        writeln!(out, "Username: {}", user.username)?;
        writeln!(out, "Email: {}", user.email)?;
        writeln!(out, "Full Name: {}", user.full_name())?;
        writeln!(out, "Date Joined: {}", user.date_joined)?;
        writeln!(out, "Last Login: {}", last_login)?;

        let ratings = self.controller.ratings_by(&user)?;
        writeln!(out, "\nTotal Ratings: {}", ratings.len())?;

        if ratings.is_empty() {
            writeln!(out, "  No ratings yet.")?;
            return Ok(());
        }

        writeln!(out, "\nRating History:")?;
        for (idx, rating) in ratings.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} - {}★ (Rated: {})",
                idx + 1,
                rating.movie_title,
                rating.rating,
                rating.updated_at.format("%Y-%m-%d %H:%M")
            )?;
        }

        Ok(())
    }
}
