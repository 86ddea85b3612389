pub mod ratings;
pub mod users;
