// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Couldn't find user with username({0})")]
    NotFoundByUsername(String),

    #[error("Database file {0} doesn't exist")]
    MissingDatabase(String),

    #[error("Couldn't connect to {0}: {1}")]
    ConnectionFailed(String, String),
}
