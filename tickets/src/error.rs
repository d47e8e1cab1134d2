// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Tickets error types

use std::error;
use std::fmt::{Display, Formatter};
use std::result;

/// Result type for operations that could result in an [TicketsError]
pub type Result<T> = result::Result<T, TicketsError>;

/// Tickets error
#[derive(Debug)]
pub enum TicketsError {
    /// The request body is present but is not valid JSON.
    InvalidJson(serde_json::Error),
    /// The payload has no usable `title`: absent, not a string, or blank
    /// after trimming.
    MissingTitle,
    /// Error returned when serde_json failed to serialize or deserialize data
    /// outside of request parsing.
    SerdeJson(serde_json::Error),
    /// Error returned when a configuration value cannot be used.
    Config(String),
}

impl TicketsError {
    /// Returns the HTTP status code the error is reported with.
    pub fn status_code(&self) -> i64 {
        match self {
            TicketsError::InvalidJson(_) | TicketsError::MissingTitle => 400,
            _ => 500,
        }
    }

    /// Returns the message exposed to the client in the response body.
    ///
    /// Internal errors never leak their details.
    pub fn message(&self) -> &'static str {
        match self {
            TicketsError::InvalidJson(_) => "Invalid JSON",
            TicketsError::MissingTitle => "Field 'title' is required",
            _ => "Internal server error",
        }
    }
}

impl From<serde_json::Error> for TicketsError {
    fn from(e: serde_json::Error) -> Self {
        TicketsError::SerdeJson(e)
    }
}

impl Display for TicketsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            TicketsError::InvalidJson(ref desc) => write!(f, "Invalid JSON: {}", desc),
            TicketsError::MissingTitle => write!(f, "Field 'title' is required"),
            TicketsError::SerdeJson(ref desc) => write!(f, "serde_json error: {:?}", desc),
            TicketsError::Config(ref desc) => write!(f, "Configuration error: {}", desc),
        }
    }
}

impl error::Error for TicketsError {}
