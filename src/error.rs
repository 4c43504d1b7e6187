// Copyright 2025 webglobe-dns authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use thiserror::Error;

/// Result type alias for all SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Provider error code signalling an attempt to create a record that
/// already exists.
pub const DUPLICATE_RECORD_CODE: i64 = 937;

/// Error type for the Webglobe DNS client.
#[derive(Error, Debug)]
pub enum Error {
    /// Login was rejected (non-200 from the auth endpoint).
    #[error("authentication failed ({code}): {message}")]
    Authentication { code: i64, message: String },

    /// The API returned a non-200 response with an error object.
    #[error("API error ({code}): {message}")]
    Api { code: i64, message: String },

    /// The API rejected a record create as a duplicate (code 937).
    #[error("duplicate record ({code}): {message}")]
    DuplicateRecord { code: i64, message: String },

    /// A field assignment or pre-submission check violated a record
    /// invariant. Raised before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation was called on an object in the wrong state, e.g.
    /// deleting an unsaved record.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A single-item lookup matched zero or more than one item.
    #[error("lookup matched {matched} items, expected exactly one")]
    AmbiguousLookup { matched: usize },

    /// Filter or sort criteria named a field outside the item's field set.
    #[error("unknown filter field: {0}")]
    UnknownField(String),

    /// The response body did not have the documented shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Low-level HTTP failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A header value could not be constructed.
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a precondition error.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create an unexpected-response error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Map a provider error object to the matching variant.
    pub fn from_api_code(code: i64, message: String) -> Self {
        if code == DUPLICATE_RECORD_CODE {
            Self::DuplicateRecord { code, message }
        } else {
            Self::Api { code, message }
        }
    }
}
