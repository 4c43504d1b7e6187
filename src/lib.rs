//! Client SDK for the Webglobe DNS hosting HTTP API
//!
//! Supported features:
//! - Token-based login (with optional OTP / SMS verification)
//! - Listing account zones and their DNS records
//! - Creating, updating and deleting records with local dirty-checking,
//!   so an unchanged record never hits the network
//! - Attribute-based filtering and sorting over result sets
//!
//! # Example
//! ```no_run
//! use webglobe_dns::{FieldValue, Session, DEFAULT_API_URL};
//!
//! async fn bump_ttl() -> webglobe_dns::Result<()> {
//!     let mut session = Session::new(DEFAULT_API_URL);
//!     session.login("user@example.com", "secret", None, None).await?;
//!
//!     let zones = session.zones().await?;
//!     let zone = zones.get(&[("name", FieldValue::from("example.com"))])?;
//!
//!     let mut record = zone.records().await?.get_by_id(101)?;
//!     record.set_ttl(900);
//!     record.save().await?;
//!     Ok(())
//! }
//! ```

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

pub mod error;
pub mod http;
pub mod record;
pub mod result_set;
pub mod session;
pub mod zone;

pub use error::{Error, Result};
pub use http::{ApiResponse, DefaultHttpClient, HttpClient};
pub use record::{Record, RecordData};
pub use result_set::{FieldValue, Filterable, ResultSet};
pub use session::{Session, DEFAULT_API_URL};
pub use zone::Zone;
