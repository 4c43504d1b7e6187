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

use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::http::{lenient_u64, HttpClient};
use crate::record::Record;
use crate::result_set::{FieldValue, Filterable, ResultSet};
use crate::session::Session;

/// One domain in the account.
pub struct Zone<'a, C: HttpClient> {
    session: &'a Session<C>,
    id: u64,
    name: String,
}

impl<'a, C: HttpClient> Zone<'a, C> {
    /// Hydrates a zone from one entry of the domain list response.
    ///
    /// The provider sends `domain_id` as a number or a numeric string.
    pub fn from_json(session: &'a Session<C>, data: &Value) -> Result<Self> {
        let id = lenient_u64(data.get("domain_id"))
            .ok_or_else(|| Error::unexpected("domain entry missing domain_id"))?;
        let name = data
            .get("domain")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unexpected("domain entry missing domain"))?
            .to_string();

        Ok(Self { session, id, name })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The zone's domain name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn session(&self) -> &'a Session<C> {
        self.session
    }

    /// Fetches the zone's DNS records. Re-fetched on every call, never
    /// cached.
    pub async fn records(&self) -> Result<ResultSet<Record<'a, C>>> {
        let body = self.session.get(&format!("/{}/dns", self.id)).await?;

        let entries = body
            .pointer("/data/records")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::unexpected("record list missing data.records"))?;

        let records = entries
            .iter()
            .map(|r| Record::from_json(self, r))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResultSet::new(records))
    }
}

impl<C: HttpClient> Clone for Zone<'_, C> {
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl<C: HttpClient> fmt::Display for Zone<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<C: HttpClient> fmt::Debug for Zone<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone({} -> {})", self.id, self.name)
    }
}

impl<C: HttpClient> Filterable for Zone<'_, C> {
    fn filter_fields() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::from(self.id)),
            "name" => Some(FieldValue::from(self.name.as_str())),
            _ => None,
        }
    }
}
