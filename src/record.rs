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

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::http::{lenient_u64, HttpClient};
use crate::result_set::{FieldValue, Filterable};
use crate::session::Session;
use crate::zone::Zone;

const MX: &str = "MX";

/// Wire body for record create/update calls, and the snapshot unit for
/// dirty-checking. `aux` is serialized only for MX records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordData {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub ttl: u32,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux: Option<u32>,
}

/// One DNS record belonging to a zone.
///
/// A record is either hydrated from the server (saved, id set, snapshot
/// locked) or built fresh with [`Record::new`] (unsaved, no id). Field
/// setters validate invariants immediately; [`save`](Record::save) compares
/// the current fields against the last-synced snapshot and skips the network
/// entirely when nothing changed.
pub struct Record<'a, C: HttpClient> {
    session: &'a Session<C>,
    zone_id: u64,
    id: Option<u64>,
    record_type: String,
    name: String,
    data: String,
    ttl: u32,
    aux: Option<u32>,
    locked: Option<RecordData>,
}

impl<'a, C: HttpClient> Record<'a, C> {
    /// Starts an unsaved record in `zone`. The type is case-normalized and
    /// `data` goes through the same validation as [`set_data`](Self::set_data).
    pub fn new(
        zone: &Zone<'a, C>,
        record_type: &str,
        name: &str,
        data: &str,
        ttl: u32,
    ) -> Result<Self> {
        let mut record = Self {
            session: zone.session(),
            zone_id: zone.id(),
            id: None,
            record_type: record_type.to_uppercase(),
            name: name.to_string(),
            data: String::new(),
            ttl,
            aux: None,
            locked: None,
        };
        record.set_data(data)?;
        Ok(record)
    }

    /// Hydrates a record from one entry of the zone's record list.
    ///
    /// Unlike direct assignment, `data` and `aux` are adopted as-is: the
    /// server may hold legacy MX targets without a trailing dot. The
    /// snapshot is locked immediately, so a fresh record reports itself
    /// unchanged.
    pub fn from_json(zone: &Zone<'a, C>, data: &Value) -> Result<Self> {
        let id = lenient_u64(data.get("id"))
            .ok_or_else(|| Error::unexpected("record entry missing id"))?;
        let record_type = data
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unexpected("record entry missing type"))?
            .to_uppercase();
        let name = data
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unexpected("record entry missing name"))?
            .to_string();
        let value = data
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unexpected("record entry missing data"))?
            .to_string();
        let ttl = lenient_u64(data.get("ttl"))
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| Error::unexpected("record entry missing ttl"))?;
        let aux = lenient_u64(data.get("aux")).and_then(|v| u32::try_from(v).ok());

        let mut record = Self {
            session: zone.session(),
            zone_id: zone.id(),
            id: Some(id),
            record_type,
            name,
            data: value,
            ttl,
            aux,
            locked: None,
        };
        record.lock();
        Ok(record)
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Stores the type upper-cased, any input case accepted.
    pub fn set_record_type(&mut self, record_type: &str) {
        self.record_type = record_type.to_uppercase();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Assigns the record value. For MX records the target must be a fully
    /// qualified name ending in a dot.
    pub fn set_data(&mut self, data: &str) -> Result<()> {
        if self.is_mx() && !data.ends_with('.') {
            return Err(Error::validation(
                "MX data must be a fully qualified name ending with '.'",
            ));
        }
        self.data = data.to_string();
        Ok(())
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: u32) {
        self.ttl = ttl;
    }

    /// The MX priority. Erring for every other record type.
    pub fn aux(&self) -> Result<Option<u32>> {
        if !self.is_mx() {
            return Err(Error::validation("aux is only available on MX records"));
        }
        Ok(self.aux)
    }

    /// Sets the MX priority. Erring for every other record type.
    pub fn set_aux(&mut self, aux: u32) -> Result<()> {
        if !self.is_mx() {
            return Err(Error::validation("aux is only available on MX records"));
        }
        self.aux = Some(aux);
        Ok(())
    }

    fn is_mx(&self) -> bool {
        self.record_type == MX
    }

    /// Cross-field check run before any create or update.
    pub fn validate(&self) -> Result<()> {
        if self.is_mx() && self.aux.unwrap_or(0) == 0 {
            return Err(Error::validation("MX record requires a priority (aux) value"));
        }
        Ok(())
    }

    /// Current field values in wire shape.
    pub fn export(&self) -> RecordData {
        RecordData {
            record_type: self.record_type.clone(),
            name: self.name.clone(),
            ttl: self.ttl,
            data: self.data.clone(),
            aux: if self.is_mx() { self.aux } else { None },
        }
    }

    fn lock(&mut self) {
        self.locked = Some(self.export());
    }

    /// Whether the current fields differ from the last-synced snapshot.
    /// A record that was never synced is always changed.
    pub fn is_changed(&self) -> bool {
        self.locked.as_ref() != Some(&self.export())
    }

    /// Submits an unsaved record, adopting the id the server assigns.
    ///
    /// Local state is only touched after the call and the response parse
    /// succeed; a failed create leaves the record unsaved and dirty.
    pub async fn create(&mut self) -> Result<()> {
        if self.id.is_some() {
            return Err(Error::precondition("record already has an id"));
        }
        self.validate()?;

        let body = serde_json::to_value(self.export())?;
        let response = self
            .session
            .post(&format!("/{}/dns", self.zone_id), &body)
            .await?;

        let id = lenient_u64(response.pointer("/data/id"))
            .ok_or_else(|| Error::unexpected("create response missing data.id"))?;

        tracing::debug!(record_id = id, zone_id = self.zone_id, "record created");
        self.id = Some(id);
        self.lock();
        Ok(())
    }

    /// Pushes local changes to the server.
    ///
    /// Does nothing when the record matches its snapshot. An unsaved record
    /// delegates to [`create`](Self::create); a saved one is PUT to its
    /// endpoint and the snapshot re-locked.
    pub async fn save(&mut self) -> Result<()> {
        if !self.is_changed() {
            return Ok(());
        }

        let Some(record_id) = self.id else {
            return self.create().await;
        };

        self.validate()?;
        let body = serde_json::to_value(self.export())?;
        self.session
            .put(&format!("/{}/dns/{}", self.zone_id, record_id), &body)
            .await?;

        tracing::debug!(record_id, zone_id = self.zone_id, "record updated");
        self.lock();
        Ok(())
    }

    /// Removes the record from the zone and returns it to the unsaved
    /// state. Success is judged by HTTP status alone; the response body is
    /// not inspected.
    pub async fn delete(&mut self) -> Result<()> {
        let Some(record_id) = self.id else {
            return Err(Error::precondition("cannot delete an unsaved record"));
        };

        self.session
            .delete(&format!("/{}/dns/{}", self.zone_id, record_id))
            .await?;

        tracing::debug!(record_id, zone_id = self.zone_id, "record deleted");
        self.id = None;
        self.locked = None;
        Ok(())
    }

    /// Renders the record as a single BIND-style zone file line.
    pub fn bindformat(&self) -> String {
        if self.is_mx() {
            format!(
                "{} {} {} {} {}",
                self.name,
                self.ttl,
                self.record_type,
                self.aux.unwrap_or(0),
                self.data
            )
        } else {
            format!(
                "{} {} {} {}",
                self.name, self.ttl, self.record_type, self.data
            )
        }
    }
}

impl<C: HttpClient> Clone for Record<'_, C> {
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            zone_id: self.zone_id,
            id: self.id,
            record_type: self.record_type.clone(),
            name: self.name.clone(),
            data: self.data.clone(),
            ttl: self.ttl,
            aux: self.aux,
            locked: self.locked.clone(),
        }
    }
}

impl<C: HttpClient> fmt::Debug for Record<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Record({} -> {}/{})", id, self.record_type, self.name),
            None => write!(f, "Record(unsaved -> {}/{})", self.record_type, self.name),
        }
    }
}

impl<C: HttpClient> Filterable for Record<'_, C> {
    fn filter_fields() -> &'static [&'static str] {
        &["id", "type", "name", "ttl", "data", "aux"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => self.id.map(FieldValue::from),
            "type" => Some(FieldValue::from(self.record_type.as_str())),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "ttl" => Some(FieldValue::from(self.ttl)),
            "data" => Some(FieldValue::from(self.data.as_str())),
            "aux" => self.aux.filter(|_| self.is_mx()).map(FieldValue::from),
            _ => None,
        }
    }
}
