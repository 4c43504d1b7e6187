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

use std::cmp::Ordering;
use std::ops::Index;

use crate::error::{Error, Result};

/// Value of a filterable field.
///
/// Items expose their fields through this enum so criteria can be compared
/// without reflection. Integers cover ids, ttl and aux; strings cover the
/// rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Str(String),
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl FieldValue {
    fn cmp_same_kind(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            // A field always yields one kind across a homogeneous set.
            (Self::Int(_), Self::Str(_)) => Ordering::Less,
            (Self::Str(_), Self::Int(_)) => Ordering::Greater,
        }
    }
}

/// Exposes a closed set of named fields for filtering and sorting.
pub trait Filterable {
    /// The legal field names for this item type.
    fn filter_fields() -> &'static [&'static str];

    /// Current value of a field, or `None` when the field has no value on
    /// this item (e.g. the id of an unsaved record). `name` is always one
    /// of [`filter_fields`](Self::filter_fields).
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Homogeneous ordered container returned by listing operations.
///
/// All query operations return a new set and leave the source untouched.
#[derive(Debug, Clone)]
pub struct ResultSet<T> {
    items: Vec<T>,
}

impl<T: Filterable + Clone> ResultSet<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the items where every named field equals the given value.
    ///
    /// Empty criteria returns a copy of the whole set. Naming a field
    /// outside the item's field set is an error.
    pub fn filter(&self, criteria: &[(&str, FieldValue)]) -> Result<Self> {
        for (key, _) in criteria {
            if !T::filter_fields().iter().any(|f| f == key) {
                return Err(Error::UnknownField((*key).to_string()));
            }
        }

        let items = self
            .items
            .iter()
            .filter(|item| {
                criteria
                    .iter()
                    .all(|(key, value)| item.field(key).as_ref() == Some(value))
            })
            .cloned()
            .collect();

        Ok(Self { items })
    }

    /// Filters and requires exactly one match.
    pub fn get(&self, criteria: &[(&str, FieldValue)]) -> Result<T> {
        if criteria.is_empty() {
            return Err(Error::precondition("get requires at least one criterion"));
        }

        let filtered = self.filter(criteria)?;
        match filtered.len() {
            1 => Ok(filtered.items.into_iter().next().unwrap()),
            matched => Err(Error::AmbiguousLookup { matched }),
        }
    }

    /// Shorthand for a lookup by the `id` field.
    pub fn get_by_id(&self, id: u64) -> Result<T> {
        self.get(&[("id", FieldValue::from(id))])
    }

    /// Returns a new set ordered ascending by the named field. Items
    /// without a value for the field sort last.
    pub fn sort(&self, key: &str) -> Result<Self> {
        if !T::filter_fields().iter().any(|f| *f == key) {
            return Err(Error::UnknownField(key.to_string()));
        }

        let mut items = self.items.clone();
        items.sort_by(|a, b| match (a.field(key), b.field(key)) {
            (Some(x), Some(y)) => x.cmp_same_kind(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(Self { items })
    }
}

impl<T> Index<usize> for ResultSet<T> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        &self.items[position]
    }
}

impl<T> IntoIterator for ResultSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResultSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
