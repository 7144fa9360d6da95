// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named, typed fields.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::{DataType, TableError};

/// A named, typed column slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Column name, unique within a schema.
    pub name: String,
    /// Column type.
    pub dtype: DataType,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// An ordered list of uniquely named fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Build a schema, rejecting duplicate names.
    pub fn new(fields: Vec<Field>) -> Result<Self, TableError> {
        {
            let mut seen = HashSet::with_capacity(fields.len());
            for f in &fields {
                if !seen.insert(f.name.as_str()) {
                    return Err(TableError::DuplicateField(f.name.clone()));
                }
            }
        }
        Ok(Self { fields })
    }

    /// Returns the fields in order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the position of `name`, or [`TableError::UnknownField`].
    pub fn index_of(&self, name: &str) -> Result<usize, TableError> {
        self.position(name)
            .ok_or_else(|| TableError::UnknownField(name.into()))
    }

    /// Returns the field called `name`.
    pub fn field(&self, name: &str) -> Result<&Field, TableError> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    /// Iterates over field names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let err = Schema::new(vec![
            Field::new("year", DataType::Int),
            Field::new("year", DataType::Float),
        ])
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateField("year".into()));
    }

    #[test]
    fn unknown_field_is_reported_by_name() {
        let schema = Schema::new(vec![Field::new("country", DataType::Label)]).unwrap();
        assert_eq!(schema.index_of("country"), Ok(0));
        assert_eq!(
            schema.index_of("continent"),
            Err(TableError::UnknownField("continent".into()))
        );
    }
}
