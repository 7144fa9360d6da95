// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by table construction, access, and transforms.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use crate::DataType;

/// Errors returned when building, reading, or transforming a [`Table`](crate::Table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A referenced field does not exist in the table schema.
    UnknownField(String),
    /// Two columns (or an output and an existing column) share a name.
    DuplicateField(String),
    /// A value or operation does not match the field's type.
    TypeMismatch {
        /// Field being read, written, or reduced.
        field: String,
        /// Type the operation needed.
        expected: DataType,
        /// Type actually found.
        found: DataType,
    },
    /// Columns passed to a constructor have different lengths.
    LengthMismatch {
        /// Column whose length disagrees with the first column.
        field: String,
        /// Length of the first column.
        expected: usize,
        /// Length of `field`.
        found: usize,
    },
    /// A record has the wrong number of values for the schema.
    ArityMismatch {
        /// Number of fields in the schema.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A row index is past the end of the table.
    RowOutOfBounds {
        /// Requested row.
        row: usize,
        /// Number of rows in the table.
        len: usize,
    },
    /// A grouping operation was given no key fields.
    EmptyGroupKeys,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown field `{name}`"),
            Self::DuplicateField(name) => write!(f, "duplicate field `{name}`"),
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => write!(f, "field `{field}` is {found}, expected {expected}"),
            Self::LengthMismatch {
                field,
                expected,
                found,
            } => write!(f, "column `{field}` has {found} rows, expected {expected}"),
            Self::ArityMismatch { expected, found } => {
                write!(f, "record has {found} values, schema has {expected} fields")
            }
            Self::RowOutOfBounds { row, len } => {
                write!(f, "row {row} out of bounds for table with {len} rows")
            }
            Self::EmptyGroupKeys => f.write_str("grouping requires at least one key field"),
        }
    }
}

impl core::error::Error for TableError {}
