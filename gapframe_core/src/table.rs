// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned columnar table representation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::{DataType, Field, Schema, TableError, Value};

/// One row of a table, in schema order.
pub type Record = Vec<Value>;

/// Typed column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Label column.
    Label(Vec<String>),
    /// Integer column.
    Int(Vec<i64>),
    /// Float column.
    Float(Vec<f64>),
}

impl Column {
    /// Create an empty column of the given type.
    pub fn with_capacity(dtype: DataType, capacity: usize) -> Self {
        match dtype {
            DataType::Label => Self::Label(Vec::with_capacity(capacity)),
            DataType::Int => Self::Int(Vec::with_capacity(capacity)),
            DataType::Float => Self::Float(Vec::with_capacity(capacity)),
        }
    }

    /// Returns the column type.
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Label(_) => DataType::Label,
            Self::Int(_) => DataType::Int,
            Self::Float(_) => DataType::Float,
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Label(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }

    /// Returns `true` if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value at `row`, if present.
    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            Self::Label(v) => v.get(row).map(|s| Value::Label(s.clone())),
            Self::Int(v) => v.get(row).copied().map(Value::Int),
            Self::Float(v) => v.get(row).copied().map(Value::Float),
        }
    }

    /// Returns the numeric value at `row` as `f64`.
    ///
    /// Returns `None` for label columns and out-of-range rows.
    pub fn f64(&self, row: usize) -> Option<f64> {
        match self {
            Self::Label(_) => None,
            Self::Int(v) => v.get(row).map(|&x| x as f64),
            Self::Float(v) => v.get(row).copied(),
        }
    }

    /// Appends a value, which must have exactly this column's type.
    ///
    /// On mismatch, returns the type of the rejected value.
    pub(crate) fn push(&mut self, value: Value) -> Result<(), DataType> {
        match (self, value) {
            (Self::Label(v), Value::Label(s)) => v.push(s),
            (Self::Int(v), Value::Int(x)) => v.push(x),
            (Self::Float(v), Value::Float(x)) => v.push(x),
            (_, other) => return Err(other.data_type()),
        }
        Ok(())
    }

    /// Overwrites the value at `row`, which must be in range and of this column's type.
    fn set(&mut self, row: usize, value: Value) -> Result<(), DataType> {
        match (self, value) {
            (Self::Label(v), Value::Label(s)) => v[row] = s,
            (Self::Int(v), Value::Int(x)) => v[row] = x,
            (Self::Float(v), Value::Float(x)) => v[row] = x,
            (_, other) => return Err(other.data_type()),
        }
        Ok(())
    }

    /// Gathers the given rows (which must be in range) into a new column.
    fn gather(&self, rows: &[usize]) -> Self {
        match self {
            Self::Label(v) => Self::Label(rows.iter().map(|&r| v[r].clone()).collect()),
            Self::Int(v) => Self::Int(rows.iter().map(|&r| v[r]).collect()),
            Self::Float(v) => Self::Float(rows.iter().map(|&r| v[r]).collect()),
        }
    }
}

impl From<Vec<String>> for Column {
    fn from(value: Vec<String>) -> Self {
        Self::Label(value)
    }
}

impl From<Vec<&str>> for Column {
    fn from(value: Vec<&str>) -> Self {
        Self::Label(value.into_iter().map(String::from).collect())
    }
}

impl From<Vec<i64>> for Column {
    fn from(value: Vec<i64>) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<f64>> for Column {
    fn from(value: Vec<f64>) -> Self {
        Self::Float(value)
    }
}

/// An immutable-by-default table of typed columns.
///
/// Transforms never modify a table; they return a new one. The only in-place edit is the
/// explicit single-cell update [`Table::set_cell`].
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Build a table from named columns.
    ///
    /// All columns must have the same length and distinct names.
    pub fn new<N: Into<String>>(columns: Vec<(N, Column)>) -> Result<Self, TableError> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (name, col) in columns {
            fields.push(Field::new(name, col.dtype()));
            data.push(col);
        }
        let schema = Schema::new(fields)?;
        let rows = data.first().map_or(0, Column::len);
        for (field, col) in schema.fields().iter().zip(&data) {
            if col.len() != rows {
                return Err(TableError::LengthMismatch {
                    field: field.name.clone(),
                    expected: rows,
                    found: col.len(),
                });
            }
        }
        Ok(Self {
            schema,
            columns: data,
            rows,
        })
    }

    /// Create a zero-row table with the given schema.
    pub fn empty(schema: Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|f| Column::with_capacity(f.dtype, 0))
            .collect();
        Self {
            schema,
            columns,
            rows: 0,
        }
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the column called `name`.
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.schema.index_of(name).map(|i| &self.columns[i])
    }

    /// Iterates over `(field, column)` pairs in schema order.
    pub fn columns(&self) -> impl Iterator<Item = (&Field, &Column)> {
        self.schema.fields().iter().zip(&self.columns)
    }

    fn check_row(&self, row: usize) -> Result<(), TableError> {
        if row < self.rows {
            Ok(())
        } else {
            Err(TableError::RowOutOfBounds {
                row,
                len: self.rows,
            })
        }
    }

    fn mismatch<T>(&self, field: &str, expected: DataType) -> Result<T, TableError> {
        let found = self.schema.field(field)?.dtype;
        Err(TableError::TypeMismatch {
            field: field.into(),
            expected,
            found,
        })
    }

    /// Returns the value at `row` in `field`.
    pub fn value(&self, row: usize, field: &str) -> Result<Value, TableError> {
        let col = self.column(field)?;
        self.check_row(row)?;
        col.get(row).ok_or(TableError::RowOutOfBounds {
            row,
            len: self.rows,
        })
    }

    /// Reads a label cell; fails on non-label fields.
    pub fn label(&self, row: usize, field: &str) -> Result<&str, TableError> {
        self.check_row(row)?;
        match self.column(field)? {
            Column::Label(v) => Ok(&v[row]),
            _ => self.mismatch(field, DataType::Label),
        }
    }

    /// Reads an integer cell; fails on non-integer fields.
    pub fn int(&self, row: usize, field: &str) -> Result<i64, TableError> {
        self.check_row(row)?;
        match self.column(field)? {
            Column::Int(v) => Ok(v[row]),
            _ => self.mismatch(field, DataType::Int),
        }
    }

    /// Reads a float cell; fails on non-float fields (integers are not widened).
    pub fn float(&self, row: usize, field: &str) -> Result<f64, TableError> {
        self.check_row(row)?;
        match self.column(field)? {
            Column::Float(v) => Ok(v[row]),
            _ => self.mismatch(field, DataType::Float),
        }
    }

    /// Reads a numeric cell as `f64`, widening integers; fails on label fields.
    pub fn numeric(&self, row: usize, field: &str) -> Result<f64, TableError> {
        self.check_row(row)?;
        match self.column(field)?.f64(row) {
            Some(v) => Ok(v),
            None => self.mismatch(field, DataType::Float),
        }
    }

    /// Returns row `row` as an owned record.
    pub fn record(&self, row: usize) -> Result<Record, TableError> {
        self.check_row(row)?;
        Ok(self.columns.iter().filter_map(|c| c.get(row)).collect())
    }

    /// Returns a new table with the given rows, in the given order.
    ///
    /// Rows may repeat.
    pub fn take(&self, rows: &[usize]) -> Result<Self, TableError> {
        if let Some(&row) = rows.iter().find(|&&r| r >= self.rows) {
            return Err(TableError::RowOutOfBounds {
                row,
                len: self.rows,
            });
        }
        Ok(Self {
            schema: self.schema.clone(),
            columns: self.columns.iter().map(|c| c.gather(rows)).collect(),
            rows: rows.len(),
        })
    }

    /// Returns a new table with only the named columns, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, TableError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            columns.push((name, self.column(name)?.clone()));
        }
        let mut out = Self::new(columns)?;
        out.rows = self.rows;
        Ok(out)
    }

    /// Returns a new table with `column` appended as `name`, or replacing an existing column of
    /// that name in place.
    pub fn with_column(&self, name: &str, column: Column) -> Result<Self, TableError> {
        if column.len() != self.rows {
            return Err(TableError::LengthMismatch {
                field: name.into(),
                expected: self.rows,
                found: column.len(),
            });
        }
        let mut out = self.clone();
        match self.schema.position(name) {
            Some(i) => {
                let mut fields = self.schema.fields().to_vec();
                fields[i].dtype = column.dtype();
                out.schema = Schema::new(fields)?;
                out.columns[i] = column;
            }
            None => {
                let mut fields = self.schema.fields().to_vec();
                fields.push(Field::new(name, column.dtype()));
                out.schema = Schema::new(fields)?;
                out.columns.push(column);
            }
        }
        Ok(out)
    }

    /// Overwrites one cell in place.
    ///
    /// The value must have exactly the column's type; nothing is coerced.
    pub fn set_cell(&mut self, row: usize, field: &str, value: Value) -> Result<(), TableError> {
        let idx = self.schema.index_of(field)?;
        self.check_row(row)?;
        let expected = self.schema.fields()[idx].dtype;
        tracing::trace!(row, field, "set cell");
        self.columns[idx]
            .set(row, value)
            .map_err(|found| TableError::TypeMismatch {
                field: field.into(),
                expected,
                found,
            })
    }

    /// Returns a copy of this table with one cell replaced.
    pub fn with_cell(&self, row: usize, field: &str, value: Value) -> Result<Self, TableError> {
        let mut out = self.clone();
        out.set_cell(row, field, value)?;
        Ok(out)
    }
}

/// Row-wise builder that type-checks every value against a schema.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    schema: Schema,
    columns: Vec<Column>,
    rows: usize,
}

impl TableBuilder {
    /// Start building a table with the given schema.
    pub fn new(schema: Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|f| Column::with_capacity(f.dtype, 0))
            .collect();
        Self {
            schema,
            columns,
            rows: 0,
        }
    }

    /// Appends one record.
    ///
    /// On error the builder is left unchanged.
    pub fn push_record(&mut self, record: Record) -> Result<(), TableError> {
        if record.len() != self.schema.len() {
            return Err(TableError::ArityMismatch {
                expected: self.schema.len(),
                found: record.len(),
            });
        }
        for (field, value) in self.schema.fields().iter().zip(&record) {
            if value.data_type() != field.dtype {
                return Err(TableError::TypeMismatch {
                    field: field.name.clone(),
                    expected: field.dtype,
                    found: value.data_type(),
                });
            }
        }
        for (col, value) in self.columns.iter_mut().zip(record) {
            // Types were checked above.
            let _ = col.push(value);
        }
        self.rows += 1;
        Ok(())
    }

    /// Returns the number of rows pushed so far.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Finish building.
    pub fn finish(self) -> Table {
        Table {
            schema: self.schema,
            columns: self.columns,
            rows: self.rows,
        }
    }
}
