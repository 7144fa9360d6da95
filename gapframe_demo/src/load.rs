// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSV loading into typed tables.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::ReaderBuilder;
use gapframe_core::{DataType, Field, Schema, Table, TableBuilder, TableError, Value};
use thiserror::Error;

/// The sample shipped with the demo.
pub(crate) const BUNDLED_GAPMINDER: &str = include_str!("../data/gapminder_sample.csv");

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("header has no `{0}` column")]
    MissingColumn(String),
    #[error("line {line}: cannot read `{text}` in column `{column}` as {dtype}")]
    Parse {
        line: u64,
        column: String,
        text: String,
        dtype: DataType,
    },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Schema of the Gapminder panel: one row per country and year.
pub(crate) fn gapminder_schema() -> Result<Schema, TableError> {
    Schema::new(vec![
        Field::new("country", DataType::Label),
        Field::new("continent", DataType::Label),
        Field::new("year", DataType::Int),
        Field::new("lifeExp", DataType::Float),
        Field::new("pop", DataType::Int),
        Field::new("gdpPercap", DataType::Float),
    ])
}

/// Reads CSV with a header row into a table with `schema`.
///
/// Columns are matched by header name, so extra columns are ignored and order does not matter.
/// Every cell must parse as its field's type.
pub(crate) fn read_table<R: io::Read>(reader: R, schema: &Schema) -> Result<Table, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut positions = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let pos = headers
            .iter()
            .position(|h| h == field.name)
            .ok_or_else(|| LoadError::MissingColumn(field.name.clone()))?;
        positions.push(pos);
    }

    let mut builder = TableBuilder::new(schema.clone());
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let mut values = Vec::with_capacity(schema.len());
        for (field, &pos) in schema.fields().iter().zip(&positions) {
            let text = record.get(pos).unwrap_or_default();
            values.push(parse_cell(text, field).ok_or_else(|| LoadError::Parse {
                line,
                column: field.name.clone(),
                text: text.to_owned(),
                dtype: field.dtype,
            })?);
        }
        builder.push_record(values)?;
    }
    tracing::debug!(rows = builder.row_count(), "read csv");
    Ok(builder.finish())
}

/// Reads a CSV file from disk.
pub(crate) fn read_path(path: &Path, schema: &Schema) -> Result<Table, LoadError> {
    read_table(File::open(path)?, schema)
}

fn parse_cell(text: &str, field: &Field) -> Option<Value> {
    match field.dtype {
        DataType::Label => Some(Value::Label(text.to_owned())),
        DataType::Int => text.parse().ok().map(Value::Int),
        DataType::Float => text.parse().ok().map(Value::Float),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sample_loads_with_gapminder_types() {
        let t = read_table(BUNDLED_GAPMINDER.as_bytes(), &gapminder_schema().unwrap()).unwrap();
        assert_eq!(t.row_count(), 36);
        assert_eq!(t.label(0, "country"), Ok("Afghanistan"));
        assert_eq!(t.int(0, "year"), Ok(1952));
        assert_eq!(t.int(0, "pop"), Ok(8_425_333));
        assert_eq!(t.float(12, "lifeExp"), Ok(44.0));
        assert_eq!(t.label(27, "country"), Ok("New Zealand"));
    }

    #[test]
    fn columns_are_matched_by_name() {
        let csv = "year,extra,country\n2007,x,Kenya\n";
        let schema = Schema::new(vec![
            Field::new("country", DataType::Label),
            Field::new("year", DataType::Int),
        ])
        .unwrap();
        let t = read_table(csv.as_bytes(), &schema).unwrap();
        assert_eq!(t.label(0, "country"), Ok("Kenya"));
        assert_eq!(t.int(0, "year"), Ok(2007));
    }

    #[test]
    fn bad_cells_and_missing_columns_are_reported() {
        let schema = gapminder_schema().unwrap();
        let err = read_table("country,year\nX,1952\n".as_bytes(), &schema).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "continent"));

        let csv = "country,continent,year,lifeExp,pop,gdpPercap\nX,Asia,19x2,1.0,2,3.0\n";
        let err = read_table(csv.as_bytes(), &schema).unwrap_err();
        match err {
            LoadError::Parse {
                line, column, text, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "year");
                assert_eq!(text, "19x2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
