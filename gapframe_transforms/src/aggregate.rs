// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped aggregation.

extern crate alloc;

use alloc::vec::Vec;

use gapframe_core::{Field, Record, Schema, Table, TableBuilder, TableError};

use crate::group::{group_rows, resolve_keys};
use crate::{AggregateField, AggregateOp};

/// Groups `table` by `group_by` and computes `fields` for every group.
///
/// The result has the `group_by` columns (with their original types) followed by one column per
/// field: `Count` produces an integer column, every other op a float column. There is exactly
/// one row per distinct key present in the input, in first-appearance order, so an empty input
/// produces an empty result rather than an error.
///
/// Field names and input types are checked before grouping, so the same schema errors are
/// reported whether or not the table has rows.
///
/// Because the output is an ordinary table, it can be aggregated again by a subset of the keys.
pub fn aggregate<S: AsRef<str>>(
    table: &Table,
    group_by: &[S],
    fields: &[AggregateField],
) -> Result<Table, TableError> {
    resolve_keys(table, group_by)?;
    let mut schema = Vec::with_capacity(group_by.len() + fields.len());
    for name in group_by {
        schema.push(table.schema().field(name.as_ref())?.clone());
    }
    let mut inputs = Vec::with_capacity(fields.len());
    for field in fields {
        inputs.push(match field.op {
            // Counting reads no values, so any existing column will do.
            AggregateOp::Count => {
                for name in field.input.columns() {
                    table.schema().index_of(name)?;
                }
                None
            }
            _ => Some(field.input.bind(table)?),
        });
        schema.push(Field::new(field.output.clone(), field.op.output_type()));
    }
    let mut builder = TableBuilder::new(Schema::new(schema)?);

    let groups = group_rows(table, group_by)?;
    for (key, rows) in groups.keys.iter().zip(&groups.rows) {
        let mut record: Record = key.to_vec();
        for (field, input) in fields.iter().zip(&inputs) {
            let values = rows
                .iter()
                .map(|&r| input.as_ref().map_or(1.0, |expr| expr.eval(r)));
            record.push(field.op.reduce(values));
        }
        builder.push_record(record)?;
    }

    tracing::debug!(
        input_rows = table.row_count(),
        groups = groups.len(),
        fields = fields.len(),
        "aggregate"
    );
    Ok(builder.finish())
}
