// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-key row sorting.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use gapframe_core::{Column, Table, TableError};

use crate::{SortKey, SortOrder};

/// Returns `table` with rows reordered by `keys`, most significant key first.
///
/// The sort is stable: rows that tie on every key keep their input order. Floats use a total
/// order, so NaN sorts after every number when ascending.
pub fn sort(table: &Table, keys: &[SortKey]) -> Result<Table, TableError> {
    let mut columns = Vec::with_capacity(keys.len());
    for key in keys {
        columns.push((table.column(&key.field)?, key.order));
    }

    let mut rows: Vec<usize> = (0..table.row_count()).collect();
    rows.sort_by(|&a, &b| {
        columns
            .iter()
            .map(|&(col, order)| {
                let ord = compare_rows(col, a, b);
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    tracing::debug!(rows = rows.len(), keys = keys.len(), "sort");
    table.take(&rows)
}

fn compare_rows(col: &Column, a: usize, b: usize) -> Ordering {
    match col {
        Column::Label(v) => v[a].cmp(&v[b]),
        Column::Int(v) => v[a].cmp(&v[b]),
        Column::Float(v) => match (v[a].is_nan(), v[b].is_nan()) {
            (false, false) => v[a].total_cmp(&v[b]),
            (x, y) => x.cmp(&y),
        },
    }
}
