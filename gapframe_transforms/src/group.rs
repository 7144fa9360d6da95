// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partitioning rows by key columns.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use smallvec::SmallVec;

use gapframe_core::{Table, TableError, Value};

/// The values of the grouping columns for one group, in key order.
pub type GroupKey = SmallVec<[Value; 4]>;

/// Row partition of a table, in first-appearance order of each key.
#[derive(Debug)]
pub(crate) struct Groups {
    pub(crate) keys: Vec<GroupKey>,
    pub(crate) rows: Vec<Vec<usize>>,
}

impl Groups {
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// First row of each group; these carry the key values.
    pub(crate) fn first_rows(&self) -> Vec<usize> {
        self.rows.iter().filter_map(|r| r.first().copied()).collect()
    }
}

/// Checks that `by` is non-empty and names existing fields.
pub(crate) fn resolve_keys<S: AsRef<str>>(table: &Table, by: &[S]) -> Result<(), TableError> {
    if by.is_empty() {
        return Err(TableError::EmptyGroupKeys);
    }
    for name in by {
        table.schema().index_of(name.as_ref())?;
    }
    Ok(())
}

/// Partitions the rows of `table` by the values in `by`.
///
/// Callers validate `by` with [`resolve_keys`] first.
pub(crate) fn group_rows<S: AsRef<str>>(table: &Table, by: &[S]) -> Result<Groups, TableError> {
    let mut columns = Vec::with_capacity(by.len());
    for name in by {
        columns.push(table.column(name.as_ref())?);
    }

    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups = Groups {
        keys: Vec::new(),
        rows: Vec::new(),
    };
    for row in 0..table.row_count() {
        let key: GroupKey = columns.iter().filter_map(|c| c.get(row)).collect();
        match index.entry(key) {
            Entry::Occupied(e) => groups.rows[*e.get()].push(row),
            Entry::Vacant(e) => {
                groups.keys.push(e.key().clone());
                groups.rows.push(alloc::vec![row]);
                e.insert(groups.keys.len() - 1);
            }
        }
    }
    Ok(groups)
}

/// Splits `table` into one sub-table per distinct key of `by`.
///
/// Groups come out in the order their key first appears; each sub-table keeps every column and
/// the input row order. This is the "split" step of split-apply-combine on its own;
/// [`aggregate`](crate::aggregate) fuses it with the reductions.
pub fn split<S: AsRef<str>>(table: &Table, by: &[S]) -> Result<Vec<(GroupKey, Table)>, TableError> {
    resolve_keys(table, by)?;
    let groups = group_rows(table, by)?;
    tracing::debug!(rows = table.row_count(), groups = groups.len(), "split");
    groups
        .keys
        .into_iter()
        .zip(groups.rows)
        .map(|(key, rows)| table.take(&rows).map(|t| (key, t)))
        .collect()
}

/// Distinct combinations of the `by` columns, in first-appearance order.
pub fn distinct<S: AsRef<str>>(table: &Table, by: &[S]) -> Result<Table, TableError> {
    resolve_keys(table, by)?;
    let groups = group_rows(table, by)?;
    table.take(&groups.first_rows())?.select(by)
}
