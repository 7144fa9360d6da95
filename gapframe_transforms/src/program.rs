// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential execution of transform chains.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};

use gapframe_core::{Table, TableError};

use crate::transform::{TableId, Transform};

/// Errors returned by [`Program::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// A transform reads a table that was neither supplied nor produced earlier.
    MissingInput(TableId),
    /// A transform failed.
    Transform {
        /// Position of the failing transform in the program.
        index: usize,
        /// The underlying table error.
        err: TableError,
    },
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(id) => write!(f, "missing input table {}", id.0),
            Self::Transform { index, err } => write!(f, "transform #{index} failed: {err}"),
        }
    }
}

impl core::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::MissingInput(_) => None,
            Self::Transform { err, .. } => Some(err),
        }
    }
}

/// Tables produced by a program run, keyed by output id.
#[derive(Debug, Clone, Default)]
pub struct ProgramOutput {
    /// Every output table, including intermediates.
    pub tables: HashMap<TableId, Table>,
}

impl ProgramOutput {
    /// Returns the table written to `id`, if any.
    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.tables.get(&id)
    }
}

/// An ordered chain of transforms.
///
/// Each transform reads one table and writes another; later transforms see the outputs of
/// earlier ones, so a chain like `filter -> mutate -> aggregate -> aggregate` is a sequence of
/// pushes wiring each output id into the next input id.
#[derive(Debug, Clone, Default)]
pub struct Program {
    transforms: Vec<Transform>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform.
    pub fn push(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn then(mut self, transform: Transform) -> Self {
        self.push(transform);
        self
    }

    /// Table ids the caller must supply: inputs not produced by an earlier transform.
    ///
    /// Ids are listed in the order they are first read.
    pub fn external_inputs(&self) -> Vec<TableId> {
        let mut produced: HashSet<TableId> = HashSet::new();
        let mut seen: HashSet<TableId> = HashSet::new();
        let mut out = Vec::new();
        for t in &self.transforms {
            let input = t.input();
            if !produced.contains(&input) && seen.insert(input) {
                out.push(input);
            }
            produced.insert(t.output());
        }
        out
    }

    /// Runs every transform in order against `inputs`.
    ///
    /// Outputs shadow caller-supplied tables with the same id. Execution stops at the first
    /// failure; no partial output is returned.
    pub fn execute(&self, inputs: &HashMap<TableId, Table>) -> Result<ProgramOutput, ExecutionError> {
        let mut out = ProgramOutput::default();
        for (index, t) in self.transforms.iter().enumerate() {
            let id = t.input();
            let Some(input) = out.tables.get(&id).or_else(|| inputs.get(&id)) else {
                return Err(ExecutionError::MissingInput(id));
            };
            let table = t
                .apply(input)
                .map_err(|err| ExecutionError::Transform { index, err })?;
            tracing::debug!(
                index,
                input = id.0,
                output = t.output().0,
                rows = table.row_count(),
                "transform"
            );
            out.tables.insert(t.output(), table);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;
    use alloc::vec;

    use gapframe_core::Column;

    use super::*;
    use crate::{AggregateField, Expr, Predicate, SortKey};

    const SOURCE: TableId = TableId(1);
    const RECENT: TableId = TableId(2);
    const WITH_GDP: TableId = TableId(3);
    const BY_YEAR: TableId = TableId(4);
    const BY_CONTINENT: TableId = TableId(5);

    fn source() -> HashMap<TableId, Table> {
        let t = Table::new(vec![
            ("continent", Column::from(vec!["Asia", "Europe", "Asia", "Europe"])),
            ("year", Column::from(vec![1970_i64, 1980, 1990, 1990])),
            ("pop", Column::from(vec![10_i64, 20, 30, 40])),
            ("gdpPercap", Column::from(vec![1.0, 2.0, 3.0, 4.0])),
        ])
        .unwrap();
        let mut inputs = HashMap::new();
        inputs.insert(SOURCE, t);
        inputs
    }

    fn chain() -> Program {
        Program::new()
            .then(Transform::Filter {
                input: SOURCE,
                output: RECENT,
                predicate: Predicate::gt("year", 1975_i64),
            })
            .then(Transform::Mutate {
                input: RECENT,
                output: WITH_GDP,
                name: "gdp".into(),
                expr: Expr::col("pop") * Expr::col("gdpPercap"),
            })
            .then(Transform::Aggregate {
                input: WITH_GDP,
                output: BY_YEAR,
                group_by: vec!["continent".into(), "year".into()],
                fields: vec![AggregateField::mean("gdp", "gdp")],
            })
            .then(Transform::Aggregate {
                input: BY_YEAR,
                output: BY_CONTINENT,
                group_by: vec!["continent".into()],
                fields: vec![AggregateField::mean("gdp", "gdp")],
            })
    }

    #[test]
    fn two_stage_chain_runs_in_order() {
        let out = chain().execute(&source()).unwrap();
        let recent = out.get(RECENT).unwrap();
        assert_eq!(recent.row_count(), 3);

        let by_continent = out.get(BY_CONTINENT).unwrap();
        // Europe: 1980 -> 40, 1990 -> 160; Asia: 1990 -> 90.
        assert_eq!(by_continent.label(0, "continent"), Ok("Europe"));
        assert_eq!(by_continent.float(0, "gdp"), Ok(100.0));
        assert_eq!(by_continent.float(1, "gdp"), Ok(90.0));
    }

    #[test]
    fn external_inputs_skip_produced_tables() {
        let p = chain().then(Transform::Sort {
            input: TableId(9),
            output: TableId(10),
            by: vec![SortKey::asc("year")],
        });
        assert_eq!(p.external_inputs(), vec![SOURCE, TableId(9)]);
    }

    #[test]
    fn missing_input_and_failing_transform() {
        let p = Program::new().then(Transform::Head {
            input: TableId(7),
            output: TableId(8),
            n: 1,
        });
        assert_eq!(
            p.execute(&source()).unwrap_err(),
            ExecutionError::MissingInput(TableId(7))
        );

        let p = chain().then(Transform::Project {
            input: BY_CONTINENT,
            output: TableId(6),
            columns: vec![String::from("year")],
        });
        assert_eq!(
            p.execute(&source()).unwrap_err(),
            ExecutionError::Transform {
                index: 4,
                err: TableError::UnknownField("year".into()),
            }
        );
    }
}
