// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-text rendering of tables.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{DataType, Table};

/// Float precision used when the formatter does not specify one.
const DEFAULT_PRECISION: usize = 3;

/// Renders the table as an aligned grid followed by a `[rows x cols]` footer.
///
/// Labels are left-aligned and numbers right-aligned. Floats use the formatter's precision
/// (`{:.1}`) or three decimals by default.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.schema().len());
        let mut widths = Vec::with_capacity(self.schema().len());
        for (field, col) in self.columns() {
            let mut text = Vec::with_capacity(self.row_count());
            for row in 0..self.row_count() {
                let v = col.get(row).ok_or(fmt::Error)?;
                text.push(format!("{v:.precision$}"));
            }
            let width = text
                .iter()
                .map(String::len)
                .chain([field.name.len()])
                .max()
                .unwrap_or(0);
            widths.push(width);
            cells.push(text);
        }

        let fields = self.schema().fields();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            pad(f, &field.name, widths[i], field.dtype)?;
        }
        f.write_str("\n")?;
        for row in 0..self.row_count() {
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    f.write_str("  ")?;
                }
                pad(f, &cells[i][row], widths[i], field.dtype)?;
            }
            f.write_str("\n")?;
        }
        write!(f, "[{} rows x {} columns]", self.row_count(), fields.len())
    }
}

fn pad(f: &mut fmt::Formatter<'_>, text: &str, width: usize, dtype: DataType) -> fmt::Result {
    if dtype == DataType::Label {
        write!(f, "{text:<width$}")
    } else {
        write!(f, "{text:>width$}")
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use std::string::ToString;

    use crate::{Column, Table};

    #[test]
    fn renders_aligned_grid_with_footer() {
        let t = Table::new(vec![
            ("continent", Column::from(vec!["Asia", "Europe"])),
            ("mean_pop", Column::from(vec![1.5, 12.0])),
        ])
        .unwrap();
        let text = std::format!("{t:.1}");
        let lines: std::vec::Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "continent  mean_pop");
        assert_eq!(lines[1], "Asia            1.5");
        assert_eq!(lines[2], "Europe         12.0");
        assert_eq!(lines[3], "[2 rows x 2 columns]");
    }

    #[test]
    fn empty_table_renders_header_only() {
        let t = Table::new(vec![("year", Column::from(std::vec::Vec::<i64>::new()))]).unwrap();
        assert_eq!(t.to_string(), "year\n[0 rows x 1 columns]");
    }
}
