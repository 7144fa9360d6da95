// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric row expressions for derived columns and aggregate inputs.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops;

use gapframe_core::{Column, DataType, Table, TableError};

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOp {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

/// A numeric expression evaluated once per row.
///
/// Integer columns are widened to `f64`. Label columns are rejected when the expression is bound
/// to a table.
///
/// ```
/// use gapframe_transforms::Expr;
///
/// let gdp = Expr::col("pop") * Expr::col("gdpPercap");
/// assert_eq!(gdp.columns(), ["pop", "gdpPercap"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Read a column.
    Col(String),
    /// A constant.
    Lit(f64),
    /// `lhs op rhs`.
    Binary(BinaryOp, Box<Self>, Box<Self>),
}

impl Expr {
    /// Column reference.
    pub fn col(name: impl Into<String>) -> Self {
        Self::Col(name.into())
    }

    /// Constant.
    pub fn lit(value: f64) -> Self {
        Self::Lit(value)
    }

    /// Every column name the expression reads, in evaluation order.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Col(name) => out.push(name),
            Self::Lit(_) => {}
            Self::Binary(_, lhs, rhs) => {
                lhs.collect_columns(out);
                rhs.collect_columns(out);
            }
        }
    }

    /// Resolves column references against `table`.
    pub(crate) fn bind<'t>(&self, table: &'t Table) -> Result<BoundExpr<'t>, TableError> {
        Ok(match self {
            Self::Col(name) => {
                let col = table.column(name)?;
                if col.dtype() == DataType::Label {
                    return Err(TableError::TypeMismatch {
                        field: name.clone(),
                        expected: DataType::Float,
                        found: DataType::Label,
                    });
                }
                BoundExpr::Col(col)
            }
            Self::Lit(v) => BoundExpr::Lit(*v),
            Self::Binary(op, lhs, rhs) => BoundExpr::Binary(
                *op,
                Box::new(lhs.bind(table)?),
                Box::new(rhs.bind(table)?),
            ),
        })
    }
}

/// An [`Expr`] with columns resolved against one table.
#[derive(Debug)]
pub(crate) enum BoundExpr<'t> {
    Col(&'t Column),
    Lit(f64),
    Binary(BinaryOp, Box<Self>, Box<Self>),
}

impl BoundExpr<'_> {
    /// Evaluates the expression for `row`, which must be in range.
    pub(crate) fn eval(&self, row: usize) -> f64 {
        match self {
            // Bound columns are numeric, so `f64` only misses on out-of-range rows.
            Self::Col(col) => col.f64(row).unwrap_or(f64::NAN),
            Self::Lit(v) => *v,
            Self::Binary(op, lhs, rhs) => op.apply(lhs.eval(row), rhs.eval(row)),
        }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::col(value)
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Col(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Lit(value)
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $op:ident) => {
        impl ops::$trait for Expr {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self::Binary(BinaryOp::$op, Box::new(self), Box::new(rhs))
            }
        }
    };
}

binary_op!(Add, add, Add);
binary_op!(Sub, sub, Sub);
binary_op!(Mul, mul, Mul);
binary_op!(Div, div, Div);
