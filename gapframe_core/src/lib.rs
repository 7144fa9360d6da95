// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed in-memory tables for split-apply-combine work.
//!
//! This crate provides:
//! - [`Value`] and [`DataType`] for cells (labels, integers, floats),
//! - [`Schema`] / [`Field`] for named, typed columns, and
//! - [`Table`], a columnar table that is replaced rather than mutated by transforms.
//!
//! Cell access is explicitly typed: reading a label as a number, or writing a label into a
//! numeric column, fails with [`TableError::TypeMismatch`] instead of coercing.

#![no_std]

extern crate alloc;

mod error;
mod render;
mod schema;
mod table;
mod value;

pub use error::TableError;
pub use schema::{Field, Schema};
pub use table::{Column, Record, Table, TableBuilder};
pub use value::{DataType, Value};
