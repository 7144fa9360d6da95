// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Split-apply-combine table transforms.
//!
//! This crate provides:
//! - one function per operation ([`filter`], [`sort`], [`mutate`], [`aggregate`], [`split`],
//!   [`distinct`], [`head`]), each taking a [`Table`](gapframe_core::Table) and returning a new
//!   one, and
//! - a small transform IR ([`Transform`]) with a [`Program`] executor for `TableId -> TableId`
//!   chains.
//!
//! Grouping is deterministic: groups come out in the order their key first appears in the
//! input.

#![no_std]

extern crate alloc;

mod aggregate;
mod expr;
mod filter;
mod group;
mod mutate;
mod program;
mod sort;
mod transform;

pub use aggregate::aggregate;
pub use expr::{BinaryOp, Expr};
pub use filter::filter;
pub use group::{GroupKey, distinct, split};
pub use mutate::{head, mutate};
pub use program::{ExecutionError, Program, ProgramOutput};
pub use sort::sort;
pub use transform::{
    AggregateField, AggregateOp, CompareOp, Predicate, SortKey, SortOrder, TableId, Transform,
};
