// Copyright 2025 the gapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Split-apply-combine walkthrough over a Gapminder sample.
//!
//! Usage: `gapframe_demo [path/to/gapminder.csv]`. Without a path the bundled sample is used.
//! Set `RUST_LOG=debug` to see per-transform events.

mod load;

use std::path::PathBuf;

use anyhow::{Context, Result};
use gapframe_core::{Table, Value};
use gapframe_transforms::{
    AggregateField, AggregateOp, ExecutionError, Expr, Predicate, Program, SortKey, TableId,
    Transform, aggregate, distinct, filter, head, mutate, sort, split,
};
use hashbrown::HashMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const GAPMINDER: TableId = TableId(0);
const RECENT_ASIA: TableId = TableId(1);
const WITH_GDP: TableId = TableId(2);
const BY_COUNTRY: TableId = TableId(3);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let schema = load::gapminder_schema()?;
    let gapminder = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load::read_path(&path, &schema)
            .with_context(|| format!("loading {}", path.display()))?,
        None => load::read_table(load::BUNDLED_GAPMINDER.as_bytes(), &schema)
            .context("loading bundled sample")?,
    };
    info!(
        rows = gapminder.row_count(),
        columns = gapminder.schema().len(),
        "loaded gapminder"
    );

    show("First rows", &head(&gapminder, 6));
    show("Continents", &distinct(&gapminder, &["continent"])?);

    // Filter, select, sort.
    let recent_asia = filter(
        &gapminder,
        &Predicate::gt("year", 1975_i64).and(Predicate::equals("continent", "Asia")),
    )?;
    show(
        "Asia after 1975 (country, year, lifeExp)",
        &recent_asia.select(&["country", "year", "lifeExp"])?,
    );
    let sorted = sort(&gapminder, &[SortKey::asc("year"), SortKey::desc("gdpPercap")])?;
    show("Richest per year first", &head(&sorted, 8));

    // Derive a column, then aggregate in two stages.
    let gdp = Expr::col("pop") * Expr::col("gdpPercap");
    let with_gdp = mutate(&gapminder, "gdp", &gdp)?;
    let by_continent_year = aggregate(
        &with_gdp,
        &["continent", "year"],
        &[
            AggregateField::mean("lifeExp", "mean_lifeExp"),
            AggregateField::mean("gdp", "mean_gdp"),
            AggregateField::count("countries"),
        ],
    )?;
    show("Mean by continent and year", &by_continent_year);
    let by_continent = aggregate(
        &by_continent_year,
        &["continent"],
        &[
            AggregateField::mean("mean_lifeExp", "mean_lifeExp"),
            AggregateField::new(AggregateOp::Max, "mean_gdp", "peak_mean_gdp"),
        ],
    )?;
    show("Re-aggregated by continent", &by_continent);

    // The same partition, one group at a time.
    for (key, group) in split(&gapminder, &["continent"])? {
        let Some(continent) = key.first() else {
            continue;
        };
        let stats = aggregate(
            &group,
            &["continent"],
            &[AggregateField::new(AggregateOp::Min, "lifeExp", "min_lifeExp")],
        )?;
        println!(
            "{continent}: {} rows, lowest lifeExp {:.1}",
            group.row_count(),
            stats.float(0, "min_lifeExp")?
        );
    }
    println!();

    // A chain expressed as a program.
    let program = Program::new()
        .then(Transform::Filter {
            input: GAPMINDER,
            output: RECENT_ASIA,
            predicate: Predicate::gt("year", 1975_i64).and(Predicate::equals("continent", "Asia")),
        })
        .then(Transform::Mutate {
            input: RECENT_ASIA,
            output: WITH_GDP,
            name: "gdp".into(),
            expr: gdp,
        })
        .then(Transform::Aggregate {
            input: WITH_GDP,
            output: BY_COUNTRY,
            group_by: vec!["country".into()],
            fields: vec![AggregateField::mean("gdp", "mean_gdp")],
        });
    let mut inputs = HashMap::new();
    inputs.insert(GAPMINDER, gapminder.clone());
    let out = program.execute(&inputs)?;
    let by_country = out
        .get(BY_COUNTRY)
        .ok_or(ExecutionError::MissingInput(BY_COUNTRY))?;
    show("Program: mean GDP of Asian countries after 1975", by_country);

    // Single-cell updates are typed.
    let renamed = gapminder.with_cell(0, "country", Value::from("Afghanistan (edited)"))?;
    show("After a single-cell update", &head(&renamed, 2));
    let mut scratch = gapminder;
    if let Err(err) = scratch.set_cell(0, "year", Value::from("1952")) {
        warn!(%err, "rejected label written into an integer column");
    }

    Ok(())
}

fn show(title: &str, table: &Table) {
    println!("== {title}");
    println!("{table:.2}");
    println!();
}
