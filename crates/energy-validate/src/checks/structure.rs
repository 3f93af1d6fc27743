//! Structural conformance: tables, declared columns, nulls, keys and grain.

use std::collections::HashSet;

use energy_model::{StarSchema, TableName};
use polars::prelude::DataFrame;

use crate::util::keys;

pub(crate) fn check(schema: &StarSchema) -> Vec<String> {
    let mut errors = Vec::new();

    // 1. Table presence, declared columns and nulls
    for table in TableName::ALL {
        let Some(df) = schema.get(table) else {
            errors.push(format!("Missing table: {table}"));
            continue;
        };
        check_columns(table, df, &mut errors);
    }

    // 2. Referential integrity and grain uniqueness of facts
    for fact in TableName::FACTS {
        let Some(df) = schema.get(fact) else {
            continue;
        };
        check_foreign_keys(schema, fact, df, &mut errors);
        check_grain(fact, df, &mut errors);
    }

    errors
}

fn check_columns(table: TableName, df: &DataFrame, errors: &mut Vec<String>) {
    let missing: Vec<&str> = table
        .columns()
        .iter()
        .copied()
        .filter(|column| df.column(column).is_err())
        .collect();
    if !missing.is_empty() {
        errors.push(format!(
            "Table '{table}' missing columns: {}",
            missing.join(", ")
        ));
    }

    // cop_proxy is the only column allowed to be null
    let allowed_nulls = table.nullable_columns();
    for column in table.columns() {
        if allowed_nulls.contains(column) {
            continue;
        }
        let Ok(series) = df.column(column) else {
            continue;
        };
        let null_count = series.null_count();
        if null_count > 0 {
            errors.push(format!(
                "Table '{table}' has {null_count} null values in column '{column}'"
            ));
        }
    }
}

/// Non-null keys that match no row of the referenced dimension.
fn check_foreign_keys(schema: &StarSchema, fact: TableName, df: &DataFrame, errors: &mut Vec<String>) {
    for fk in fact.foreign_keys() {
        // A missing dimension is already reported as a missing table
        let Some(dimension) = schema.get(fk.references) else {
            continue;
        };
        let (Some(fact_keys), Some(dim_keys)) = (keys(df, fk.column), keys(dimension, fk.column))
        else {
            continue;
        };
        // Nulls are counted by the column check, not here
        let known: HashSet<String> = dim_keys.into_iter().flatten().collect();
        let unresolved = fact_keys
            .iter()
            .flatten()
            .filter(|key| !known.contains(*key))
            .count();
        if unresolved > 0 {
            errors.push(format!(
                "Table '{fact}' has {unresolved} rows whose {} does not resolve to {}",
                fk.column, fk.references
            ));
        }
    }
}

/// Rows repeating an earlier grain tuple. Tuples with a null key are skipped.
fn check_grain(fact: TableName, df: &DataFrame, errors: &mut Vec<String>) {
    let grain = fact.grain();
    let Some(columns) = grain
        .iter()
        .map(|column| keys(df, column))
        .collect::<Option<Vec<_>>>()
    else {
        return;
    };

    let mut seen: HashSet<Vec<&str>> = HashSet::with_capacity(df.height());
    let mut duplicates = 0usize;
    for row in 0..df.height() {
        let Some(tuple) = columns
            .iter()
            .map(|values| values[row].as_deref())
            .collect::<Option<Vec<&str>>>()
        else {
            continue;
        };
        if !seen.insert(tuple) {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        errors.push(format!(
            "Table '{fact}' has {duplicates} duplicate rows at grain ({})",
            grain.join(", ")
        ));
    }
}
