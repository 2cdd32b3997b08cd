//! Case registry: every generated case, grouped by function

use crate::boundary::{boundary_cases, BoundaryCase};
use crate::case::TestCase;
use crate::column_type::ColumnType;
use crate::function::{DateFunction, OffsetForm};
use crate::literal::{IntervalUnit, Literal};
use std::collections::BTreeMap;

/// Immutable mapping from function to its generated cases.
///
/// Built once from the boundary combinator; nothing is registered after
/// construction. Within a function, cases keep generation order (column type,
/// then magnitude level, then combination, then interval unit).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseRegistry {
    cases: BTreeMap<DateFunction, Vec<TestCase>>,
}

impl CaseRegistry {
    /// Build cases for every function and column type.
    pub fn build() -> Self {
        Self::build_filtered(&DateFunction::ALL, &ColumnType::ALL)
    }

    /// Build cases for a subset of functions and column types.
    ///
    /// Filters only select what is generated; they never change the cases
    /// produced for a selected `(function, column type)` pair.
    pub fn build_filtered(functions: &[DateFunction], column_types: &[ColumnType]) -> Self {
        let mut cases: BTreeMap<DateFunction, Vec<TestCase>> = BTreeMap::new();
        let functions: Vec<DateFunction> = DateFunction::ALL
            .into_iter()
            .filter(|f| functions.contains(f))
            .collect();

        for column_type in ColumnType::ALL
            .into_iter()
            .filter(|t| column_types.contains(t))
        {
            for boundary in boundary_cases(column_type) {
                for &function in &functions {
                    cases
                        .entry(function)
                        .or_default()
                        .extend(expand(function, column_type, &boundary));
                }
            }
        }

        let registry = Self { cases };
        log::debug!(
            "Generated {} cases across {} functions",
            registry.len(),
            registry.cases.len()
        );
        registry
    }

    /// Cases generated for `function` (empty if it was filtered out).
    pub fn get(&self, function: DateFunction) -> &[TestCase] {
        self.cases.get(&function).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Functions that have at least one case.
    pub fn functions(&self) -> impl Iterator<Item = DateFunction> + '_ {
        self.cases.keys().copied()
    }

    /// All cases, grouped by function.
    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.values().flatten()
    }

    /// Total number of cases.
    pub fn len(&self) -> usize {
        self.cases.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turn one boundary triple into the test cases of `function`.
fn expand(function: DateFunction, column_type: ColumnType, boundary: &BoundaryCase) -> Vec<TestCase> {
    let offset = boundary.offset * function.offset_sign();
    let case = |argument: Literal| {
        TestCase::new(
            function,
            column_type,
            Literal::instant(boundary.instant, column_type),
            vec![Literal::Column, argument],
            boundary.expected_valid,
        )
    };

    match function.offset_form() {
        OffsetForm::Interval => IntervalUnit::ALL
            .into_iter()
            .map(|unit| case(Literal::interval(offset, unit)))
            .collect(),
        OffsetForm::CompositeDuration => vec![case(Literal::composite_duration(offset))],
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
