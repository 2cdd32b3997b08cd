//! Generated test cases and the statements that exercise them

use crate::column_type::ColumnType;
use crate::function::DateFunction;
use crate::literal::Literal;
use serde::Serialize;
use std::fmt;

/// Name of the single column every case table carries.
pub const COLUMN_NAME: &str = "c";

/// One executable case: apply `function` to a stored value and check whether
/// the update succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TestCase {
    /// Function under test
    pub function: DateFunction,

    /// Type of the column holding the initial value
    pub column_type: ColumnType,

    /// Value inserted before the update
    pub initial_value: Literal,

    /// Arguments passed to the function, in order
    pub arguments: Vec<Literal>,

    /// Whether the update is expected to succeed
    pub expected_valid: bool,
}

impl TestCase {
    pub fn new(
        function: DateFunction,
        column_type: ColumnType,
        initial_value: Literal,
        arguments: Vec<Literal>,
        expected_valid: bool,
    ) -> Self {
        Self {
            function,
            column_type,
            initial_value,
            arguments,
            expected_valid,
        }
    }

    /// Render the create/insert/update statements for `table`.
    pub fn statements(&self, table: &str) -> CaseStatements {
        let arguments = self
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        CaseStatements {
            create: format!(
                "CREATE TABLE {table}({COLUMN_NAME} {});",
                self.column_type.sql_name()
            ),
            insert: format!("INSERT INTO {table} VALUES({});", self.initial_value),
            update: format!(
                "UPDATE {table} SET {COLUMN_NAME} = {}({arguments});",
                self.function.name()
            ),
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arguments = self
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{}({}) on {} {} expecting {}",
            self.function,
            arguments,
            self.column_type,
            self.initial_value,
            if self.expected_valid { "success" } else { "error" }
        )
    }
}

/// The three statements a case runs, kept together for reproduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseStatements {
    pub create: String,
    pub insert: String,
    pub update: String,
}

impl CaseStatements {
    /// Statements in execution order.
    pub fn as_array(&self) -> [&str; 3] {
        [self.create.as_str(), self.insert.as_str(), self.update.as_str()]
    }
}

impl fmt::Display for CaseStatements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_array().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::IntervalUnit;
    use chrono::{Duration, NaiveDate};

    fn sample() -> TestCase {
        let at = NaiveDate::from_ymd_opt(2038, 1, 18)
            .unwrap()
            .and_hms_opt(3, 14, 7)
            .unwrap();
        TestCase::new(
            DateFunction::AddDate,
            ColumnType::Timestamp,
            Literal::instant(at, ColumnType::Timestamp),
            vec![
                Literal::Column,
                Literal::interval(Duration::days(3), IntervalUnit::Days),
            ],
            false,
        )
    }

    #[test]
    fn test_statements_exact_text() {
        let stmts = sample().statements("t");
        assert_eq!(stmts.create, "CREATE TABLE t(c timestamp);");
        assert_eq!(stmts.insert, "INSERT INTO t VALUES('2038-01-18 03:14:07');");
        assert_eq!(stmts.update, "UPDATE t SET c = ADDDATE(c,INTERVAL 3 DAY);");
    }

    #[test]
    fn test_statements_use_table_name() {
        let stmts = sample().statements("bounds");
        assert!(stmts.as_array().iter().all(|s| s.contains("bounds")));
    }

    #[test]
    fn test_statements_display_is_reproducible() {
        let text = sample().statements("t").to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("CREATE TABLE"));
        assert!(text.ends_with("INTERVAL 3 DAY);"));
    }

    #[test]
    fn test_display_describes_case() {
        let text = sample().to_string();
        assert!(text.contains("ADDDATE(c, INTERVAL 3 DAY)"));
        assert!(text.contains("expecting error"));
    }
}
