//! The read-only gate applied to caller-supplied SQL.
//!
//! This is a prefix check and nothing more: it keeps casual writes out, while
//! the single-statement rule in the store and a read-only database account
//! do the rest.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::QueryError;

static SELECT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*SELECT\s+").unwrap());

/// Accept the text if, once trimmed, it is non-empty and begins with
/// `SELECT` followed by whitespace. Returns the trimmed text.
pub fn check_read_only(sql: &str) -> Result<&str, QueryError> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(QueryError::BadRequest("No SQL query provided".to_string()));
    }
    if !SELECT_PREFIX.is_match(trimmed) {
        return Err(QueryError::PolicyViolation);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_in_any_case_is_accepted() {
        assert_eq!(
            check_read_only("  select * from materials  "),
            Ok("select * from materials")
        );
        assert_eq!(check_read_only("SeLeCt\n1"), Ok("SeLeCt\n1"));
    }

    #[test]
    fn blank_text_is_a_bad_request() {
        assert_eq!(
            check_read_only(" \n\t "),
            Err(QueryError::BadRequest("No SQL query provided".to_string()))
        );
    }

    #[test]
    fn writes_are_rejected() {
        assert_eq!(
            check_read_only("DELETE FROM materials"),
            Err(QueryError::PolicyViolation)
        );
        assert_eq!(
            check_read_only("UPDATE materials SET band_gap = 0"),
            Err(QueryError::PolicyViolation)
        );
    }

    #[test]
    fn select_must_be_followed_by_whitespace() {
        assert_eq!(check_read_only("SELECT*"), Err(QueryError::PolicyViolation));
        assert_eq!(check_read_only("SELECTED"), Err(QueryError::PolicyViolation));
    }

    #[test]
    fn leading_comments_are_not_skipped() {
        assert_eq!(
            check_read_only("/* hi */ SELECT 1"),
            Err(QueryError::PolicyViolation)
        );
    }

    #[test]
    fn with_clauses_are_rejected() {
        assert_eq!(
            check_read_only("WITH t AS (SELECT 1) SELECT * FROM t"),
            Err(QueryError::PolicyViolation)
        );
    }
}
