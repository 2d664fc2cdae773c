//! A lexical check that a piece of SQL holds a single statement.
//!
//! Quoted strings, quoted identifiers and comments are skipped so that a
//! semicolon inside them does not count. Trailing semicolons and whitespace
//! are allowed.

use crate::error::StoreError;

/// How string literals are escaped by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Backslash escapes inside quotes, `#` line comments.
    MySql,
    /// Only doubled quotes escape. `[brackets]` quote identifiers.
    Sqlite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    /// Inside a quoted run that ends at the given character.
    Quoted(char),
    LineComment,
    BlockComment,
}

pub fn ensure_single_statement(sql: &str, dialect: Dialect) -> Result<(), StoreError> {
    let mut state = State::Code;
    let mut terminated = false;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '\'' | '"' | '`' => {
                    if terminated {
                        return Err(StoreError::MultipleStatements);
                    }
                    state = State::Quoted(c);
                }
                '[' if dialect == Dialect::Sqlite => {
                    if terminated {
                        return Err(StoreError::MultipleStatements);
                    }
                    state = State::Quoted(']');
                }
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = State::LineComment;
                }
                '#' if dialect == Dialect::MySql => state = State::LineComment,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                ';' => terminated = true,
                c if c.is_whitespace() => {}
                _ if terminated => return Err(StoreError::MultipleStatements),
                _ => {}
            },
            State::Quoted(quote) => {
                if c == '\\' && dialect == Dialect::MySql && quote != '`' {
                    chars.next();
                } else if c == quote {
                    // a doubled quote re-enters the literal on the next pass
                    state = State::Code;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(sql: &str) -> Result<(), StoreError> {
        ensure_single_statement(sql, Dialect::MySql)
    }

    #[test]
    fn plain_statement_passes() {
        assert_eq!(check("SELECT * FROM materials LIMIT 10"), Ok(()));
    }

    #[test]
    fn trailing_semicolons_and_comments_pass() {
        assert_eq!(check("SELECT 1;;  -- done\n"), Ok(()));
        assert_eq!(check("SELECT 1; /* trailing */"), Ok(()));
    }

    #[test]
    fn second_statement_is_rejected() {
        assert_eq!(
            check("SELECT 1; DELETE FROM materials"),
            Err(StoreError::MultipleStatements)
        );
    }

    #[test]
    fn semicolons_inside_literals_do_not_count() {
        assert_eq!(
            check("SELECT formula FROM materials WHERE formula = 'a;b' AND `odd;col` = \"x;y\""),
            Ok(())
        );
        assert_eq!(check("SELECT 'it''s; fine'"), Ok(()));
        assert_eq!(check(r"SELECT 'back\'slash; fine'"), Ok(()));
    }

    #[test]
    fn backslash_is_literal_in_sqlite() {
        assert_eq!(
            ensure_single_statement(r"SELECT 'a\'; DROP TABLE materials; --'", Dialect::Sqlite),
            Err(StoreError::MultipleStatements)
        );
    }

    #[test]
    fn brackets_quote_identifiers_in_sqlite() {
        assert_eq!(
            ensure_single_statement("SELECT 1 AS [x'] ; DROP TABLE materials; --'", Dialect::Sqlite),
            Err(StoreError::MultipleStatements)
        );
        assert_eq!(
            ensure_single_statement("SELECT band_gap AS [gap; eV] FROM materials;", Dialect::Sqlite),
            Ok(())
        );
    }

    #[test]
    fn backslash_is_literal_inside_mysql_backticks() {
        assert_eq!(
            check(r"SELECT 1 AS `x\`; DROP TABLE materials; -- `"),
            Err(StoreError::MultipleStatements)
        );
    }

    #[test]
    fn hash_starts_a_comment_only_in_mysql() {
        assert_eq!(check("SELECT 1; # ; DROP TABLE materials"), Ok(()));
        assert_eq!(
            ensure_single_statement("SELECT 1; # DROP", Dialect::Sqlite),
            Err(StoreError::MultipleStatements)
        );
    }
}
