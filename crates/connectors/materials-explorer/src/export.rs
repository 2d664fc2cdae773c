//! CSV rendering of result sets.

use query_engine_execution::{ResultRow, ScalarValue};

/// Render rows as CSV. The header comes from the first row's columns, every
/// value is quoted, and nulls are empty fields. No rows means no output.
pub fn rows_to_csv(rows: &[ResultRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let headers: Vec<&String> = first.keys().collect();
    let mut csv = headers
        .iter()
        .map(|header| header_field(header))
        .collect::<Vec<_>>()
        .join(",");
    csv.push('\n');

    for row in rows {
        let line = headers
            .iter()
            .map(|header| value_field(row.get(header.as_str()).unwrap_or(&ScalarValue::Null)))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn header_field(name: &str) -> String {
    if name.contains([',', '"', '\n', '\r']) {
        quote(name)
    } else {
        name.to_string()
    }
}

fn value_field(value: &ScalarValue) -> String {
    quote(&value.to_string())
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use query_engine_execution::ResultRow;

    use super::*;

    fn row(values: &[(&str, ScalarValue)]) -> ResultRow {
        values
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn nulls_become_empty_fields_and_order_is_kept() {
        let rows = vec![
            row(&[("a", ScalarValue::Integer(1)), ("b", ScalarValue::Null)]),
            row(&[("a", ScalarValue::Integer(2)), ("b", "x".into())]),
        ];
        assert_eq!(rows_to_csv(&rows), "a,b\n\"1\",\"\"\n\"2\",\"x\"\n");
    }

    #[test]
    fn quotes_are_doubled() {
        let rows = vec![row(&[
            ("formula, pretty", "Bi2Te3 \"alpha\"".into()),
            ("band_gap", 0.611.into()),
            ("is_stable", true.into()),
        ])];
        assert_eq!(
            rows_to_csv(&rows),
            "\"formula, pretty\",band_gap,is_stable\n\"Bi2Te3 \"\"alpha\"\"\",\"0.611\",\"true\"\n"
        );
    }

    #[test]
    fn empty_results_give_empty_output() {
        assert_eq!(rows_to_csv(&[]), "");
    }
}
