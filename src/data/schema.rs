use serde::{Deserialize, Serialize};

use super::model::Table;
use crate::error::{RegressionError, Result};

/// Rows examined per column when classifying it.
pub const DEFAULT_SAMPLE_ROWS: usize = 30;

/// Numeric hits that always suffice, however long the table is.
pub const DEFAULT_MIN_NUMERIC_HITS: usize = 10;

// ---------------------------------------------------------------------------
// NumericParse – how a cell is read as a number
// ---------------------------------------------------------------------------

/// Parsing mode for numeric cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericParse {
    /// Take the longest numeric prefix: `"12kg"` reads as `12.0`,
    /// `"  -3.5e2 units"` as `-350.0`, `"10EUR"` as `10.0`. Leading
    /// whitespace is skipped. The only special spelling is `Infinity`
    /// (optionally signed); `inf`, `infinity` and `NaN` read as nothing.
    #[default]
    Lenient,
    /// The whole trimmed cell must be a number, in Rust's float syntax
    /// (which includes `inf` and `NaN`).
    Strict,
}

impl NumericParse {
    /// Parse `cell`, returning `None` when no number can be read.
    ///
    /// Under `Strict` the result may be NaN or infinite; callers decide
    /// what counts.
    pub fn parse(self, cell: &str) -> Option<f64> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }
        match self {
            NumericParse::Lenient => parse_lenient(cell),
            NumericParse::Strict => cell.parse::<f64>().ok(),
        }
    }
}

fn parse_lenient(cell: &str) -> Option<f64> {
    let (negative, body) = match cell.as_bytes().first() {
        Some(b'-') => (true, &cell[1..]),
        Some(b'+') => (false, &cell[1..]),
        _ => (false, cell),
    };
    if body.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    parse_prefix(cell.as_bytes()).filter(|v| v.is_finite())
}

/// Longest numeric prefix of `bytes`.
fn parse_prefix(bytes: &[u8]) -> Option<f64> {
    match lexical_core::parse_partial::<f64>(bytes) {
        Ok((value, consumed)) => (consumed > 0).then_some(value),
        Err(_) => {
            // a dangling exponent marker ("5e", "1.5e+", "10EUR") ends the number
            let marker = bytes.iter().position(|b| matches!(b, b'e' | b'E'))?;
            if marker == 0 {
                return None;
            }
            parse_prefix(&bytes[..marker])
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric column detection
// ---------------------------------------------------------------------------

/// Settings for [`detect_numeric_columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub sample_rows: usize,
    pub min_numeric_hits: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            min_numeric_hits: DEFAULT_MIN_NUMERIC_HITS,
        }
    }
}

/// Names of the columns that look numeric, in header order.
///
/// Only the first `sample_rows` rows are inspected. A non-empty cell that
/// parses to a non-NaN number is one hit. A column qualifies when its hits
/// reach `min(min_numeric_hits, total_rows / 2)`, so small tables need about
/// half their rows numeric while large ones need only the fixed cap.
pub fn detect_numeric_columns(
    table: &Table,
    mode: NumericParse,
    config: &SchemaConfig,
) -> Vec<String> {
    let threshold = config.min_numeric_hits.min(table.len() / 2);

    table
        .columns()
        .filter(|column| {
            let hits = column
                .values
                .iter()
                .take(config.sample_rows)
                .filter_map(|cell| mode.parse(cell))
                .filter(|v| !v.is_nan())
                .count();
            log::trace!("column '{}': {hits} numeric hits", column.name);
            hits >= threshold
        })
        .map(|column| column.name.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// The input (X) and target (Y) column names for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSelection {
    pub x: String,
    pub y: String,
}

/// Pick X and Y from the numeric columns: the first one is X, the last one
/// is Y. With exactly two that is simply (first, second).
pub fn select_columns(numeric: &[String]) -> Result<ColumnSelection> {
    match numeric {
        [x, .., y] => Ok(ColumnSelection {
            x: x.clone(),
            y: y.clone(),
        }),
        _ => Err(RegressionError::TooFewNumericColumns {
            found: numeric.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lenient_reads_numeric_prefix() {
        let p = NumericParse::Lenient;
        assert_eq!(p.parse("12kg"), Some(12.0));
        assert_eq!(p.parse("3.5 hours"), Some(3.5));
        assert_eq!(p.parse("  7"), Some(7.0));
        assert_eq!(p.parse("-2e3x"), Some(-2000.0));
        assert_eq!(p.parse("5e"), Some(5.0));
        assert_eq!(p.parse("3em"), Some(3.0));
        assert_eq!(p.parse("10EUR"), Some(10.0));
        assert_eq!(p.parse("12.50EUR"), Some(12.5));
        assert_eq!(p.parse("1.5e+"), Some(1.5));
        assert_eq!(p.parse("2e-x"), Some(2.0));
        assert_eq!(p.parse("e5"), None);
        assert_eq!(p.parse("abc"), None);
        assert_eq!(p.parse(""), None);
        assert_eq!(p.parse("   "), None);
    }

    #[test]
    fn lenient_special_spellings() {
        let p = NumericParse::Lenient;
        assert_eq!(p.parse("Infinity"), Some(f64::INFINITY));
        assert_eq!(p.parse("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(p.parse("+Infinity and beyond"), Some(f64::INFINITY));
        assert_eq!(p.parse("inf"), None);
        assert_eq!(p.parse("infinity"), None);
        assert_eq!(p.parse("-inf"), None);
        assert_eq!(p.parse("NaN"), None);
        assert_eq!(p.parse("nan"), None);
    }

    #[test]
    fn inf_spelling_is_not_numeric_evidence() {
        let table = parse_csv("a,b\ninf,1\ninf,2\ninf,3\ninf,4").unwrap();
        let numeric = detect_numeric_columns(&table, NumericParse::Lenient, &SchemaConfig::default());
        assert_eq!(numeric, names(&["b"]));
    }

    #[test]
    fn currency_suffix_counts_as_numeric() {
        let table = parse_csv("hours,price\n1,10EUR\n2,12.50EUR\n3,14EUR\n4,16EUR").unwrap();
        let numeric = detect_numeric_columns(&table, NumericParse::Lenient, &SchemaConfig::default());
        assert_eq!(numeric, names(&["hours", "price"]));
    }

    #[test]
    fn strict_requires_whole_cell() {
        let p = NumericParse::Strict;
        assert_eq!(p.parse("12kg"), None);
        assert_eq!(p.parse(" 12.5 "), Some(12.5));
        assert_eq!(p.parse("-4"), Some(-4.0));
        assert_eq!(p.parse("abc"), None);
    }

    #[test]
    fn detects_numeric_columns_in_header_order() {
        let table = parse_csv("name,b,a\nx,1,2\ny,3,4\nz,5,6\nw,7,8").unwrap();
        let numeric = detect_numeric_columns(&table, NumericParse::Lenient, &SchemaConfig::default());
        assert_eq!(numeric, names(&["b", "a"]));
    }

    #[test]
    fn half_numeric_small_table_qualifies() {
        // 4 rows -> threshold min(10, 2) = 2
        let table = parse_csv("a,b\n1,x\n2,y\nq,3\nr,z").unwrap();
        let numeric = detect_numeric_columns(&table, NumericParse::Lenient, &SchemaConfig::default());
        assert_eq!(numeric, names(&["a"]));
    }

    #[test]
    fn large_table_needs_only_the_cap() {
        // 100 rows: the first 10 numeric, the rest text, so the cap of 10 is met
        let mut text = String::from("v,w\n");
        for i in 0..100 {
            if i < 10 {
                text.push_str(&format!("{i},t\n"));
            } else {
                text.push_str("t,t\n");
            }
        }
        let table = parse_csv(&text).unwrap();
        let numeric = detect_numeric_columns(&table, NumericParse::Lenient, &SchemaConfig::default());
        assert_eq!(numeric, names(&["v"]));
    }

    #[test]
    fn hits_beyond_the_sample_window_do_not_count() {
        // 60 rows: first 30 are text, the rest numeric; threshold is 10
        let mut text = String::from("v,w\n");
        for i in 0..60 {
            if i < 30 {
                text.push_str("t,1\n");
            } else {
                text.push_str(&format!("{i},1\n"));
            }
        }
        let table = parse_csv(&text).unwrap();
        let numeric = detect_numeric_columns(&table, NumericParse::Lenient, &SchemaConfig::default());
        assert_eq!(numeric, names(&["w"]));
    }

    #[test]
    fn strict_mode_rejects_suffixed_values() {
        let table = parse_csv("a,b\n1kg,1\n2kg,2\n3kg,3\n4kg,4").unwrap();
        let lenient = detect_numeric_columns(&table, NumericParse::Lenient, &SchemaConfig::default());
        let strict = detect_numeric_columns(&table, NumericParse::Strict, &SchemaConfig::default());
        assert_eq!(lenient, names(&["a", "b"]));
        assert_eq!(strict, names(&["b"]));
    }

    #[test]
    fn selection_with_two_columns() {
        let sel = select_columns(&names(&["A", "B"])).unwrap();
        assert_eq!(sel.x, "A");
        assert_eq!(sel.y, "B");
    }

    #[test]
    fn selection_with_many_columns_takes_first_and_last() {
        let sel = select_columns(&names(&["A", "B", "C"])).unwrap();
        assert_eq!(sel.x, "A");
        assert_eq!(sel.y, "C");
    }

    #[test]
    fn selection_with_fewer_than_two_fails() {
        for cols in [names(&[]), names(&["A"])] {
            let err = select_columns(&cols).unwrap_err();
            assert!(matches!(
                err,
                RegressionError::TooFewNumericColumns { found } if found == cols.len()
            ));
        }
    }
}
