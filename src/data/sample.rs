use super::model::{Point, Sample, Table};
use super::schema::{ColumnSelection, NumericParse};
use crate::error::{RegressionError, Result};

/// Pair up the selected X and Y cells of every row.
///
/// A row contributes only when both cells parse under `mode` and both values
/// are finite. Row order is preserved. An empty result is an error.
pub fn build_sample(
    table: &Table,
    selection: &ColumnSelection,
    mode: NumericParse,
) -> Result<Sample> {
    let sample: Sample = table
        .rows
        .iter()
        .filter_map(|row| {
            let x = mode.parse(row.get(&selection.x))?;
            let y = mode.parse(row.get(&selection.y))?;
            (x.is_finite() && y.is_finite()).then_some(Point { x, y })
        })
        .collect();

    let dropped = table.len() - sample.len();
    if dropped > 0 {
        log::warn!(
            "dropped {dropped} of {} rows without numeric '{}' and '{}'",
            table.len(),
            selection.x,
            selection.y
        );
    }

    if sample.is_empty() {
        return Err(RegressionError::EmptySample);
    }
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn xy() -> ColumnSelection {
        ColumnSelection {
            x: "x".into(),
            y: "y".into(),
        }
    }

    #[test]
    fn keeps_only_finite_pairs_in_row_order() {
        let table = parse_csv("x,y\n1,2\nfoo,3\n4,\n5,NaN\ninf,1\n6,7").unwrap();
        let sample = build_sample(&table, &xy(), NumericParse::Lenient).unwrap();
        assert_eq!(
            sample.points,
            vec![Point { x: 1.0, y: 2.0 }, Point { x: 6.0, y: 7.0 }]
        );
        assert!(sample.len() <= table.len());
        assert!(sample.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn lenient_mode_keeps_suffixed_cells() {
        let table = parse_csv("x,y\n1kg,2\n3,4m").unwrap();
        let lenient = build_sample(&table, &xy(), NumericParse::Lenient).unwrap();
        assert_eq!(lenient.len(), 2);
        assert_eq!(lenient.points[1], Point { x: 3.0, y: 4.0 });
        let err = build_sample(&table, &xy(), NumericParse::Strict).unwrap_err();
        assert!(matches!(err, RegressionError::EmptySample));
    }

    #[test]
    fn all_rows_dropped_is_an_error() {
        let table = parse_csv("x,y\na,b\n,\n").unwrap();
        let err = build_sample(&table, &xy(), NumericParse::Lenient).unwrap_err();
        assert!(matches!(err, RegressionError::EmptySample));
    }
}
