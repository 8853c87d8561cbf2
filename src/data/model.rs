use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Row – one data line of the CSV
// ---------------------------------------------------------------------------

/// A single data row: column name → raw (trimmed) cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub values: BTreeMap<String, String>,
}

impl Row {
    /// Raw cell for `column`; absent columns read as the empty string.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Column – a view over one header across all rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    pub name: &'a str,
    pub values: Vec<&'a str>,
}

// ---------------------------------------------------------------------------
// Table – the complete parsed CSV
// ---------------------------------------------------------------------------

/// Parsed CSV: ordered header plus rows keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column view in row order, or `None` if the header has no such name.
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        let name = self.headers.iter().find(|h| *h == name)?;
        Some(Column {
            name,
            values: self.rows.iter().map(|r| r.get(name)).collect(),
        })
    }

    /// All columns in header order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> {
        self.headers.iter().filter_map(move |h| self.column(h))
    }
}

// ---------------------------------------------------------------------------
// Sample – the cleaned numeric pairs used for fitting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Ordered `(x, y)` pairs. Built by the sample builder with finite values
/// only; normalized copies may hold non-finite values under the propagate
/// policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub points: Vec<Point>,
}

impl Sample {
    pub fn new(points: Vec<Point>) -> Self {
        Sample { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

impl FromIterator<Point> for Sample {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Sample::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut a = Row::default();
        a.values.insert("x".into(), "1".into());
        a.values.insert("y".into(), "2".into());
        let mut b = Row::default();
        b.values.insert("x".into(), "3".into());
        Table {
            headers: vec!["x".into(), "y".into()],
            rows: vec![a, b],
        }
    }

    #[test]
    fn missing_cell_reads_empty() {
        let t = table();
        assert_eq!(t.rows[1].get("y"), "");
        assert_eq!(t.rows[1].get("nope"), "");
    }

    #[test]
    fn column_view_keeps_row_order() {
        let t = table();
        let col = t.column("x").unwrap();
        assert_eq!(col.values, vec!["1", "3"]);
        assert!(t.column("z").is_none());
        assert_eq!(t.columns().count(), 2);
    }
}
