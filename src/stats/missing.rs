use crate::data::model::RecordTable;

/// Size and shape of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: Vec<String>,
}

impl DatasetOverview {
    pub fn of(table: &RecordTable) -> Self {
        Self {
            rows: table.height(),
            columns: table.columns().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMissing {
    pub column: String,
    pub count: usize,
    /// Share of all rows, 0–100.
    pub pct: f64,
}

/// Missing-value counts per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingReport {
    pub rows: usize,
    pub columns: Vec<ColumnMissing>,
}

impl MissingReport {
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.count).sum()
    }
}

/// Count `Null` cells per column. Percentages are 0 for an empty table.
pub fn missing_report(table: &RecordTable) -> MissingReport {
    let rows = table.height();
    let columns = table
        .columns()
        .iter()
        .map(|name| {
            let count = table.column(name).filter(|v| v.is_null()).count();
            let pct = if rows == 0 {
                0.0
            } else {
                count as f64 / rows as f64 * 100.0
            };
            ColumnMissing {
                column: name.clone(),
                count,
                pct,
            }
        })
        .collect();
    MissingReport { rows, columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    #[test]
    fn counts_and_percentages() {
        let table = RecordTable::new(
            vec!["Message".to_owned(), "Likes".to_owned()],
            vec![
                vec![Value::Null, Value::Integer(1)],
                vec![Value::Text("hi".to_owned()), Value::Integer(2)],
                vec![Value::Null, Value::Integer(3)],
                vec![Value::Null, Value::Null],
            ],
        );
        let report = missing_report(&table);
        assert_eq!(report.rows, 4);
        assert_eq!(report.columns[0].count, 3);
        assert!((report.columns[0].pct - 75.0).abs() < 1e-9);
        assert_eq!(report.columns[1].count, 1);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn empty_table_has_zero_percent() {
        let table = RecordTable::new(vec!["a".to_owned()], Vec::new());
        let report = missing_report(&table);
        assert_eq!(report.columns[0].count, 0);
        assert_eq!(report.columns[0].pct, 0.0);
    }
}
