use crate::data::model::{ColumnType, RecordTable, Value};

/// Pearson correlations between the numeric columns of a table. `None`
/// marks a pair without enough overlapping data or with a constant side.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub data: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.data[i][j]
    }

    /// Every column with its correlation to `target`, strongest positive
    /// first. Undefined correlations go last; ties keep column order.
    /// `None` when `target` is not a numeric column.
    pub fn ranking(&self, target: &str) -> Option<Vec<(String, Option<f64>)>> {
        if !self.columns.iter().any(|c| c == target) {
            return None;
        }
        let mut ranked: Vec<(String, Option<f64>)> = self
            .columns
            .iter()
            .map(|name| (name.clone(), self.get(target, name)))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| match (a, b) {
            (Some(a), Some(b)) => b.total_cmp(a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Some(ranked)
    }
}

/// Columns declared `Integer` or `Float`, whatever cells they still hold.
pub fn numeric_columns(table: &RecordTable) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|name| table.column_type(name).is_some_and(ColumnType::is_numeric))
        .cloned()
        .collect()
}

/// Correlation matrix over [`numeric_columns`], using pairwise-complete rows.
pub fn correlation_matrix(table: &RecordTable) -> CorrelationMatrix {
    let columns = numeric_columns(table);
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| table.column(name).map(Value::as_f64).collect())
        .collect();

    let data = (0..columns.len())
        .map(|i| {
            (0..columns.len())
                .map(|j| {
                    if i == j {
                        pearson(&series[i], &series[j]).map(|_| 1.0)
                    } else {
                        pearson(&series[i], &series[j])
                    }
                })
                .collect()
        })
        .collect();

    CorrelationMatrix { columns, data }
}

/// Pearson's r over positions where both sides are present.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
