use std::collections::BTreeMap;

use crate::data::model::{RecordTable, Value};

/// Mean of one column within one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: String,
    /// `None` when the group has no present values.
    pub mean: Option<f64>,
    pub count: usize,
}

/// Mean of `value_column` per distinct `key_column`, highest mean first.
///
/// Rows with a missing key are left out, missing values are skipped within a
/// group. Groups are formed in key order, and the descending sort is stable,
/// so equal means stay in key order. Groups without any value sort last.
pub fn grouped_mean(table: &RecordTable, key_column: &str, value_column: &str) -> Vec<GroupMean> {
    let mut groups: BTreeMap<&Value, (f64, usize)> = BTreeMap::new();

    for (key, value) in table.column(key_column).zip(table.column(value_column)) {
        if key.is_null() {
            continue;
        }
        let entry = groups.entry(key).or_insert((0.0, 0));
        if let Some(v) = value.as_f64() {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let mut means: Vec<GroupMean> = groups
        .into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key: key.to_string(),
            mean: (count > 0).then(|| sum / count as f64),
            count,
        })
        .collect();

    means.sort_by(|a, b| match (a.mean, b.mean) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    means
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<(Value, Value)>) -> RecordTable {
        RecordTable::new(
            vec!["Type".to_owned(), "Interaction Rate".to_owned()],
            rows.into_iter().map(|(k, v)| vec![k, v]).collect(),
        )
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_owned())
    }

    #[test]
    fn ties_keep_key_order() {
        let t = table(vec![
            (text("Photo"), Value::Float(0.1)),
            (text("Photo"), Value::Float(0.3)),
            (text("Video"), Value::Float(0.2)),
        ]);
        let means = grouped_mean(&t, "Type", "Interaction Rate");
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].key, "Photo");
        assert_eq!(means[0].mean, Some(0.2));
        assert_eq!(means[0].count, 2);
        assert_eq!(means[1].key, "Video");
        assert_eq!(means[1].mean, Some(0.2));
    }

    #[test]
    fn sorted_descending_and_skips_missing() {
        let t = table(vec![
            (text("Link"), Value::Float(0.01)),
            (text("Video"), Value::Float(0.5)),
            (text("Status"), Value::Null),
            (Value::Null, Value::Float(9.0)),
            (text("Link"), Value::Null),
            (text("Photo"), Value::Float(0.2)),
        ]);
        let means = grouped_mean(&t, "Type", "Interaction Rate");
        let keys: Vec<&str> = means.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Video", "Photo", "Link", "Status"]);
        assert_eq!(means[2].mean, Some(0.01));
        assert_eq!(means[2].count, 1);
        assert_eq!(means[3].mean, None);
    }
}
