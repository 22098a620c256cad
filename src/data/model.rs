use std::fmt;

use chrono::NaiveDateTime;

/// Timestamp layout used when a [`Value::DateTime`] is written out.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Value – a single cell of the record table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. `Null` is the one missing-value marker: absent
/// input and failed coercions both end up here.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

// -- Manual Eq/Ord/Hash so whole rows can be compared and hashed --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
                DateTime(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::DateTime(t) => t.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NaN"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.6}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::DateTime(t) => write!(f, "{}", t.format(DATETIME_FORMAT)),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell; `None` for text, timestamps and nulls.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `Float` for a finite number, `Null` otherwise.
    pub fn from_f64(v: f64) -> Self {
        if v.is_finite() {
            Value::Float(v)
        } else {
            Value::Null
        }
    }

    /// Text written to a delimited file: nulls become an empty field and
    /// floats keep full precision.
    pub fn to_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Float(v) => v.to_string(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – declared type of a whole column
// ---------------------------------------------------------------------------

/// Column type, fixed when the column is loaded or derived. A column keeps
/// its type when filtering leaves only `Null` cells in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    DateTime,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Narrowest type holding every present cell. Integers mixed with floats
    /// widen to `Float`, any other mix is `Text`, and a column with no
    /// present cell is `Float`.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut inferred = None;
        for cell in cells {
            let ty = match cell {
                Value::Null => continue,
                Value::Integer(_) => ColumnType::Integer,
                Value::Float(_) => ColumnType::Float,
                Value::Text(_) => ColumnType::Text,
                Value::DateTime(_) => ColumnType::DateTime,
            };
            inferred = Some(match (inferred, ty) {
                (None, ty) => ty,
                (Some(a), b) if a == b => a,
                (Some(a), b) if a.is_numeric() && b.is_numeric() => ColumnType::Float,
                _ => ColumnType::Text,
            });
        }
        inferred.unwrap_or(ColumnType::Float)
    }
}

// ---------------------------------------------------------------------------
// RecordTable – ordered columns and rows
// ---------------------------------------------------------------------------

/// In-memory table flowing between pipeline stages. Each row holds exactly
/// one cell per column, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    columns: Vec<String>,
    types: Vec<ColumnType>,
    rows: Vec<Vec<Value>>,
}

impl RecordTable {
    /// Build a table, padding short rows with `Null` and cutting long ones.
    /// Column types are inferred from the cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let mut table = Self::with_types(columns, Vec::new(), rows);
        table.types = (0..table.width())
            .map(|i| ColumnType::infer(table.rows.iter().map(|row| &row[i])))
            .collect();
        table
    }

    /// Build a table with declared column types. Columns without a declared
    /// type are `Text`.
    pub fn with_types(
        columns: Vec<String>,
        mut types: Vec<ColumnType>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        types.resize(columns.len(), ColumnType::Text);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self {
            columns,
            types,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column_index(name).map(|i| self.types[i])
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom. Empty when the column is unknown.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let idx = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    /// Cell at (`row`, `column`), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Append a column, or overwrite it in place (type included) when the
    /// name already exists. `values` must yield one cell per row; missing
    /// cells are `Null`.
    pub fn push_column(&mut self, name: &str, ty: ColumnType, values: Vec<Value>) {
        let mut values = values.into_iter();
        match self.column_index(name) {
            Some(idx) => {
                self.types[idx] = ty;
                for row in &mut self.rows {
                    row[idx] = values.next().unwrap_or(Value::Null);
                }
            }
            None => {
                self.columns.push(name.to_owned());
                self.types.push(ty);
                for row in &mut self.rows {
                    row.push(values.next().unwrap_or(Value::Null));
                }
            }
        }
    }

    /// Keep only the rows at `indices`, in that order.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            types: self.types.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Project the given columns, in the given order. Returns the names that
    /// do not exist instead of a partial table.
    pub fn select(&self, names: &[String]) -> Result<Self, Vec<String>> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(i) => indices.push(i),
                None => missing.push(name.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self {
            columns: names.to_vec(),
            types: indices.iter().map(|&i| self.types[i]).collect(),
            rows,
        })
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            types: self.types.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_owned())
    }

    fn table() -> RecordTable {
        RecordTable::new(
            vec!["a".to_owned(), "b".to_owned()],
            vec![
                vec![Value::Integer(1), Value::Text("x".to_owned())],
                vec![Value::Integer(2)],
            ],
        )
    }

    #[test]
    fn short_rows_are_padded_with_null() {
        let t = table();
        assert_eq!(t.value(1, "b"), Some(&Value::Null));
        assert_eq!(t.width(), 2);
        assert_eq!(t.height(), 2);
    }

    #[test]
    fn select_reports_all_missing_columns() {
        let names = vec!["b".to_owned(), "c".to_owned(), "d".to_owned()];
        assert_eq!(table().select(&names), Err(vec!["c".to_owned(), "d".to_owned()]));
    }

    #[test]
    fn select_reorders_columns() {
        let t = table().select(&["b".to_owned(), "a".to_owned()]).unwrap();
        assert_eq!(t.columns(), ["b", "a"]);
        assert_eq!(
            t.rows()[0],
            vec![Value::Text("x".to_owned()), Value::Integer(1)]
        );
        assert_eq!(t.column_type("b"), Some(ColumnType::Text));
        assert_eq!(t.column_type("a"), Some(ColumnType::Integer));
    }

    #[test]
    fn push_column_appends_then_overwrites() {
        let mut t = table();
        t.push_column("c", ColumnType::Float, vec![Value::Float(0.5), Value::Null]);
        assert_eq!(t.columns(), ["a", "b", "c"]);
        t.push_column("a", ColumnType::Text, vec![text("9"), text("8")]);
        assert_eq!(t.width(), 3);
        assert_eq!(t.column_type("a"), Some(ColumnType::Text));
        assert_eq!(
            t.column("a").cloned().collect::<Vec<_>>(),
            vec![text("9"), text("8")]
        );
    }

    #[test]
    fn column_type_survives_when_only_nulls_remain() {
        let t = table();
        assert_eq!(t.column_type("b"), Some(ColumnType::Text));
        let second = t.take_rows(&[1]);
        assert_eq!(second.value(0, "b"), Some(&Value::Null));
        assert_eq!(second.column_type("b"), Some(ColumnType::Text));
        assert_eq!(second.head(0).column_type("b"), Some(ColumnType::Text));
    }

    #[test]
    fn infer_widens_and_falls_back() {
        let ints = [Value::Integer(1), Value::Null];
        assert_eq!(ColumnType::infer(&ints), ColumnType::Integer);
        let mixed = [Value::Integer(1), Value::Float(0.5)];
        assert_eq!(ColumnType::infer(&mixed), ColumnType::Float);
        let text_and_number = [Value::Integer(1), text("a")];
        assert_eq!(ColumnType::infer(&text_and_number), ColumnType::Text);
        assert_eq!(ColumnType::infer(&[Value::Null]), ColumnType::Float);
    }

    #[test]
    fn floats_compare_by_total_order() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert!(Value::Null < Value::Integer(0));
        assert!(Value::Text("a".to_owned()) < Value::Text("b".to_owned()));
    }

    #[test]
    fn fields_for_export() {
        assert_eq!(Value::Null.to_field(), "");
        assert_eq!(Value::Float(0.05).to_field(), "0.05");
        assert_eq!(Value::Integer(42).to_field(), "42");
        assert_eq!(Value::from_f64(f64::INFINITY), Value::Null);
    }
}
