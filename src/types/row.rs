/// Immutable row of string field values
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    values: Box<[String]>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values: values.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field `k`, if the row has one.
    pub fn get(&self, k: usize) -> Option<&str> {
        self.values.get(k).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl From<Vec<String>> for Row {
    fn from(values: Vec<String>) -> Self {
        Row::new(values)
    }
}

impl From<&[&str]> for Row {
    fn from(values: &[&str]) -> Self {
        Row::new(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Fields separated by single spaces, the form `print` and `select` show.
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_access() {
        let row = Row::from(&["101", "Knowles", "Jason", "F"][..]);
        assert_eq!(row.len(), 4);
        assert_eq!(row.get(1), Some("Knowles"));
        assert_eq!(row.get(4), None);
        assert_eq!(row.to_string(), "101 Knowles Jason F");
    }

    #[test]
    fn test_row_equality_is_elementwise() {
        let a = Row::from(&["1", "2"][..]);
        let b = Row::new(vec!["1".into(), "2".into()]);
        let c = Row::from(&["2", "1"][..]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
