use indexmap::IndexMap;

pub const NAME_COLUMN: &str = "name";
pub const AMOUNT_COLUMN: &str = "amount_usd";
pub const LINK_COLUMN: &str = "payment_link_url";

/// One input record, keyed by column name in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub fields: IndexMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Every field of the row, stringified, for attaching to remote resources.
    pub fn metadata(&self) -> Metadata {
        self.fields.clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub type Metadata = IndexMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// A row that passed validation and is ready for the remote calls.
#[derive(Debug, Clone)]
pub struct LinkRequest {
    pub line: usize,
    pub name: String,
    pub amount: f64,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub columns: Vec<String>,
    pub linked_rows: Vec<Row>,
    pub rows_read: usize,
    pub skipped_invalid: usize,
    pub failed_remote: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub links_created: usize,
    pub skipped_invalid: usize,
    pub failed_remote: usize,
    pub output_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_keeps_every_field_in_order() {
        let row: Row = [
            ("name", "Product A"),
            ("amount_usd", "15.99"),
            ("customer_id", "cust_123"),
        ]
        .into_iter()
        .collect();

        let metadata = row.metadata();
        let keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "amount_usd", "customer_id"]);
        assert_eq!(metadata["customer_id"], "cust_123");
    }
}
