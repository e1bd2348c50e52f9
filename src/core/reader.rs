use crate::domain::model::{ProductTable, Row, AMOUNT_COLUMN, NAME_COLUMN};
use crate::utils::error::Result;

/// Parses a CSV with a header row. Fields are kept exactly as written.
pub fn parse_table(data: &[u8]) -> Result<ProductTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    for required in [NAME_COLUMN, AMOUNT_COLUMN] {
        if !columns.iter().any(|c| c == required) {
            tracing::warn!(
                "⚠️ Input header has no '{}' column; every row will be skipped",
                required
            );
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Short records leave trailing columns absent; surplus fields are dropped.
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ProductTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_column_order_and_raw_values() {
        let input = b"name,amount_usd,customer_id,order_number\n\
Product A,15.99,cust_123,ORD-001\n\
Service B, 50.00 ,cust_456,ORD-002\n";

        let table = parse_table(input).unwrap();

        assert_eq!(
            table.columns,
            vec!["name", "amount_usd", "customer_id", "order_number"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("order_number"), Some("ORD-001"));
        assert_eq!(table.rows[1].get("amount_usd"), Some(" 50.00 "));

        let keys: Vec<&str> = table.rows[1].fields.keys().map(String::as_str).collect();
        assert_eq!(keys, table.columns);
    }

    #[test]
    fn test_short_rows_miss_trailing_columns() {
        let input = b"name,amount_usd,note\nWidget\n";

        let table = parse_table(input).unwrap();

        assert_eq!(table.rows[0].get("name"), Some("Widget"));
        assert_eq!(table.rows[0].get("amount_usd"), None);
        assert_eq!(table.rows[0].get("note"), None);
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let input = b"name,amount_usd\n\"Widget, large\",9.99\n";

        let table = parse_table(input).unwrap();

        assert_eq!(table.rows[0].get("name"), Some("Widget, large"));
    }

    #[test]
    fn test_header_only_input_has_no_rows() {
        let table = parse_table(b"name,amount_usd\n").unwrap();

        assert_eq!(table.columns.len(), 2);
        assert!(table.rows.is_empty());
    }
}
