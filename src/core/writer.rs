use crate::domain::model::{Row, LINK_COLUMN};
use crate::utils::error::{LinkError, Result};

/// Input columns with the link column appended once.
pub fn output_columns(input_columns: &[String]) -> Vec<String> {
    let mut columns = input_columns.to_vec();
    if !columns.iter().any(|c| c == LINK_COLUMN) {
        columns.push(LINK_COLUMN.to_string());
    }
    columns
}

pub fn render_table(columns: &[String], rows: &[Row]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| row.get(c).unwrap_or("")))?;
    }

    writer
        .into_inner()
        .map_err(|e| LinkError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_link_column_appended_exactly_once() {
        let plain = output_columns(&columns(&["name", "amount_usd"]));
        assert_eq!(plain, columns(&["name", "amount_usd", "payment_link_url"]));

        let already = output_columns(&columns(&["name", "payment_link_url", "amount_usd"]));
        assert_eq!(already, columns(&["name", "payment_link_url", "amount_usd"]));
    }

    #[test]
    fn test_render_follows_column_order() {
        let cols = columns(&["name", "amount_usd", "payment_link_url"]);
        let row: Row = [
            ("amount_usd", "9.99"),
            ("payment_link_url", "https://pay.example/abc"),
            ("name", "Widget"),
        ]
        .into_iter()
        .collect();

        let output = render_table(&cols, &[row]).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "name,amount_usd,payment_link_url\nWidget,9.99,https://pay.example/abc\n"
        );
    }

    #[test]
    fn test_render_quotes_fields_with_delimiters() {
        let cols = columns(&["name", "payment_link_url"]);
        let row: Row = [("name", "Widget, large"), ("payment_link_url", "https://x")]
            .into_iter()
            .collect();

        let output = String::from_utf8(render_table(&cols, &[row]).unwrap()).unwrap();

        assert!(output.contains("\"Widget, large\",https://x"));
    }
}
