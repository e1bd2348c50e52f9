use crate::core::link_creator::{to_minor_units, LinkCreator};
use crate::core::{reader, writer};
use crate::domain::model::{
    LinkRequest, ProductTable, Row, RunSummary, TransformResult, AMOUNT_COLUMN, LINK_COLUMN,
    NAME_COLUMN,
};
use crate::domain::ports::{ConfigProvider, PaymentGateway, Pipeline, Storage};
use crate::utils::error::{LinkError, Result};

pub fn parse_amount(raw: Option<&str>) -> Result<f64> {
    let value = raw.ok_or_else(|| LinkError::MissingField {
        field: AMOUNT_COLUMN.to_string(),
    })?;

    let amount: f64 = value.trim().parse().map_err(|_| LinkError::InvalidAmount {
        value: value.to_string(),
        reason: "not a decimal number".to_string(),
    })?;

    if !amount.is_finite() {
        return Err(LinkError::InvalidAmount {
            value: value.to_string(),
            reason: "amount must be finite".to_string(),
        });
    }
    if amount < 0.0 {
        return Err(LinkError::InvalidAmount {
            value: value.to_string(),
            reason: "amount cannot be negative".to_string(),
        });
    }

    Ok(amount)
}

/// Checks one row and turns it into a request for the link creator.
pub fn prepare_request(line: usize, row: &Row) -> Result<LinkRequest> {
    let name = row
        .get(NAME_COLUMN)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| LinkError::MissingField {
            field: NAME_COLUMN.to_string(),
        })?;
    let amount = parse_amount(row.get(AMOUNT_COLUMN))?;

    Ok(LinkRequest {
        line,
        name: name.to_string(),
        amount,
        metadata: row.metadata(),
    })
}

pub struct PaymentLinkPipeline<S: Storage, C: ConfigProvider, G: PaymentGateway> {
    storage: S,
    config: C,
    creator: LinkCreator<G>,
}

impl<S: Storage, C: ConfigProvider, G: PaymentGateway> PaymentLinkPipeline<S, C, G> {
    pub fn new(storage: S, config: C, gateway: G) -> Self {
        let creator = LinkCreator::new(gateway, config.currency());
        Self {
            storage,
            config,
            creator,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, G: PaymentGateway> Pipeline for PaymentLinkPipeline<S, C, G> {
    async fn extract(&self) -> Result<ProductTable> {
        let path = self.config.input_path();
        tracing::debug!("Reading products from {}", path);

        let data = self.storage.read_file(path).await?;
        let table = reader::parse_table(&data)?;

        tracing::debug!(
            "Parsed {} rows with columns {:?}",
            table.rows.len(),
            table.columns
        );
        Ok(table)
    }

    async fn transform(&self, table: ProductTable) -> Result<TransformResult> {
        let mut result = TransformResult {
            columns: writer::output_columns(&table.columns),
            rows_read: table.rows.len(),
            ..Default::default()
        };

        for (index, mut row) in table.rows.into_iter().enumerate() {
            let request = match prepare_request(index + 1, &row) {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!("⚠️ Skipping row {}: {} ({:?})", index + 1, e, row.fields);
                    result.skipped_invalid += 1;
                    continue;
                }
            };

            match self
                .creator
                .create(&request.name, request.amount, &request.metadata)
                .await
            {
                Ok(url) => {
                    tracing::info!("✅ Created payment link for '{}'", request.name);
                    row.insert(LINK_COLUMN, url);
                    result.linked_rows.push(row);
                }
                Err(e) => {
                    if !e.is_row_recoverable() {
                        tracing::warn!(
                            "Gateway returned a {:?} error for row {}",
                            e.category(),
                            request.line
                        );
                    }
                    tracing::error!(
                        "❌ Error creating payment link for '{}' (row {}): {}",
                        request.name,
                        request.line,
                        e
                    );
                    result.failed_remote += 1;
                }
            }
        }

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<RunSummary> {
        if result.linked_rows.is_empty() {
            return Err(LinkError::NoLinksCreated {
                attempted: result.rows_read,
            });
        }

        let path = self.config.output_path();
        let data = writer::render_table(&result.columns, &result.linked_rows)?;
        tracing::debug!("Writing {} bytes to {}", data.len(), path);
        self.storage.write_file(path, &data).await?;

        Ok(RunSummary {
            rows_read: result.rows_read,
            links_created: result.linked_rows.len(),
            skipped_invalid: result.skipped_invalid,
            failed_remote: result.failed_remote,
            output_path: path.to_string(),
        })
    }

    fn plan(&self, table: &ProductTable) -> Vec<LinkRequest> {
        let mut planned = Vec::new();
        for (index, row) in table.rows.iter().enumerate() {
            match prepare_request(index + 1, row) {
                Ok(request) => {
                    tracing::info!(
                        "🔍 Row {}: '{}' would be charged {} {} (minor units)",
                        request.line,
                        request.name,
                        to_minor_units(request.amount),
                        self.creator.currency()
                    );
                    planned.push(request);
                }
                Err(e) => tracing::warn!("⚠️ Row {} would be skipped: {}", index + 1, e),
            }
        }
        planned
    }
}
