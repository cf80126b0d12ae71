use tokio::time::{Duration, timeout};
use tracing::debug;

pub mod table;
pub mod types;

pub use table::{Row, Table};
pub use types::{Column, Sample, Schema};

use crate::errors::CheckError;
use crate::snmp::Transport;

/// Коллектор для сбора SNMP таблиц
pub struct SnmpCollector;

impl SnmpCollector {
    /// Обходит корень схемы и возвращает сырые значения
    pub async fn walk_schema(
        transport: &mut Transport,
        schema: &Schema,
        timeout_secs: u64,
    ) -> Result<Vec<Sample>, CheckError> {
        let timeout_duration = Duration::from_secs(timeout_secs);

        let result = timeout(timeout_duration, transport.walk(schema.oid)).await;

        match result {
            Ok(Ok(samples)) => {
                debug!(
                    table = schema.name,
                    source = transport.kind(),
                    samples = samples.len(),
                    "Walk завершен"
                );
                Ok(samples)
            }
            Ok(Err(e)) => Err(CheckError::Transport(format!("{:#}", e))),
            Err(_) => Err(CheckError::Timeout(timeout_secs)),
        }
    }

    /// Сначала полностью собирает все walk'и, потом строит таблицы
    pub async fn collect_tables(
        transport: &mut Transport,
        schemas: &[Schema],
        timeout_secs: u64,
    ) -> Result<Vec<Table>, CheckError> {
        let mut walks = Vec::with_capacity(schemas.len());

        for schema in schemas {
            let samples = Self::walk_schema(transport, schema, timeout_secs).await?;
            walks.push((*schema, samples));
        }

        Ok(walks
            .into_iter()
            .map(|(schema, samples)| Table::build(schema, samples))
            .collect())
    }
}
