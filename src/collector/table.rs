use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::trace;

use super::types::{Sample, Schema};

pub type Row = HashMap<&'static str, String>;

/// Таблица устройств: индекс строки -> колонка -> сырое значение.
///
/// Порядок строк совпадает с порядком первого появления индекса в walk.
#[derive(Debug, Clone)]
pub struct Table {
    pub schema: Schema,
    rows: IndexMap<String, Row>,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: IndexMap::new(),
        }
    }

    /// Собирает таблицу из потока значений, значения вне схемы пропускаются
    pub fn build<I>(schema: Schema, samples: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut table = Self::new(schema);

        for sample in samples {
            table.insert(sample);
        }

        table
    }

    /// Добавляет одно значение, повторный ключ перезаписывает старое
    pub fn insert(&mut self, sample: Sample) {
        let Some((column, index)) = self.schema.column_for(&sample.oid) else {
            trace!(table = self.schema.name, oid = %sample.oid, "OID вне схемы");
            return;
        };

        self.rows
            .entry(index.to_string())
            .or_default()
            .insert(column, sample.value);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, index: &str) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &Row)> {
        self.rows.iter().map(|(index, row)| (index.as_str(), row))
    }
}
