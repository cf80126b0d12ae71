use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use super::oid::{is_oid, is_sub_oid};
use crate::collector::Sample;

/// Записанный вывод `snmpwalk -On`, отдается так же, как живой walk
#[derive(Debug, Clone, Default)]
pub struct Capture {
    samples: Vec<Sample>,
}

impl Capture {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .context(format!("Не удалось прочитать файл: {}", path.display()))?;

        let capture = Self::parse(&content);
        debug!(file = %path.display(), samples = capture.samples.len(), "Загружен snmpwalk");

        Ok(capture)
    }

    pub fn parse(content: &str) -> Self {
        let samples = content.lines().filter_map(parse_line).collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Все значения под `root` в порядке файла
    pub fn walk(&self, root: &str) -> Vec<Sample> {
        self.samples
            .iter()
            .filter(|sample| is_sub_oid(&sample.oid, root))
            .cloned()
            .collect()
    }
}

/// Разбирает строку вида `.1.3.6.1.2.1.1.5.0 = STRING: "host"`
fn parse_line(line: &str) -> Option<Sample> {
    let (oid, rest) = line.split_once(" = ")?;
    let oid = oid.trim();

    if !is_oid(oid) {
        trace!(line, "Пропускаем строку без OID");
        return None;
    }

    let value = match rest.split_once(": ") {
        Some((kind, value)) => parse_value(kind.trim(), value.trim())?,
        None if rest.trim() == "\"\"" => String::new(),
        None => return None,
    };

    Some(Sample::new(oid, value))
}

fn parse_value(kind: &str, value: &str) -> Option<String> {
    if kind.starts_with("No Such") || kind.starts_with("No more") {
        return None;
    }

    let value = match kind {
        "STRING" => unquote(value),
        "INTEGER" => enum_number(value),
        "Timeticks" => value
            .strip_prefix('(')
            .and_then(|v| v.split_once(')'))
            .map(|(ticks, _)| ticks)
            .unwrap_or(value),
        _ => value,
    };

    Some(value.to_string())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// `ok(2)` -> `2`, если MIB была загружена при записи
fn enum_number(value: &str) -> &str {
    value
        .strip_suffix(')')
        .and_then(|v| v.rsplit_once('('))
        .map(|(_, number)| number)
        .unwrap_or(value)
}
