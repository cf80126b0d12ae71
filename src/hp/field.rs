use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::collector::Row;

/// Числовое поле записи: значение, сырой текст если не распарсилось, или пусто
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Field<T> {
    Value(T),
    Raw(String),
    Missing,
}

impl<T: FromStr> Field<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Field::Missing,
            Some(text) => text
                .parse()
                .map(Field::Value)
                .unwrap_or_else(|_| Field::Raw(text.to_string())),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(value) => value.fmt(f),
            Field::Raw(raw) => f.write_str(raw),
            Field::Missing => f.write_str("unknown"),
        }
    }
}

/// Текст колонки или пустая строка, если устройство ее не отдало
pub fn text(row: &Row, column: &str) -> String {
    row.get(column).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Имя значения SNMP перечисления, неизвестный код остается как есть
pub fn enum_name(row: &Row, column: &str, names: &[(i64, &str)]) -> String {
    let raw = text(row, column);

    raw.parse::<i64>()
        .ok()
        .and_then(|code| names.iter().find(|(c, _)| *c == code))
        .map(|(_, name)| name.to_string())
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(Field::<u64>::parse(Some("1337")), Field::Value(1337));
        assert_eq!(Field::<u64>::parse(Some(" 42 ")), Field::Value(42));
        assert_eq!(
            Field::<u64>::parse(Some("lots")),
            Field::Raw("lots".to_string())
        );
        assert_eq!(Field::<u64>::parse(Some("")), Field::Missing);
        assert_eq!(Field::<u64>::parse(None), Field::Missing);
    }

    #[test]
    fn test_display_field() {
        assert_eq!(Field::Value(1337u64).to_string(), "1337");
        assert_eq!(Field::<u64>::Raw("n/a".to_string()).to_string(), "n/a");
        assert_eq!(Field::<u64>::Missing.to_string(), "unknown");
    }

    #[test]
    fn test_enum_name() {
        let mut row = Row::new();
        row.insert("status", "3".to_string());
        row.insert("odd", "77".to_string());

        let names = [(2, "ok"), (3, "failed")];
        assert_eq!(enum_name(&row, "status", &names), "failed");
        assert_eq!(enum_name(&row, "odd", &names), "77");
        assert_eq!(enum_name(&row, "missing", &names), "");
    }
}
