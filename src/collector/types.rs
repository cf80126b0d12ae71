use serde::Serialize;

/// Одно значение из SNMP walk: числовой OID и значение в текстовом виде
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub oid: String,
    pub value: String,
}

impl Sample {
    pub fn new(oid: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            value: value.into(),
        }
    }
}

/// Колонка SNMP таблицы: имя и базовый OID
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub oid: &'static str,
}

/// Схема таблицы: фиксированный набор колонок под общим корнем
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    /// Корень для walk, все колонки лежат под ним
    pub oid: &'static str,
    pub columns: &'static [Column],
}

impl Schema {
    /// Колонка, под которую попадает OID (без самой базы колонки)
    pub fn column_for<'a>(&self, oid: &'a str) -> Option<(&'static str, &'a str)> {
        self.columns.iter().find_map(|column| {
            crate::snmp::sub_oid(oid, column.oid).map(|index| (column.name, index))
        })
    }
}
