use std::fmt;

use serde::Serialize;

use super::field::{enum_name, text};
use crate::collector::{Column, Schema, Table};
use crate::errors::CheckError;

/// Скаляры cpqSm2Cntlr из CPQSM2-MIB, строка всегда с индексом `0`
pub const SM2_CNTLR: Schema = Schema {
    name: "cpqSm2Cntlr",
    oid: ".1.3.6.1.4.1.232.9.2.2",
    columns: &[
        Column {
            name: "romRevision",
            oid: ".1.3.6.1.4.1.232.9.2.2.2",
        },
        Column {
            name: "model",
            oid: ".1.3.6.1.4.1.232.9.2.2.21",
        },
    ],
};

/// cpqSm2CntlrModel
const ILO_MODELS: &[(i64, &str)] = &[
    (1, "other"),
    (2, "eisaRemoteInsight"),
    (3, "pciRemoteInsight"),
    (4, "riloe"),
    (5, "riloeII"),
    (6, "ilo"),
    (7, "ilo2"),
    (8, "ilo3"),
    (9, "ilo4"),
    (10, "ilo5"),
    (11, "ilo6"),
];

/// Integrated Lights-Out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ilo {
    pub model: String,
    pub firmware: String,
}

impl Ilo {
    pub fn from_table(table: &Table) -> Result<Self, CheckError> {
        let (_, row) = table
            .rows()
            .next()
            .ok_or(CheckError::NoData { class: "iLO" })?;

        Ok(Ilo {
            model: enum_name(row, "model", ILO_MODELS),
            firmware: text(row, "romRevision"),
        })
    }
}

impl fmt::Display for Ilo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iLO model={} firmware={}", self.model, self.firmware)
    }
}
