use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use super::field::text;
use crate::collector::{Column, Schema, Table};

/// cpqDaLogDrvTable из CPQIDA-MIB
pub const LOG_DRV_TABLE: Schema = Schema {
    name: "cpqDaLogDrvTable",
    oid: ".1.3.6.1.4.1.232.3.2.3.1",
    columns: &[
        Column {
            name: "cntlrIndex",
            oid: ".1.3.6.1.4.1.232.3.2.3.1.1.1",
        },
        Column {
            name: "faultTol",
            oid: ".1.3.6.1.4.1.232.3.2.3.1.1.3",
        },
    ],
};

/// Уровень RAID логического диска (cpqDaLogDrvFaultTol)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RaidLevel {
    Raid0,
    /// mirroring: RAID 1 и RAID 1+0
    Raid1,
    Raid4,
    Raid5,
    /// advancedDataGuard
    Raid6,
    Raid50,
    Raid60,
    Raid1Adm,
    Raid10Adm,
    Other(i64),
}

impl RaidLevel {
    pub fn from_fault_tolerance(code: i64) -> Self {
        match code {
            2 => RaidLevel::Raid0,
            3 => RaidLevel::Raid1,
            4 => RaidLevel::Raid4,
            5 => RaidLevel::Raid5,
            7 => RaidLevel::Raid6,
            8 => RaidLevel::Raid50,
            9 => RaidLevel::Raid60,
            10 => RaidLevel::Raid1Adm,
            11 => RaidLevel::Raid10Adm,
            other => RaidLevel::Other(other),
        }
    }
}

impl fmt::Display for RaidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaidLevel::Raid0 => write!(f, "0"),
            RaidLevel::Raid1 => write!(f, "1"),
            RaidLevel::Raid4 => write!(f, "4"),
            RaidLevel::Raid5 => write!(f, "5"),
            RaidLevel::Raid6 => write!(f, "6"),
            RaidLevel::Raid50 => write!(f, "50"),
            RaidLevel::Raid60 => write!(f, "60"),
            RaidLevel::Raid1Adm => write!(f, "1ADM"),
            RaidLevel::Raid10Adm => write!(f, "10ADM"),
            RaidLevel::Other(code) => write!(f, "other({})", code),
        }
    }
}

/// Логический диск, нужен только для набора RAID уровней контроллера
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalDrive {
    pub controller: String,
    pub raid: Option<RaidLevel>,
}

impl LogicalDrive {
    /// Пустая таблица здесь не ошибка: контроллер без томов допустим
    pub fn from_table(table: &Table) -> Vec<Self> {
        table
            .rows()
            .map(|(index, row)| {
                let controller = match text(row, "cntlrIndex") {
                    c if c.is_empty() => index.split('.').next().unwrap_or(index).to_string(),
                    c => c,
                };

                LogicalDrive {
                    controller,
                    raid: text(row, "faultTol")
                        .parse()
                        .ok()
                        .map(RaidLevel::from_fault_tolerance),
                }
            })
            .collect()
    }
}

/// Группирует RAID уровни по индексу контроллера
pub fn raid_levels_by_controller(drives: &[LogicalDrive]) -> HashMap<String, BTreeSet<RaidLevel>> {
    let mut levels: HashMap<String, BTreeSet<RaidLevel>> = HashMap::new();

    for drive in drives {
        let entry = levels.entry(drive.controller.clone()).or_default();
        if let Some(raid) = drive.raid {
            entry.insert(raid);
        }
    }

    levels
}
