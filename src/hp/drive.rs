use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::field::{Field, enum_name, text};
use crate::collector::{Column, Schema, Table};
use crate::errors::CheckError;

/// cpqDaPhyDrvTable из CPQIDA-MIB
pub const PHY_DRV_TABLE: Schema = Schema {
    name: "cpqDaPhyDrvTable",
    oid: ".1.3.6.1.4.1.232.3.2.5.1",
    columns: &[
        Column {
            name: "model",
            oid: ".1.3.6.1.4.1.232.3.2.5.1.1.3",
        },
        Column {
            name: "fwRev",
            oid: ".1.3.6.1.4.1.232.3.2.5.1.1.4",
        },
        Column {
            name: "status",
            oid: ".1.3.6.1.4.1.232.3.2.5.1.1.6",
        },
        Column {
            name: "refHours",
            oid: ".1.3.6.1.4.1.232.3.2.5.1.1.9",
        },
        Column {
            name: "serialNum",
            oid: ".1.3.6.1.4.1.232.3.2.5.1.1.51",
        },
    ],
};

/// cpqDaPhyDrvStatus
const DRIVE_STATUS: &[(i64, &str)] = &[
    (1, "other"),
    (2, "ok"),
    (3, "failed"),
    (4, "predictiveFailure"),
    (5, "erasing"),
    (6, "eraseDone"),
    (7, "eraseQueued"),
    (8, "ssdWearOut"),
    (9, "notAuthenticated"),
];

/// Физический диск за Smart Array контроллером
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhysicalDrive {
    /// Индекс строки: `<контроллер>.<диск>`
    pub id: String,
    pub model: String,
    pub firmware: String,
    pub serial: String,
    pub status: String,
    pub hours: Field<u64>,
}

impl PhysicalDrive {
    pub fn from_table(table: &Table) -> Result<Vec<Self>, CheckError> {
        if table.is_empty() {
            return Err(CheckError::NoData { class: "drive" });
        }

        let drives: Vec<Self> = table
            .rows()
            .map(|(index, row)| PhysicalDrive {
                id: index.to_string(),
                model: text(row, "model"),
                firmware: text(row, "fwRev"),
                serial: text(row, "serialNum"),
                status: enum_name(row, "status", DRIVE_STATUS),
                hours: Field::parse(row.get("refHours").map(String::as_str)),
            })
            .collect();

        debug!(count = drives.len(), "Прочитаны физические диски");

        Ok(drives)
    }
}

impl fmt::Display for PhysicalDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:<4}) model={} serial={} firmware={} hours={}",
            self.id, self.model, self.serial, self.firmware, self.hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Sample;

    const BASE: &str = ".1.3.6.1.4.1.232.3.2.5.1.1";

    fn sample(column: u32, index: &str, value: &str) -> Sample {
        Sample::new(format!("{}.{}.{}", BASE, column, index), value)
    }

    #[test]
    fn test_from_table() {
        let table = Table::build(
            PHY_DRV_TABLE,
            vec![
                sample(3, "0.1", "VO0480JFDGT"),
                sample(3, "0.2", "EG0300FBDBR"),
                sample(4, "0.1", "HPD1"),
                sample(4, "0.2", "HPD9"),
                sample(6, "0.1", "2"),
                sample(6, "0.2", "3"),
                sample(9, "0.1", "1337"),
                sample(9, "0.2", "a lot"),
                sample(51, "0.1", "ABC123"),
            ],
        );

        let drives = PhysicalDrive::from_table(&table).unwrap();
        assert_eq!(drives.len(), 2);

        assert_eq!(
            drives[0],
            PhysicalDrive {
                id: "0.1".to_string(),
                model: "VO0480JFDGT".to_string(),
                firmware: "HPD1".to_string(),
                serial: "ABC123".to_string(),
                status: "ok".to_string(),
                hours: Field::Value(1337),
            }
        );

        assert_eq!(drives[1].status, "failed");
        assert_eq!(drives[1].serial, "");
        assert_eq!(drives[1].hours, Field::Raw("a lot".to_string()));
    }

    #[test]
    fn test_from_empty_table() {
        let table = Table::new(PHY_DRV_TABLE);
        assert!(matches!(
            PhysicalDrive::from_table(&table),
            Err(CheckError::NoData { class: "drive" })
        ));
    }

    #[test]
    fn test_display() {
        let drive = PhysicalDrive {
            id: "1.1".to_string(),
            model: "OTHERDRIVE".to_string(),
            firmware: "HPD1".to_string(),
            serial: "ABC123".to_string(),
            status: "ok".to_string(),
            hours: Field::Value(1337),
        };

        assert_eq!(
            drive.to_string(),
            "(1.1 ) model=OTHERDRIVE serial=ABC123 firmware=HPD1 hours=1337"
        );
    }
}
