use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::field::{enum_name, text};
use super::logical_drive::RaidLevel;
use crate::collector::{Column, Schema, Table};
use crate::errors::CheckError;

/// cpqDaCntlrTable из CPQIDA-MIB
pub const CNTLR_TABLE: Schema = Schema {
    name: "cpqDaCntlrTable",
    oid: ".1.3.6.1.4.1.232.3.2.2.1",
    columns: &[
        Column {
            name: "index",
            oid: ".1.3.6.1.4.1.232.3.2.2.1.1.1",
        },
        Column {
            name: "model",
            oid: ".1.3.6.1.4.1.232.3.2.2.1.1.2",
        },
        Column {
            name: "fwRev",
            oid: ".1.3.6.1.4.1.232.3.2.2.1.1.3",
        },
        Column {
            name: "boardStatus",
            oid: ".1.3.6.1.4.1.232.3.2.2.1.1.10",
        },
        Column {
            name: "serialNumber",
            oid: ".1.3.6.1.4.1.232.3.2.2.1.1.15",
        },
    ],
};

/// cpqDaCntlrModel, только поколения, которые еще встречаются в проде
pub const CONTROLLER_MODELS: &[(i64, &str)] = &[
    (1, "other"),
    (49, "p420i"),
    (50, "p421"),
    (54, "b120i"),
    (62, "p230i"),
    (63, "p430i"),
    (64, "p430"),
    (65, "p431"),
    (74, "p440"),
    (75, "p440ar"),
    (76, "p441"),
    (78, "p840"),
    (80, "h240ar"),
    (82, "h240"),
    (83, "h241"),
    (84, "b140i"),
    (88, "p840ar"),
    (90, "s100i"),
    (91, "e208i-p"),
    (92, "e208i-a"),
    (93, "e208i-c"),
    (94, "e208e-p"),
    (95, "p204i-b"),
    (96, "p204i-c"),
    (97, "p408i-p"),
    (98, "p408i-a"),
    (99, "p408e-p"),
    (100, "p408i-c"),
    (101, "p408e-m"),
    (102, "p416ie-m"),
    (103, "p816i-a"),
    (104, "p408i-sb"),
];

/// cpqDaCntlrBoardStatus
const BOARD_STATUS: &[(i64, &str)] = &[
    (1, "other"),
    (2, "ok"),
    (3, "generalFailure"),
    (4, "cableProblem"),
    (5, "poweredOff"),
    (6, "cacheModuleMissing"),
    (7, "degraded"),
];

/// Smart Array контроллер
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controller {
    pub id: String,
    pub model: String,
    pub firmware: String,
    pub serial: String,
    pub status: String,
    /// `None` - логические диски не удалось прочитать вообще
    pub raid: Option<BTreeSet<RaidLevel>>,
}

impl Controller {
    pub fn from_table(
        table: &Table,
        raid_levels: Option<&HashMap<String, BTreeSet<RaidLevel>>>,
    ) -> Result<Vec<Self>, CheckError> {
        if table.is_empty() {
            return Err(CheckError::NoData { class: "controller" });
        }

        let controllers: Vec<Self> = table
            .rows()
            .map(|(index, row)| {
                let id = match text(row, "index") {
                    i if i.is_empty() => index.to_string(),
                    i => i,
                };

                let raid = raid_levels.map(|levels| levels.get(&id).cloned().unwrap_or_default());

                Controller {
                    model: enum_name(row, "model", CONTROLLER_MODELS),
                    firmware: text(row, "fwRev"),
                    serial: text(row, "serialNumber"),
                    status: enum_name(row, "boardStatus", BOARD_STATUS),
                    raid,
                    id,
                }
            })
            .collect();

        debug!(count = controllers.len(), "Прочитаны контроллеры");

        Ok(controllers)
    }
}

/// Модель распознана по MIB (не сырой код и не пусто)
pub fn is_known_model(model: &str) -> bool {
    CONTROLLER_MODELS
        .iter()
        .any(|(_, name)| *name == model && *name != "other")
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "controller ({}) model={} serial={} firmware={}",
            self.id, self.model, self.serial, self.firmware
        )?;

        if let Some(raid) = &self.raid {
            let levels: Vec<String> = raid.iter().map(RaidLevel::to_string).collect();
            write!(f, " raid={}", levels.join(","))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Sample;

    const BASE: &str = ".1.3.6.1.4.1.232.3.2.2.1.1";

    fn sample(column: u32, index: &str, value: &str) -> Sample {
        Sample::new(format!("{}.{}.{}", BASE, column, index), value)
    }

    fn table() -> Table {
        Table::build(
            CNTLR_TABLE,
            vec![
                sample(1, "0", "0"),
                sample(1, "3", "3"),
                sample(2, "0", "98"),
                sample(2, "3", "999"),
                sample(3, "0", "2.60"),
                sample(3, "3", "1.00"),
                sample(10, "0", "2"),
                sample(15, "0", "PEYHN0ARCC307X"),
            ],
        )
    }

    #[test]
    fn test_from_table_with_raid() {
        let mut levels = HashMap::new();
        levels.insert("0".to_string(), BTreeSet::from([RaidLevel::Raid1]));

        let controllers = Controller::from_table(&table(), Some(&levels)).unwrap();
        assert_eq!(controllers.len(), 2);

        let first = &controllers[0];
        assert_eq!(first.id, "0");
        assert_eq!(first.model, "p408i-a");
        assert_eq!(first.firmware, "2.60");
        assert_eq!(first.status, "ok");
        assert_eq!(first.raid, Some(BTreeSet::from([RaidLevel::Raid1])));

        let second = &controllers[1];
        assert_eq!(second.model, "999");
        assert_eq!(second.status, "");
        assert_eq!(second.raid, Some(BTreeSet::new()));
    }

    #[test]
    fn test_from_table_without_raid() {
        let controllers = Controller::from_table(&table(), None).unwrap();
        assert!(controllers.iter().all(|c| c.raid.is_none()));
        assert_eq!(
            controllers[0].to_string(),
            "controller (0) model=p408i-a serial=PEYHN0ARCC307X firmware=2.60"
        );
    }

    #[test]
    fn test_from_empty_table() {
        assert!(matches!(
            Controller::from_table(&Table::new(CNTLR_TABLE), None),
            Err(CheckError::NoData { class: "controller" })
        ));
    }

    #[test]
    fn test_known_model() {
        assert!(is_known_model("p440ar"));
        assert!(!is_known_model("other"));
        assert!(!is_known_model("999"));
        assert!(!is_known_model(""));
    }
}
