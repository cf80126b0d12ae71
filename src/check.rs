use tracing::{debug, info, warn};

use crate::collector::{SnmpCollector, Table};
use crate::errors::CheckError;
use crate::hp::{
    CNTLR_TABLE, Controller, Device, Evaluation, Ilo, LOG_DRV_TABLE, LogicalDrive,
    PHY_DRV_TABLE, PhysicalDrive, RuleSet, SM2_CNTLR, raid_levels_by_controller,
};
use crate::nagios::{Overall, Status};
use crate::snmp::Transport;

/// Параметры одного запуска
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    pub ignore_ilo: bool,
    pub timeout: u64,
}

/// Все таблицы, собранные за один запуск
#[derive(Debug, Clone)]
pub struct Tables {
    pub controllers: Table,
    pub logical_drives: Table,
    pub drives: Table,
    pub ilo: Option<Table>,
}

impl Tables {
    /// Сначала полностью обходит устройство, потом строит таблицы
    pub async fn collect(
        transport: &mut Transport,
        options: &CheckOptions,
    ) -> Result<Self, CheckError> {
        let mut schemas = vec![CNTLR_TABLE, LOG_DRV_TABLE, PHY_DRV_TABLE];
        if !options.ignore_ilo {
            schemas.push(SM2_CNTLR);
        }

        let mut tables =
            SnmpCollector::collect_tables(transport, &schemas, options.timeout).await?;

        let ilo = if options.ignore_ilo { None } else { tables.pop() };
        let drives = tables.pop();
        let logical_drives = tables.pop();
        let controllers = tables.pop();

        Ok(Tables {
            controllers: controllers.unwrap_or_else(|| Table::new(CNTLR_TABLE)),
            logical_drives: logical_drives.unwrap_or_else(|| Table::new(LOG_DRV_TABLE)),
            drives: drives.unwrap_or_else(|| Table::new(PHY_DRV_TABLE)),
            ilo,
        })
    }
}

/// Результат проверки одного устройства
#[derive(Debug, Clone)]
pub struct DeviceResult {
    pub device: Device,
    pub evaluation: Evaluation,
}

/// Итог запуска: статус для кода выхода и текст для вывода
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub status: Status,
    pub overall: Overall,
    pub results: Vec<DeviceResult>,
    pub unavailable: Vec<String>,
    pub controllers: usize,
    pub drives: usize,
}

impl CheckReport {
    pub fn summary(&self) -> &str {
        &self.overall.summary
    }

    pub fn output(&self) -> String {
        self.overall.output()
    }
}

/// Полный прогон: walk, таблицы, записи, правила, итог
pub async fn run(
    transport: &mut Transport,
    options: &CheckOptions,
    rules: &RuleSet,
) -> Result<CheckReport, CheckError> {
    let tables = Tables::collect(transport, options).await?;
    evaluate(&tables, rules)
}

/// Разбор таблиц и проверка правил, без ввода-вывода
pub fn evaluate(tables: &Tables, rules: &RuleSet) -> Result<CheckReport, CheckError> {
    let (devices, unavailable) = extract(tables)?;

    let results: Vec<DeviceResult> = devices
        .into_iter()
        .map(|device| {
            let evaluation = device.evaluate(rules);
            debug!(class = device.class(), status = %evaluation.status, "{}", evaluation.message);
            DeviceResult { device, evaluation }
        })
        .collect();

    let mut overall = Overall::new();
    for result in &results {
        overall.add(result.evaluation.status, result.evaluation.message.clone());
    }

    let unavailable: Vec<String> = unavailable.iter().map(ToString::to_string).collect();
    for message in &unavailable {
        overall.add(Status::Unknown, message.clone());
    }

    let count = |class: &str| results.iter().filter(|r| r.device.class() == class).count();
    let controllers = count("controller");
    let drives = count("drive");

    let mut status = overall.status();
    overall.summary = match status {
        Status::Critical => format!("Found {} critical problems", overall.criticals),
        Status::Warning => format!("Found {} warnings", overall.warnings),
        _ => format!(
            "All {} controllers and {} drives seem fine",
            controllers, drives
        ),
    };

    // Часть данных не получена - нельзя сказать, что все в порядке
    if status == Status::Ok && !unavailable.is_empty() {
        status = Status::Unknown;
        overall.summary = format!("{} - {}", unavailable.join(" "), overall.summary);
    }

    info!(%status, controllers, drives, "Проверка завершена");

    Ok(CheckReport {
        status,
        overall,
        results,
        unavailable,
        controllers,
        drives,
    })
}

/// Записи всех классов; класс без данных не мешает остальным
fn extract(tables: &Tables) -> Result<(Vec<Device>, Vec<CheckError>), CheckError> {
    let mut devices = Vec::new();
    let mut unavailable = Vec::new();

    let logical_drives = LogicalDrive::from_table(&tables.logical_drives);
    let raid_levels = if tables.logical_drives.is_empty() {
        None
    } else {
        Some(raid_levels_by_controller(&logical_drives))
    };

    let controllers = Controller::from_table(&tables.controllers, raid_levels.as_ref());
    let drives = PhysicalDrive::from_table(&tables.drives);
    let ilo = tables.ilo.as_ref().map(Ilo::from_table);

    if let Some(ilo) = ilo {
        match ilo {
            Ok(ilo) => devices.push(Device::Ilo(ilo)),
            Err(e) => unavailable.push(e),
        }
    }

    match controllers {
        Ok(controllers) => devices.extend(controllers.into_iter().map(Device::Controller)),
        Err(e) => unavailable.insert(0, e),
    }

    match drives {
        Ok(drives) => devices.extend(drives.into_iter().map(Device::Drive)),
        Err(e) => unavailable.push(e),
    }

    for e in &unavailable {
        warn!("{}", e);
    }

    if devices.is_empty() {
        return Err(unavailable
            .into_iter()
            .next()
            .unwrap_or(CheckError::NoData { class: "device" }));
    }

    Ok((devices, unavailable))
}
