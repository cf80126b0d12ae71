use serde::Serialize;

use crate::check::{CheckReport, DeviceResult};
use crate::hp::Device;
use crate::nagios::Status;

/// JSON структура для систем, которые не разбирают вывод плагина
#[derive(Debug, Clone, Serialize)]
pub struct CheckReportJson {
    pub status: Status,
    pub exit_code: i32,
    pub summary: String,
    pub timestamp: String,
    pub counts: ResultSummary,
    pub devices: Vec<DeviceResultJson>,
    pub errors: Vec<ErrorInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultSummary {
    pub controllers: usize,
    pub drives: usize,
    pub ok: usize,
    pub warning: usize,
    pub critical: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceResultJson {
    pub status: Status,
    pub message: String,
    pub device: Device,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub item_type: String,
    pub error_message: String,
}

/// JSON форматтер для результатов проверки
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_report(report: &CheckReport) -> CheckReportJson {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let overall = &report.overall;

        CheckReportJson {
            status: report.status,
            exit_code: report.status.exit_code(),
            summary: report.summary().to_string(),
            timestamp,
            counts: ResultSummary {
                controllers: report.controllers,
                drives: report.drives,
                ok: overall.oks,
                warning: overall.warnings,
                critical: overall.criticals,
                unknown: overall.unknowns,
            },
            devices: report.results.iter().map(Self::format_device).collect(),
            errors: report
                .unavailable
                .iter()
                .map(|message| ErrorInfo {
                    item_type: "no_data".to_string(),
                    error_message: message.clone(),
                })
                .collect(),
        }
    }

    fn format_device(result: &DeviceResult) -> DeviceResultJson {
        DeviceResultJson {
            status: result.evaluation.status,
            message: result.evaluation.message.clone(),
            device: result.device.clone(),
        }
    }

    /// Сериализует результат в JSON строку
    pub fn to_json_string(report: &CheckReport) -> anyhow::Result<String> {
        let json_report = Self::format_report(report);
        serde_json::to_string_pretty(&json_report)
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }
}
