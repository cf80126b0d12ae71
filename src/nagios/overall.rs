use super::status::Status;

/// Итог по всем проверенным устройствам
#[derive(Debug, Clone, Default)]
pub struct Overall {
    pub oks: usize,
    pub warnings: usize,
    pub criticals: usize,
    pub unknowns: usize,
    pub summary: String,
    outputs: Vec<(Status, String)>,
}

impl Overall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, status: Status, message: impl Into<String>) {
        match status {
            Status::Ok => self.oks += 1,
            Status::Warning => self.warnings += 1,
            Status::Critical => self.criticals += 1,
            Status::Unknown => self.unknowns += 1,
        }

        self.outputs.push((status, message.into()));
    }

    /// CRITICAL > WARNING > OK, UNKNOWN если ничего не проверено
    pub fn status(&self) -> Status {
        if self.criticals > 0 {
            Status::Critical
        } else if self.warnings > 0 {
            Status::Warning
        } else if self.oks > 0 {
            Status::Ok
        } else {
            Status::Unknown
        }
    }

    /// Строка итога и затем сообщения в порядке добавления
    pub fn output(&self) -> String {
        let mut out = self.summary.clone();

        for (status, message) in &self.outputs {
            out.push_str(&format!("\n[{}] {}", status, message));
        }

        out
    }
}
