use serde::Serialize;

use super::controller::Controller;
use super::drive::PhysicalDrive;
use super::ilo::Ilo;
use super::rules::{Evaluation, RuleSet};

/// Проверяемое устройство, закрытый набор классов
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class", rename_all = "lowercase")]
pub enum Device {
    Drive(PhysicalDrive),
    Controller(Controller),
    Ilo(Ilo),
}

impl Device {
    pub fn evaluate(&self, rules: &RuleSet) -> Evaluation {
        match self {
            Device::Drive(drive) => rules.drives.evaluate(drive),
            Device::Controller(controller) => rules.controllers.evaluate(controller),
            Device::Ilo(ilo) => rules.ilo.evaluate(ilo),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Device::Drive(_) => "drive",
            Device::Controller(_) => "controller",
            Device::Ilo(_) => "iLO",
        }
    }
}
