pub mod controller;
pub mod device;
pub mod drive;
pub mod field;
pub mod ilo;
pub mod logical_drive;
pub mod rules;
pub mod version;

pub use controller::{CNTLR_TABLE, Controller};
pub use device::Device;
pub use drive::{PHY_DRV_TABLE, PhysicalDrive};
pub use field::Field;
pub use ilo::{Ilo, SM2_CNTLR};
pub use logical_drive::{LOG_DRV_TABLE, LogicalDrive, RaidLevel, raid_levels_by_controller};
pub use rules::{Evaluation, RuleSet};
pub use version::FirmwareVersion;
