//! Правила уязвимостей HPE.
//!
//! Правила каждого класса устройств проверяются строго по порядку, первое
//! совпавшее определяет результат. Порядок в списках важен.
//!
//! Источники:
//! * <https://support.hpe.com/hpesc/public/docDisplay?docLocale=en_US&docId=emr_na-a00092491en_us>
//! * <https://support.hpe.com/hpesc/public/docDisplay?docLocale=en_US&docId=a00097382en_us>
//! * <https://support.hpe.com/hpesc/public/docDisplay?docLocale=en_US&docId=a00097210en_us>
//! * <https://support.hpe.com/hpesc/public/docDisplay?docId=hpesbhf04012en_us>

use serde::Serialize;

use super::controller::{Controller, is_known_model};
use super::drive::PhysicalDrive;
use super::ilo::Ilo;
use super::logical_drive::RaidLevel;
use super::version::{FirmwareVersion, VersionRange};
use crate::nagios::Status;

const BULLETIN_32768_HOURS: &str = "a00092491";
const BULLETIN_40000_HOURS: &str = "a00097382";

/// Результат проверки одного устройства
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub status: Status,
    pub message: String,
}

impl Evaluation {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn note(status: Status, description: &str, note: impl AsRef<str>) -> Self {
        Self::new(status, format!("{} - {}", description, note.as_ref()))
    }
}

/// Любой статус, кроме `ok`, от самого устройства - сразу CRITICAL
fn device_status(status: &str, description: &str) -> Option<Evaluation> {
    if status.is_empty() || status == "ok" {
        return None;
    }

    Some(Evaluation::note(
        Status::Critical,
        description,
        format!("status: {}", status),
    ))
}

/// Модель SSD с багом прошивки и версия, в которой он исправлен
#[derive(Debug, Clone)]
pub struct AffectedDrive {
    pub model: &'static str,
    pub fixed: FirmwareVersion,
    pub bulletin: &'static str,
}

#[derive(Debug, Clone)]
pub struct DriveRules {
    pub affected: Vec<AffectedDrive>,
}

impl DriveRules {
    pub fn evaluate(&self, drive: &PhysicalDrive) -> Evaluation {
        let description = drive.to_string();

        if let Some(evaluation) = device_status(&drive.status, &description) {
            return evaluation;
        }

        for rule in &self.affected {
            if rule.model != drive.model {
                continue;
            }

            let fixed = FirmwareVersion::parse(&drive.firmware)
                .is_some_and(|installed| installed >= rule.fixed);

            return if fixed {
                Evaluation::note(Status::Ok, &description, "firmware update applied")
            } else {
                Evaluation::note(
                    Status::Critical,
                    &description,
                    format!(
                        "affected by FW bug, update to {} ({})",
                        rule.fixed, rule.bulletin
                    ),
                )
            };
        }

        Evaluation::new(Status::Ok, description)
    }
}

/// Набор RAID уровней, при которых прошивка в диапазоне опасна
#[derive(Debug, Clone)]
pub struct RaidRule {
    pub levels: &'static [RaidLevel],
    pub message: &'static str,
}

impl RaidRule {
    fn matches(&self, configured: &std::collections::BTreeSet<RaidLevel>) -> bool {
        self.levels.iter().any(|level| configured.contains(level))
    }
}

#[derive(Debug, Clone)]
pub struct ControllerRules {
    pub affected_models: &'static [&'static str],
    pub affected: VersionRange,
    pub fixed: FirmwareVersion,
    pub raid_rules: Vec<RaidRule>,
}

impl ControllerRules {
    pub fn evaluate(&self, controller: &Controller) -> Evaluation {
        let description = controller.to_string();

        if let Some(evaluation) = device_status(&controller.status, &description) {
            return evaluation;
        }

        // Неизвестную модель не отбрасываем: лучше проверить прошивку
        if is_known_model(&controller.model)
            && !self.affected_models.contains(&controller.model.as_str())
        {
            return Evaluation::new(Status::Ok, description);
        }

        let Some(installed) = FirmwareVersion::parse(&controller.firmware)
            .filter(|v| v.comparable(&self.affected.min) && v.comparable(&self.fixed))
        else {
            return Evaluation::note(Status::Warning, &description, "firmware version unknown");
        };

        if installed < self.affected.min {
            return Evaluation::note(Status::Ok, &description, "firmware older than affected");
        }

        if installed >= self.fixed {
            return Evaluation::note(Status::Ok, &description, "firmware has been updated");
        }

        if !self.affected.contains(&installed) {
            return Evaluation::new(Status::Ok, description);
        }

        let Some(configured) = &controller.raid else {
            let messages: Vec<&str> = self.raid_rules.iter().map(|rule| rule.message).collect();
            return Evaluation::note(Status::Critical, &description, messages.join(" / "));
        };

        for rule in &self.raid_rules {
            if rule.matches(configured) {
                return Evaluation::note(Status::Critical, &description, rule.message);
            }
        }

        Evaluation::note(
            Status::Warning,
            &description,
            format!(
                "firmware in affected range but no affected RAID configured - update to {}",
                self.fixed
            ),
        )
    }
}

/// Минимальная безопасная версия для линейки iLO
#[derive(Debug, Clone)]
pub struct IloFloor {
    pub model: &'static str,
    pub min: FirmwareVersion,
}

#[derive(Debug, Clone)]
pub struct IloRules {
    pub floors: Vec<IloFloor>,
}

impl IloRules {
    pub fn evaluate(&self, ilo: &Ilo) -> Evaluation {
        let description = ilo.to_string();

        let Some(floor) = self.floors.iter().find(|floor| floor.model == ilo.model) else {
            return Evaluation::note(Status::Ok, &description, "no known vulnerabilities");
        };

        // Версия с чужим префиксом не сравнима с порогом, как и нераспознанная
        let Some(installed) =
            FirmwareVersion::parse(&ilo.firmware).filter(|v| v.comparable(&floor.min))
        else {
            return Evaluation::note(Status::Warning, &description, "firmware version unknown");
        };

        if installed < floor.min {
            Evaluation::note(
                Status::Critical,
                &description,
                format!("firmware older than {}, update required", floor.min),
            )
        } else {
            Evaluation::note(
                Status::Ok,
                &description,
                format!("firmware is {} or later", floor.min),
            )
        }
    }
}

/// Все правила, собираются один раз при старте
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub drives: DriveRules,
    pub controllers: ControllerRules,
    pub ilo: IloRules,
}

impl RuleSet {
    pub fn hpe() -> Self {
        Self {
            drives: DriveRules {
                affected: affected_drives(),
            },
            controllers: ControllerRules {
                affected_models: &[
                    "e208i-p", "e208i-a", "e208i-c", "e208e-p", "p204i-b", "p204i-c", "p408i-p",
                    "p408i-a", "p408e-p", "p408i-c", "p408e-m", "p416ie-m", "p816i-a",
                    "p408i-sb",
                ],
                affected: VersionRange {
                    min: FirmwareVersion::new("", &[1, 98]),
                    max: FirmwareVersion::new("", &[2, 62]),
                },
                fixed: FirmwareVersion::new("", &[2, 65]),
                raid_rules: vec![
                    RaidRule {
                        levels: &[
                            RaidLevel::Raid1,
                            RaidLevel::Raid1Adm,
                            RaidLevel::Raid10Adm,
                        ],
                        message: "if you have RAID 1/10/ADM - update immediately!",
                    },
                    RaidRule {
                        levels: &[
                            RaidLevel::Raid5,
                            RaidLevel::Raid6,
                            RaidLevel::Raid50,
                            RaidLevel::Raid60,
                        ],
                        message: "if you have RAID 5/6/50/60 - update immediately!",
                    },
                ],
            },
            ilo: IloRules {
                floors: vec![
                    IloFloor {
                        model: "ilo3",
                        min: FirmwareVersion::new("", &[1, 93]),
                    },
                    IloFloor {
                        model: "ilo4",
                        min: FirmwareVersion::new("", &[2, 75]),
                    },
                    IloFloor {
                        model: "ilo5",
                        min: FirmwareVersion::new("", &[2, 18]),
                    },
                ],
            },
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::hpe()
    }
}

fn affected_drives() -> Vec<AffectedDrive> {
    let hours_32768 = [
        "VO0480JFDGT",
        "VO0960JFDGU",
        "VO1920JFDGV",
        "VO3840JFDHA",
        "MO0400JFFCF",
        "MO0800JFFCH",
        "MO1600JFFCK",
        "MO3200JFFCL",
        "VO000480JWDAR",
        "VO000960JWDAT",
        "VO001920JWDAU",
        "VO003840JWDAV",
        "VO007680JWCNK",
        "VO015300JWCNL",
        "VK000960JWSSQ",
        "VK001920JWSSR",
        "VK003840JWSST",
        "VK003840JWSSU",
        "VK007680JWSSV",
        "VO015360JWSSW",
    ];
    let hours_40000 = ["EK0800JVYPN", "EO1600JVYPP", "MK0800JVYPQ", "MO1600JVYPR"];

    let fixed_32768 = hours_32768.into_iter().map(|model| AffectedDrive {
        model,
        fixed: FirmwareVersion::new("HPD", &[8]),
        bulletin: BULLETIN_32768_HOURS,
    });
    let fixed_40000 = hours_40000.into_iter().map(|model| AffectedDrive {
        model,
        fixed: FirmwareVersion::new("HPD", &[7]),
        bulletin: BULLETIN_40000_HOURS,
    });

    fixed_32768.chain(fixed_40000).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::hp::field::Field;

    fn drive(model: &str, firmware: &str, status: &str) -> PhysicalDrive {
        PhysicalDrive {
            id: "1.1".to_string(),
            model: model.to_string(),
            firmware: firmware.to_string(),
            serial: "ABC123".to_string(),
            status: status.to_string(),
            hours: Field::Value(1337),
        }
    }

    fn controller(firmware: &str, raid: Option<&[RaidLevel]>) -> Controller {
        Controller {
            id: "0".to_string(),
            model: "p408i-a".to_string(),
            firmware: firmware.to_string(),
            serial: "PEYHN0ARCC307X".to_string(),
            status: "ok".to_string(),
            raid: raid.map(|levels| levels.iter().copied().collect::<BTreeSet<_>>()),
        }
    }

    #[test]
    fn test_drive_not_affected() {
        let rules = RuleSet::hpe();
        let result = rules.drives.evaluate(&drive("OTHERDRIVE", "HPD1", "ok"));

        assert_eq!(result.status, Status::Ok);
        assert_eq!(
            result.message,
            "(1.1 ) model=OTHERDRIVE serial=ABC123 firmware=HPD1 hours=1337"
        );
    }

    #[test]
    fn test_drive_failed_status_wins() {
        let rules = RuleSet::hpe();

        for model in ["OTHERDRIVE", "VO0480JFDGT"] {
            let result = rules.drives.evaluate(&drive(model, "HPD8", "failed"));
            assert_eq!(result.status, Status::Critical);
            assert!(result.message.ends_with(" - status: failed"));
        }
    }

    #[test]
    fn test_drive_affected() {
        let rules = RuleSet::hpe();
        let result = rules.drives.evaluate(&drive("VO0480JFDGT", "HPD1", "ok"));

        assert_eq!(result.status, Status::Critical);
        assert!(result.message.contains(" - affected"));
        assert!(result.message.contains("a00092491"));
    }

    #[test]
    fn test_drive_affected_but_fixed() {
        let rules = RuleSet::hpe();

        let result = rules.drives.evaluate(&drive("VO0480JFDGT", "HPD8", "ok"));
        assert_eq!(result.status, Status::Ok);
        assert!(result.message.ends_with("firmware update applied"));

        let result = rules.drives.evaluate(&drive("MK0800JVYPQ", "HPD7", "ok"));
        assert_eq!(result.status, Status::Ok);

        let result = rules.drives.evaluate(&drive("MK0800JVYPQ", "HPD6", "ok"));
        assert_eq!(result.status, Status::Critical);
        assert!(result.message.contains("a00097382"));
    }

    #[test]
    fn test_drive_unreadable_firmware_stays_affected() {
        let rules = RuleSet::hpe();

        for firmware in ["", "garbage", "XYZ9"] {
            let result = rules.drives.evaluate(&drive("VO0480JFDGT", firmware, "ok"));
            assert_eq!(result.status, Status::Critical, "firmware {:?}", firmware);
        }
    }

    #[test]
    fn test_drive_model_match_is_exact() {
        let rules = RuleSet::hpe();
        let result = rules.drives.evaluate(&drive("vo0480jfdgt", "HPD1", "ok"));
        assert_eq!(result.status, Status::Ok);
    }

    #[test]
    fn test_controller_raid_1_affected() {
        let rules = RuleSet::hpe();

        let result = rules
            .controllers
            .evaluate(&controller("2.60", Some(&[RaidLevel::Raid1])));
        assert_eq!(result.status, Status::Critical);
        assert!(result.message.contains("RAID 1/10/ADM"));

        let result = rules
            .controllers
            .evaluate(&controller("2.65", Some(&[RaidLevel::Raid1])));
        assert_eq!(result.status, Status::Ok);
        assert!(result.message.ends_with("firmware has been updated"));
    }

    #[test]
    fn test_controller_raid_5_affected() {
        let rules = RuleSet::hpe();
        let result = rules
            .controllers
            .evaluate(&controller("1.98", Some(&[RaidLevel::Raid0, RaidLevel::Raid6])));

        assert_eq!(result.status, Status::Critical);
        assert!(result.message.contains("RAID 5/6/50/60"));
    }

    #[test]
    fn test_controller_first_raid_rule_wins() {
        let rules = RuleSet::hpe();
        let result = rules.controllers.evaluate(&controller(
            "2.62",
            Some(&[RaidLevel::Raid5, RaidLevel::Raid10Adm]),
        ));

        assert_eq!(result.status, Status::Critical);
        assert!(result.message.contains("RAID 1/10/ADM"));
        assert!(!result.message.contains("RAID 5/6/50/60"));
    }

    #[test]
    fn test_controller_no_affected_raid() {
        let rules = RuleSet::hpe();

        let result = rules
            .controllers
            .evaluate(&controller("2.60", Some(&[RaidLevel::Raid0])));
        assert_eq!(result.status, Status::Warning);

        let result = rules.controllers.evaluate(&controller("2.60", Some(&[])));
        assert_eq!(result.status, Status::Warning);
    }

    #[test]
    fn test_controller_unknown_raid() {
        let rules = RuleSet::hpe();
        let result = rules.controllers.evaluate(&controller("2.00", None));

        assert_eq!(result.status, Status::Critical);
        assert!(result.message.contains("RAID 1/10/ADM"));
        assert!(result.message.contains("RAID 5/6/50/60"));
    }

    #[test]
    fn test_controller_outside_range() {
        let rules = RuleSet::hpe();
        let raid = Some([RaidLevel::Raid1].as_slice());

        let result = rules.controllers.evaluate(&controller("1.60", raid));
        assert_eq!(result.status, Status::Ok);
        assert!(result.message.ends_with("firmware older than affected"));

        let result = rules.controllers.evaluate(&controller("2.63", raid));
        assert_eq!(result.status, Status::Ok);

        let result = rules.controllers.evaluate(&controller("3.00", raid));
        assert_eq!(result.status, Status::Ok);
        assert!(result.message.ends_with("firmware has been updated"));
    }

    #[test]
    fn test_controller_status_and_model() {
        let rules = RuleSet::hpe();

        let mut failed = controller("2.65", None);
        failed.status = "generalFailure".to_string();
        let result = rules.controllers.evaluate(&failed);
        assert_eq!(result.status, Status::Critical);
        assert!(result.message.ends_with("status: generalFailure"));

        let mut gen9 = controller("2.60", Some(&[RaidLevel::Raid1]));
        gen9.model = "p440ar".to_string();
        assert_eq!(rules.controllers.evaluate(&gen9).status, Status::Ok);

        let mut unknown = controller("2.60", Some(&[RaidLevel::Raid1]));
        unknown.model = "999".to_string();
        assert_eq!(rules.controllers.evaluate(&unknown).status, Status::Critical);
    }

    #[test]
    fn test_ilo_floors() {
        let rules = RuleSet::hpe();
        let ilo = |model: &str, firmware: &str| Ilo {
            model: model.to_string(),
            firmware: firmware.to_string(),
        };

        assert_eq!(rules.ilo.evaluate(&ilo("ilo4", "2.70")).status, Status::Critical);
        assert_eq!(rules.ilo.evaluate(&ilo("ilo4", "2.75")).status, Status::Ok);
        assert_eq!(
            rules.ilo.evaluate(&ilo("ilo4", "2.80 Jul 21 2021")).status,
            Status::Ok
        );
        assert_eq!(rules.ilo.evaluate(&ilo("ilo3", "1.92")).status, Status::Critical);
        assert_eq!(rules.ilo.evaluate(&ilo("ilo5", "2.18")).status, Status::Ok);
        assert_eq!(rules.ilo.evaluate(&ilo("ilo5", "1.40")).status, Status::Critical);

        assert_eq!(rules.ilo.evaluate(&ilo("ilo2", "1.00")).status, Status::Ok);
        assert_eq!(rules.ilo.evaluate(&ilo("ilo4", "")).status, Status::Warning);
    }

    #[test]
    fn test_ilo_prefixed_firmware_is_unknown() {
        let rules = RuleSet::hpe();
        let result = rules.ilo.evaluate(&Ilo {
            model: "ilo5".to_string(),
            firmware: "v1.20".to_string(),
        });

        assert_eq!(result.status, Status::Warning);
        assert_eq!(
            result.message,
            "iLO model=ilo5 firmware=v1.20 - firmware version unknown"
        );
    }

    #[test]
    fn test_controller_prefixed_firmware_is_unknown() {
        let rules = RuleSet::hpe();
        let result = rules
            .controllers
            .evaluate(&controller("V2.60", Some(&[RaidLevel::Raid1])));

        assert_eq!(result.status, Status::Warning);
        assert!(result.message.ends_with("firmware version unknown"));
    }
}
