use std::path::PathBuf;

use clap::Parser;

use check_hp_firmware::config::{AppConfig, IpFamily};

pub const README: &str = "\
Icinga / Nagios check plugin to verify HPE controllers, SSD disks or iLO are not
affected by certain vulnerabilities.

HPE Controllers
  Smart Array SR Gen10 firmware 1.98 through 2.62 may cause data inconsistency on
  RAID 1/10/ADM and RAID 5/6/50/60. Firmware 2.65 or later is required.

HPE SSD SAS disks
  Certain HPE SAS SSD models fail at 32,768 or 40,000 hours of operation. The
  check raises CRITICAL with \"affected by FW bug\" until the fixed firmware is
  installed, and reports \"firmware update applied\" afterwards.

HPE Integrated Lights-Out
  iLO 3 below 1.93, iLO 4 below 2.75 and iLO 5 below 2.18 are CRITICAL.

Read the HPE documentation! There is ABSOLUTELY NO WARRANTY.";

#[derive(Debug, Parser)]
#[command(
    name = "check_hp_firmware",
    about = "Check HPE controllers, SSDs and iLO for known firmware defects",
    long_about = README,
    disable_version_flag = true
)]
pub struct Cli {
    /// SNMP host
    #[arg(short = 'H', long)]
    pub hostname: Option<String>,

    /// SNMP port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// SNMP community
    #[arg(short = 'c', long)]
    pub community: Option<String>,

    /// SNMP protocol (1, 2c)
    #[arg(short = 'P', long)]
    pub protocol: Option<String>,

    /// SNMP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Read output from snmpwalk instead of querying the device
    #[arg(long, value_name = "FILE")]
    pub snmpwalk_file: Option<PathBuf>,

    /// Don't check the iLO version
    #[arg(long)]
    pub ignore_ilo_version: bool,

    /// iLO is checked by default, kept for old command lines
    #[arg(short = 'I', long, hide = true)]
    pub ilo: bool,

    /// Use IPv4
    #[arg(short = '4', long, conflicts_with = "ipv6")]
    pub ipv4: bool,

    /// Use IPv6
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// YAML file with connection settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show version
    #[arg(short = 'V', long)]
    pub version: bool,
}

impl Cli {
    /// Флаги командной строки имеют приоритет над файлом и окружением
    pub fn apply(&self, config: &mut AppConfig) {
        let settings = &mut config.settings;

        if let Some(hostname) = &self.hostname {
            settings.connection.host = hostname.clone();
        }
        if let Some(port) = self.port {
            settings.connection.port = port;
        }
        if let Some(community) = &self.community {
            settings.auth.v2c.community = community.clone();
        }
        if let Some(protocol) = &self.protocol {
            settings.connection.protocol = protocol.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.connection.timeout = timeout;
        }
        if let Some(file) = &self.snmpwalk_file {
            settings.check.snmpwalk_file = Some(file.clone());
        }
        if self.ignore_ilo_version {
            settings.check.ignore_ilo = true;
        }
        if self.ipv4 {
            settings.connection.family = IpFamily::V4;
        } else if self.ipv6 {
            settings.connection.family = IpFamily::V6;
        }
    }
}
