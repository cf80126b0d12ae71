use anyhow::Result;

pub mod capture;
pub mod oid;
pub mod session;
pub mod version;

pub use capture::Capture;
pub use oid::{is_oid, is_sub_oid, parse_oid, sub_oid};
pub use session::SnmpSession;
pub use version::SnmpVersion;

use crate::collector::Sample;

/// Источник SNMP данных: живое устройство или записанный snmpwalk
pub enum Transport {
    Session(SnmpSession),
    Capture(Capture),
}

impl Transport {
    pub async fn walk(&mut self, root: &str) -> Result<Vec<Sample>> {
        match self {
            Transport::Session(session) => session.walk(root).await,
            Transport::Capture(capture) => Ok(capture.walk(root)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Transport::Session(_) => "snmp",
            Transport::Capture(_) => "snmpwalk-file",
        }
    }
}
