use std::fmt;
use std::str::FromStr;

use crate::errors::CheckError;

/// Поддерживаемые версии SNMP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnmpVersion {
    V1,
    V2c,
}

impl FromStr for SnmpVersion {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(SnmpVersion::V1),
            "2" | "2c" => Ok(SnmpVersion::V2c),
            "3" => Err(CheckError::NotImplemented("SNMPv3 config")),
            other => Err(CheckError::UnsupportedVersion(other.to_string())),
        }
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnmpVersion::V1 => write!(f, "1"),
            SnmpVersion::V2c => write!(f, "2c"),
        }
    }
}
