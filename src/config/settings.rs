use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Базовые настройки проверки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Настройки подключения
    pub connection: ConnectionSettings,
    /// Настройки аутентификации
    pub auth: AuthSettings,
    /// Что проверять
    pub check: CheckSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    /// Таймаут для SNMP операций (секунды)
    pub timeout: u64,
    /// Версия SNMP: 1, 2c
    pub protocol: String,
    pub family: IpFamily,
}

/// Семейство адресов для подключения
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpFamily {
    #[default]
    Any,
    V4,
    V6,
}

impl IpFamily {
    pub fn accepts(self, addr: &SocketAddr) -> bool {
        match self {
            IpFamily::Any => true,
            IpFamily::V4 => addr.is_ipv4(),
            IpFamily::V6 => addr.is_ipv6(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Настройки SNMPv2c
    pub v2c: SnmpV2cSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnmpV2cSettings {
    /// Community string
    pub community: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Не проверять версию iLO
    pub ignore_ilo: bool,
    /// Читать данные из записанного snmpwalk вместо устройства
    pub snmpwalk_file: Option<PathBuf>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 161,
            timeout: 15,
            protocol: "2c".to_string(),
            family: IpFamily::Any,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            v2c: SnmpV2cSettings {
                community: "public".to_string(),
            },
        }
    }
}

impl Settings {
    /// Загружает настройки из YAML, отсутствующие поля берутся по умолчанию
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Не удалось прочитать файл: {}", path.display()))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content).context("Не удалось распарсить YAML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.connection.host, "localhost");
        assert_eq!(settings.connection.port, 161);
        assert_eq!(settings.connection.timeout, 15);
        assert_eq!(settings.connection.protocol, "2c");
        assert_eq!(settings.auth.v2c.community, "public");
        assert!(!settings.check.ignore_ilo);
    }

    #[test]
    fn test_partial_yaml() {
        let settings = Settings::from_yaml(
            "connection:\n  host: srv-db01\n  family: v6\ncheck:\n  ignore_ilo: true\n",
        )
        .unwrap();

        assert_eq!(settings.connection.host, "srv-db01");
        assert_eq!(settings.connection.family, IpFamily::V6);
        assert_eq!(settings.connection.timeout, 15);
        assert_eq!(settings.auth.v2c.community, "public");
        assert!(settings.check.ignore_ilo);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Settings::from_yaml("connection: [1, 2").is_err());
    }

    #[test]
    fn test_family_accepts() {
        let v4: SocketAddr = "127.0.0.1:161".parse().unwrap();
        let v6: SocketAddr = "[::1]:161".parse().unwrap();

        assert!(IpFamily::Any.accepts(&v4));
        assert!(IpFamily::V4.accepts(&v4));
        assert!(!IpFamily::V4.accepts(&v6));
        assert!(IpFamily::V6.accepts(&v6));
    }
}
