use std::env;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod settings;

pub use settings::{IpFamily, Settings};

use crate::errors::CheckError;
use crate::snmp::SnmpVersion;

/// Главная конфигурация проверки
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub settings: Settings,
}

impl AppConfig {
    /// Настройки по умолчанию или из YAML файла, поверх - переменные окружения
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self> {
        let settings = match path {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let mut config = Self { settings };
        config.apply_env(|key| env::var(key).ok());

        Ok(config)
    }

    /// SNMP_TARGET, SNMP_COMMUNITY, SNMP_TIMEOUT, SNMP_PROTOCOL
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let connection = &mut self.settings.connection;

        if let Some(target) = var("SNMP_TARGET") {
            connection.host = target;
        }

        if let Some(timeout) = var("SNMP_TIMEOUT").and_then(|s| s.parse().ok()) {
            connection.timeout = timeout;
        }

        if let Some(protocol) = var("SNMP_PROTOCOL") {
            connection.protocol = protocol;
        }

        if let Some(community) = var("SNMP_COMMUNITY") {
            self.settings.auth.v2c.community = community;
        }
    }

    pub fn get_target(&self) -> &str {
        &self.settings.connection.host
    }

    pub fn get_timeout(&self) -> u64 {
        self.settings.connection.timeout
    }

    pub fn get_community(&self) -> Vec<u8> {
        self.settings.auth.v2c.community.clone().into_bytes()
    }

    /// Проверяется до любого обращения к устройству
    pub fn get_protocol(&self) -> Result<SnmpVersion, CheckError> {
        self.settings.connection.protocol.parse()
    }

    pub fn debug_config(&self) {
        let connection = &self.settings.connection;

        debug!(
            target_host = %connection.host,
            port = connection.port,
            timeout = connection.timeout,
            protocol = %connection.protocol,
            family = ?connection.family,
            file = ?self.settings.check.snmpwalk_file,
            ignore_ilo = self.settings.check.ignore_ilo,
            "Конфигурация проверки"
        );
    }
}
