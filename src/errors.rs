use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// Пустая таблица для класса устройств
    #[error("No HP {class} data found!")]
    NoData { class: &'static str },

    #[error("unknown SNMP version: {0}")]
    UnsupportedVersion(String),

    #[error("{0} not implemented")]
    NotImplemented(&'static str),

    #[error("SNMP timeout after {0}s")]
    Timeout(u64),

    #[error("SNMP error: {0}")]
    Transport(String),
}
