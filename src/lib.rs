pub mod check;
pub mod collector;
pub mod config;
pub mod errors;
pub mod formatter;
pub mod hp;
pub mod nagios;
pub mod snmp;
