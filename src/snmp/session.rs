use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use snmp2::snmp::{ERRSTATUS_NOERROR, ERRSTATUS_NOSUCHNAME};
use snmp2::{AsyncSession, Oid, Value};
use tracing::debug;

use super::oid::parse_oid;
use super::version::SnmpVersion;
use crate::collector::Sample;
use crate::config::IpFamily;

/// Сколько строк просить в одном GETBULK
const MAX_REPETITIONS: u32 = 10;

/// Живая SNMP сессия v1/v2c
pub struct SnmpSession {
    session: AsyncSession,
    version: SnmpVersion,
}

impl SnmpSession {
    pub async fn new(
        host: &str,
        port: u16,
        family: IpFamily,
        version: SnmpVersion,
        community: &[u8],
    ) -> Result<Self> {
        let target = resolve(host, port, family).await?;
        debug!(%target, ?version, "Открываем SNMP сессию");

        let session = match version {
            SnmpVersion::V1 => AsyncSession::new_v1(target, community, 0).await,
            SnmpVersion::V2c => AsyncSession::new_v2c(target, community, 0).await,
        }
        .context("Не удалось создать SNMP сессию")?;

        Ok(Self { session, version })
    }

    /// Обходит поддерево `root` и возвращает все значения под ним
    pub async fn walk(&mut self, root: &str) -> Result<Vec<Sample>> {
        let root_oid = parse_oid(root)?;

        match self.version {
            SnmpVersion::V1 => self.walk_next(&root_oid).await,
            SnmpVersion::V2c => self.walk_bulk(&root_oid, MAX_REPETITIONS).await,
        }
    }

    async fn walk_next(&mut self, start_oid: &Oid<'_>) -> Result<Vec<Sample>> {
        let mut results = Vec::new();
        let mut current_oid = start_oid.to_owned();

        loop {
            let resp = self
                .session
                .getnext(&current_oid)
                .await
                .context("SNMP GETNEXT запрос не удался")?;

            if end_of_walk(resp.error_status)? {
                break;
            }

            let Some((oid, value)) = resp.varbinds.into_iter().next() else {
                break;
            };

            let oid_str = format_oid(&oid);
            if !oid.starts_with(start_oid) || oid_str == format_oid(&current_oid) {
                break;
            }

            let Some(value) = value_to_string(&value) else {
                break;
            };

            results.push(Sample::new(oid_str, value));
            current_oid = oid.to_owned();
        }

        Ok(results)
    }

    async fn walk_bulk(
        &mut self,
        start_oid: &Oid<'_>,
        max_repetitions: u32,
    ) -> Result<Vec<Sample>> {
        let mut results = Vec::new();
        let mut current_oid = start_oid.to_owned();

        loop {
            // Выполняем SNMP GETBULK запрос
            let resp = self
                .session
                .getbulk(&[&current_oid], 0, max_repetitions)
                .await
                .context("SNMP GETBULK запрос не удался")?;

            if end_of_walk(resp.error_status)? {
                break;
            }

            let last = format_oid(&current_oid);
            let mut next_oid = None;

            for (oid, value) in resp.varbinds {
                if !oid.starts_with(start_oid) {
                    return Ok(results);
                }

                let Some(value) = value_to_string(&value) else {
                    return Ok(results);
                };

                let oid_str = format_oid(&oid);
                if oid_str == last {
                    // Агент не продвинулся - выходим, чтобы не зациклиться
                    return Ok(results);
                }

                results.push(Sample::new(oid_str, value));
                next_oid = Some(oid.to_owned());
            }

            match next_oid {
                Some(oid) => current_oid = oid,
                None => break,
            }
        }

        Ok(results)
    }
}

async fn resolve(host: &str, port: u16, family: IpFamily) -> Result<SocketAddr> {
    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .context(format!("Не удалось разрешить адрес: {}", host))?;

    addrs
        .find(|addr| family.accepts(addr))
        .ok_or_else(|| anyhow::anyhow!("Нет адреса {:?} для {}", family, host))
}

/// SNMPv1 агент сообщает о конце MIB через noSuchName, а не EndOfMibView
fn end_of_walk(error_status: u32) -> Result<bool> {
    match error_status {
        ERRSTATUS_NOERROR => Ok(false),
        ERRSTATUS_NOSUCHNAME => Ok(true),
        status => anyhow::bail!("Агент вернул ошибку, error-status {}", status),
    }
}

fn format_oid(oid: &Oid<'_>) -> String {
    let oid = oid.to_string();
    if oid.starts_with('.') {
        oid
    } else {
        format!(".{}", oid)
    }
}

/// Конвертирует SNMP значение в строку, `None` - конец MIB или нет объекта
fn value_to_string(value: &Value<'_>) -> Option<String> {
    let text = match value {
        Value::EndOfMibView | Value::NoSuchObject | Value::NoSuchInstance => return None,
        Value::OctetString(bytes) => String::from_utf8_lossy(bytes)
            .trim_end_matches('\0')
            .trim()
            .to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Counter32(n) | Value::Unsigned32(n) | Value::Timeticks(n) => n.to_string(),
        Value::Counter64(n) => n.to_string(),
        Value::IpAddress(octets) => Ipv4Addr::from(*octets).to_string(),
        Value::ObjectIdentifier(oid) => format_oid(oid),
        Value::Null => String::new(),
        other => format!("{:?}", other),
    };

    Some(text)
}
