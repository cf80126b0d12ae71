use anyhow::{Context, Result};
use snmp2::Oid;

/// Проверяет, что строка является числовым OID вида `.1.3.6.1`
pub fn is_oid(oid: &str) -> bool {
    if oid.len() < 2 || !oid.starts_with('.') {
        return false;
    }

    let mut last = '.';

    for ch in oid[1..].chars() {
        match ch {
            '.' if last == '.' => return false,
            '.' => {}
            '0'..='9' => {}
            _ => return false,
        }
        last = ch;
    }

    last != '.'
}

/// Проверяет, что `oid` равен `base` или лежит под ним (по границе метки)
pub fn is_sub_oid(oid: &str, base: &str) -> bool {
    if !is_oid(oid) || !is_oid(base) {
        return false;
    }

    match oid.strip_prefix(base) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// Возвращает часть `oid` после `base.`, например индекс строки таблицы
pub fn sub_oid<'a>(oid: &'a str, base: &str) -> Option<&'a str> {
    if !is_sub_oid(oid, base) {
        return None;
    }

    oid.strip_prefix(base).and_then(|rest| rest.strip_prefix('.'))
}

/// Парсит строку OID в объект Oid транспорта
pub fn parse_oid(s: &str) -> Result<Oid<'static>> {
    let parts: Result<Vec<u64>, _> = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.context(format!("Невалидный OID: {}", s))?;
    Oid::from(&parts)
        .map_err(|e| anyhow::anyhow!("Не удалось создать Oid из '{}': {:?}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_oid() {
        assert!(is_oid(".1.1"));
        assert!(is_oid(".1"));
        assert!(is_oid(".1.3.6.1.4.1.232.3.2.3.1.1.5"));

        assert!(!is_oid(""));
        assert!(!is_oid("."));
        assert!(!is_oid("1.1"));
        assert!(!is_oid(".1..1"));
        assert!(!is_oid(".1.1."));
        assert!(!is_oid(".1.a.1"));
        assert!(!is_oid(".1. 1"));
    }

    #[test]
    fn test_is_sub_oid() {
        assert!(is_sub_oid(".1.3.6.1.1.5.1.1", ".1.3.6.1.1.5"));
        assert!(is_sub_oid(".1.3.6.1.1.5", ".1.3.6.1.1.5"));

        assert!(!is_sub_oid(".1.3.6.1.1.50", ".1.3.6.1.1.5"));
        assert!(!is_sub_oid(".1.10", ".1.1"));
        assert!(!is_sub_oid(".1.3", ".1.3.6"));
        assert!(!is_sub_oid("1.3.6.1", ".1.3"));
        assert!(!is_sub_oid(".1.3.6", "1.3"));
    }

    #[test]
    fn test_sub_oid() {
        assert_eq!(sub_oid(".1.3.6.1.1.5.1.1", ".1.3.6.1.1.5"), Some("1.1"));
        assert_eq!(sub_oid(".1.3.6.1.1.5.0", ".1.3.6.1.1.5"), Some("0"));

        assert_eq!(sub_oid(".1.3.6.1.1.5", ".1.3.6.1.1.5"), None);
        assert_eq!(sub_oid(".1.3.6.1.1.50", ".1.3.6.1.1.5"), None);
        assert_eq!(sub_oid(".1..3", ".1"), None);
    }

    #[test]
    fn test_parse_oid() {
        let oid = parse_oid(".1.3.6.1.4.1.232").unwrap();
        assert_eq!(
            oid.to_string(),
            parse_oid("1.3.6.1.4.1.232").unwrap().to_string()
        );

        assert!(parse_oid(".1.3.x").is_err());
    }
}
