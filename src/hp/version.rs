use std::cmp::Ordering;
use std::fmt;

/// Версия прошивки: необязательный буквенный префикс (`HPD`) и числовые сегменты.
///
/// Сегменты сравниваются как числа, недостающие хвостовые сегменты считаются 0.
/// Версии с разными префиксами не сравнимы.
#[derive(Debug, Clone, Eq)]
pub struct FirmwareVersion {
    prefix: String,
    segments: Vec<u64>,
}

impl FirmwareVersion {
    pub fn new(prefix: &str, segments: &[u64]) -> Self {
        Self {
            prefix: prefix.to_ascii_uppercase(),
            segments: segments.to_vec(),
        }
    }

    /// Берет первое слово строки: `2.75 Jan 26 2020` -> `2.75`
    pub fn parse(s: &str) -> Option<Self> {
        let token = s.split_whitespace().next()?;
        let digits_at = token.find(|c: char| c.is_ascii_digit())?;
        let (prefix, rest) = token.split_at(digits_at);

        if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let segments = rest
            .split('.')
            .map(|segment| segment.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        Some(Self {
            prefix: prefix.to_ascii_uppercase(),
            segments,
        })
    }

    /// Сравнимы ли версии вообще (одинаковый префикс)
    pub fn comparable(&self, other: &Self) -> bool {
        self.partial_cmp(other).is_some()
    }

    fn segment(&self, i: usize) -> u64 {
        self.segments.get(i).copied().unwrap_or(0)
    }
}

impl PartialEq for FirmwareVersion {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for FirmwareVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.prefix != other.prefix {
            return None;
        }

        let len = self.segments.len().max(other.segments.len());
        let ordering = (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal);

        Some(ordering)
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        write!(f, "{}{}", self.prefix, segments.join("."))
    }
}

/// Включительный диапазон версий
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub min: FirmwareVersion,
    pub max: FirmwareVersion,
}

impl VersionRange {
    pub fn contains(&self, version: &FirmwareVersion) -> bool {
        version >= &self.min && version <= &self.max
    }
}
