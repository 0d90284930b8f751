use serde::{Deserialize, Serialize};

/// Coarse priority band over the store's 0-9 integer scale.
///
/// Lower non-zero native values are more urgent, so `High` writes 1 and
/// `Low` writes 9. Reading uses the matching bands: 1-4 high, 5 medium,
/// 6-9 low, 0 none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub const NATIVE_HIGH: u8 = 1;
    pub const NATIVE_MEDIUM: u8 = 5;
    pub const NATIVE_LOW: u8 = 9;

    pub fn to_native(self) -> u8 {
        match self {
            Priority::None => 0,
            Priority::High => Self::NATIVE_HIGH,
            Priority::Medium => Self::NATIVE_MEDIUM,
            Priority::Low => Self::NATIVE_LOW,
        }
    }

    pub fn from_native(value: u8) -> Self {
        match value {
            0 => Priority::None,
            1..=4 => Priority::High,
            5 => Priority::Medium,
            // anything past 9 is out of range for the store; treat as least urgent
            _ => Priority::Low,
        }
    }

    /// Whether a raw native priority falls inside this band.
    pub fn contains(self, native: u8) -> bool {
        Self::from_native(native) == self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Priority::None),
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_band_round_trips() {
        for band in [Priority::None, Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::from_native(band.to_native()), band, "{:?}", band);
            assert!(band.contains(band.to_native()));
        }
    }

    #[test]
    fn test_read_bands() {
        assert_eq!(Priority::from_native(0), Priority::None);
        for v in 1..=4 {
            assert_eq!(Priority::from_native(v), Priority::High);
        }
        assert_eq!(Priority::from_native(5), Priority::Medium);
        for v in 6..=9 {
            assert_eq!(Priority::from_native(v), Priority::Low);
        }
        assert_eq!(Priority::from_native(42), Priority::Low);
    }

    #[test]
    fn test_low_is_not_written_into_high_band() {
        // regression: low used to be written as 9 but read back through a 6-9 "high" band
        assert!(!Priority::High.contains(Priority::Low.to_native()));
        assert!(!Priority::Low.contains(Priority::High.to_native()));
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" none ".parse::<Priority>().unwrap(), Priority::None);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
