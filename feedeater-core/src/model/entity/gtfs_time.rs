use std::{fmt::Display, str::FromStr};

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

/// a GTFS time of day in seconds since noon minus twelve hours of the service
/// day. values past `24:00:00` are valid and denote trips that run past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GtfsTime(pub u32);

impl GtfsTime {
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> GtfsTime {
        GtfsTime(hours * 3600 + minutes * 60 + seconds)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }
}

impl Display for GtfsTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for GtfsTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .trim()
            .split(':')
            .map(|p| p.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid GTFS time '{s}': {e}"))?;
        match parts[..] {
            [h, m, sec] if m < 60 && sec < 60 => Ok(GtfsTime::from_hms(h, m, sec)),
            _ => Err(format!("invalid GTFS time '{s}', expected HH:MM:SS")),
        }
    }
}

impl Serialize for GtfsTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GtfsTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        GtfsTime::from_str(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::GtfsTime;
    use std::str::FromStr;

    #[test]
    fn test_past_midnight() {
        let time = GtfsTime::from_str("25:03:09").expect("should parse");
        assert_eq!(time.seconds(), 25 * 3600 + 3 * 60 + 9);
        assert_eq!(time.to_string(), "25:03:09");
    }

    #[test]
    fn test_invalid() {
        assert!(GtfsTime::from_str("12:60:00").is_err());
        assert!(GtfsTime::from_str("12:00").is_err());
        assert!(GtfsTime::from_str("noon").is_err());
    }
}
