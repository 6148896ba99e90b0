use std::time::Duration;

use crate::error::ConfigError;

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parse duration strings like "2s", "500ms", "1.5m", "0ns"
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDuration(s.to_string()))?;
            if !val.is_finite() || val < 0.0 {
                return Err(ConfigError::InvalidDuration(s.to_string()));
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    Err(ConfigError::InvalidDuration(s.to_string()))
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0ns".to_string()
    } else if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.0}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Seconds from midnight at which the simulated shift starts (06:00:00).
const SHIFT_START_SECS: u64 = 6 * 3600;

/// Format a simulated offset (milliseconds since start) as a shift clock `HH:MM:SS`.
pub fn format_shift_clock(elapsed_ms: u64) -> String {
    let secs = (SHIFT_START_SECS + elapsed_ms / 1_000) % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Serde adapter reading durations as human strings ("2s") or whole milliseconds.
pub mod human {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => Ok(Duration::from_millis(ms)),
            Raw::Text(s) => super::parse_duration(&s).map_err(D::Error::custom),
        }
    }

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = value.as_nanos();
        let text = if nanos % 1_000_000 == 0 {
            format!("{}ms", nanos / 1_000_000)
        } else {
            format!("{}ns", nanos)
        };
        serializer.serialize_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        let d = parse_duration("2.5s").unwrap();
        assert!((d.as_secs_f64() - 2.5).abs() < 0.0001);
    }

    #[test]
    fn test_parse_milliseconds() {
        let d = parse_duration("750ms").unwrap();
        assert_eq!(d.as_millis(), 750);
    }

    #[test]
    fn test_parse_minutes() {
        let d = parse_duration("1.5m").unwrap();
        assert_eq!(d.as_secs(), 90);
    }

    #[test]
    fn test_parse_zero() {
        let d = parse_duration("0s").unwrap();
        assert!(d.is_zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_duration("soon"),
            Err(ConfigError::InvalidDuration(_))
        ));
        assert!(parse_duration("5").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Interval {
        #[serde(with = "human")]
        every: Duration,
    }

    #[test]
    fn test_human_serde_keeps_sub_millisecond_precision() {
        for every in [
            Duration::from_micros(500),
            Duration::from_nanos(1_500_001),
            Duration::from_millis(2_000),
        ] {
            let json = serde_json::to_string(&Interval { every }).unwrap();
            let back: Interval = serde_json::from_str(&json).unwrap();
            assert_eq!(back.every, every, "{}", json);
        }

        let json = serde_json::to_value(Interval {
            every: Duration::from_micros(500),
        })
        .unwrap();
        assert_eq!(json["every"], "500000ns");
        let json = serde_json::to_value(Interval {
            every: Duration::from_secs(2),
        })
        .unwrap();
        assert_eq!(json["every"], "2000ms");
    }

    #[test]
    fn test_shift_clock() {
        assert_eq!(format_shift_clock(0), "06:00:00");
        assert_eq!(format_shift_clock(3_723_000), "07:02:03");
        assert_eq!(format_shift_clock(18 * 3_600_000), "00:00:00");
    }
}
