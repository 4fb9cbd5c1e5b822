//! # walltime 解析
//!
//! 支持的格式：
//! - 整数秒：`3661` 或 `"3661"`
//! - 时钟格式：`"01:01:01"`, `"2-00:00:00"`（天-时:分:秒）
//! - 带单位：`"1h30m"`, `"90m"`, `"1.5h"`, `"500ms"`
//!
//! ## 依赖关系
//! - 被 `models/job.rs` 的 serde 反序列化使用
//! - 使用 `regex` crate

use crate::error::{JobgenError, Result};

use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

static CLOCK_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<days>\d+)-)?(?P<hours>\d+):(?P<mins>\d{1,2}):(?P<secs>\d{1,2})$")
        .expect("clock regex is valid")
});

static UNIT_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)?(?:ns|us|µs|ms|s|m|h|d))+$").expect("unit regex is valid")
});

static UNIT_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<value>\d+(?:\.\d+)?)(?P<unit>ns|us|µs|ms|s|m|h|d)")
        .expect("unit term regex is valid")
});

/// 解析 walltime 字符串
pub fn parse_walltime(text: &str) -> Result<Duration> {
    let trimmed = text.trim();
    let invalid = || JobgenError::InvalidWalltime(text.to_string());

    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let secs: u64 = trimmed.parse().map_err(|_| invalid())?;
        return Ok(Duration::from_secs(secs));
    }

    if let Some(caps) = CLOCK_FORMAT.captures(trimmed) {
        let field = |name: &str| -> Result<u64> {
            caps.name(name)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| invalid()))
                .unwrap_or(Ok(0))
        };
        let (days, hours, mins, secs) =
            (field("days")?, field("hours")?, field("mins")?, field("secs")?);
        if mins >= 60 || secs >= 60 {
            return Err(invalid());
        }
        let total = days
            .checked_mul(86_400)
            .and_then(|d| d.checked_add(hours.checked_mul(3600)?))
            .and_then(|t| t.checked_add(mins * 60 + secs))
            .ok_or_else(invalid)?;
        return Ok(Duration::from_secs(total));
    }

    if UNIT_FORMAT.is_match(trimmed) {
        let mut nanos: f64 = 0.0;
        for caps in UNIT_TERM.captures_iter(trimmed) {
            let value: f64 = caps["value"].parse().map_err(|_| invalid())?;
            let scale = match &caps["unit"] {
                "ns" => 1.0,
                "us" | "µs" => 1e3,
                "ms" => 1e6,
                "s" => 1e9,
                "m" => 60.0 * 1e9,
                "h" => 3600.0 * 1e9,
                _ => 86_400.0 * 1e9,
            };
            nanos += value * scale;
        }
        if !nanos.is_finite() || nanos > u64::MAX as f64 {
            return Err(invalid());
        }
        return Ok(Duration::from_nanos(nanos.round() as u64));
    }

    Err(invalid())
}

/// serde 反序列化：整数秒或字符串
pub fn deserialize_walltime<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct WalltimeVisitor;

    impl<'de> Visitor<'de> for WalltimeVisitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("seconds, \"HH:MM:SS\" or a duration such as \"1h30m\"")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Duration, E> {
            Ok(Duration::from_secs(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Duration, E> {
            u64::try_from(value)
                .map(Duration::from_secs)
                .map_err(|_| E::custom(format!("walltime must not be negative (got {})", value)))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Duration, E> {
            parse_walltime(value).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(WalltimeVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_walltime("3661").unwrap(), Duration::from_secs(3661));
        assert_eq!(parse_walltime("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_walltime("01:01:01").unwrap(), Duration::from_secs(3661));
        assert_eq!(parse_walltime("25:00:00").unwrap(), Duration::from_secs(90000));
        assert_eq!(
            parse_walltime("2-12:00:00").unwrap(),
            Duration::from_secs(2 * 86400 + 12 * 3600)
        );
        assert!(parse_walltime("01:75:00").is_err());
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_walltime("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_walltime("90m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_walltime("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_walltime("1h1m1s").unwrap(), Duration::from_secs(3661));
        assert_eq!(parse_walltime("1500ms").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_walltime(" 2d ").unwrap(), Duration::from_secs(172800));
    }

    #[test]
    fn test_parse_invalid() {
        for text in ["", "soon", "1x", "-5", "h1", "1:2"] {
            assert!(parse_walltime(text).is_err(), "'{}' should be rejected", text);
        }
    }

    #[derive(serde::Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_walltime")]
        walltime: Duration,
    }

    #[test]
    fn test_deserialize_integer_and_string() {
        let h: Holder = toml::from_str("walltime = 120").unwrap();
        assert_eq!(h.walltime, Duration::from_secs(120));
        let h: Holder = toml::from_str("walltime = \"2h\"").unwrap();
        assert_eq!(h.walltime, Duration::from_secs(7200));
    }

    #[test]
    fn test_deserialize_negative_rejected() {
        assert!(toml::from_str::<Holder>("walltime = -1").is_err());
    }
}
