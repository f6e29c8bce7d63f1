//! Playback `Range` directive sent with PLAY (RFC 2326 §12.29).
//!
//! ```text
//! Range: clock=20230102T150405Z-
//! Range: npt=12.5-
//! Range: smpte=0:01:30-
//! ```
//!
//! Only open-ended ranges (a start, no end) are produced: a static source
//! reads from the start point until the stream terminates.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::{RangeType, SourceConfig};
use crate::error::{Result, SourceError};

const CLOCK_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Value of the `Range` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeHeader {
    /// Absolute UTC start time.
    Clock { start: DateTime<Utc> },
    /// Normal play time offset from the beginning of the presentation.
    Npt { start: Duration },
    /// SMPTE timecode offset, with an optional frame number.
    Smpte { start: Duration, frame: u32 },
}

impl RangeHeader {
    /// Build the directive requested by `config`, if any.
    pub fn from_config(config: &SourceConfig) -> Result<Option<Self>> {
        let value = config.range_start.trim();
        let invalid = |reason: String| SourceError::InvalidRange {
            kind: config.range_type,
            value: value.to_string(),
            reason,
        };

        let header = match config.range_type {
            RangeType::Undefined => return Ok(None),
            RangeType::Clock => {
                let naive = NaiveDateTime::parse_from_str(value, CLOCK_FORMAT)
                    .map_err(|e| invalid(e.to_string()))?;
                Self::Clock {
                    start: naive.and_utc(),
                }
            }
            RangeType::Npt => Self::Npt {
                start: parse_duration(value).map_err(invalid)?,
            },
            RangeType::Smpte => Self::Smpte {
                start: parse_duration(value).map_err(invalid)?,
                frame: 0,
            },
        };

        Ok(Some(header))
    }
}

impl fmt::Display for RangeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clock { start } => write!(f, "clock={}-", start.format(CLOCK_FORMAT)),
            Self::Npt { start } => write!(f, "npt={}-", start.as_secs_f64()),
            Self::Smpte { start, frame } => {
                let secs = start.as_secs();
                write!(
                    f,
                    "smpte={}:{:02}:{:02}",
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                )?;
                if *frame > 0 {
                    write!(f, ":{frame}")?;
                }
                f.write_str("-")
            }
        }
    }
}

/// Parse a duration such as `1h2m3.5s`, `500ms` or `0`.
///
/// Units: `h`, `m`, `s`, `ms`, `us` (or `µs`), `ns`. Negative values are
/// rejected since a range start cannot precede the presentation. Every
/// component may carry a fraction (`30.5s`, `1.5h`, `.5s`), which
/// `humantime` does not accept.
fn parse_duration(input: &str) -> std::result::Result<Duration, String> {
    if input.is_empty() {
        return Err("empty duration".to_string());
    }
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if input.starts_with('-') {
        return Err("negative duration".to_string());
    }

    let mut rest = input.strip_prefix('+').unwrap_or(input);
    let mut total_nanos: u128 = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration '{input}'"))?;
        let (whole, fraction) = match rest[..number_len].split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (&rest[..number_len], ""),
        };
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(format!("invalid number in duration '{input}'"));
        }
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit_nanos: u128 = match &rest[..unit_len] {
            "h" => 3_600_000_000_000,
            "m" => 60_000_000_000,
            "s" => 1_000_000_000,
            "ms" => 1_000_000,
            "us" | "µs" => 1_000,
            "ns" => 1,
            unit => return Err(format!("unknown unit '{unit}' in duration '{input}'")),
        };
        rest = &rest[unit_len..];

        let overflow = || format!("duration '{input}' out of range");
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(unit_nanos).ok_or_else(overflow)?;
        // Digits beyond nanosecond precision are dropped.
        let fraction = &fraction[..fraction.len().min(18)];
        if !fraction.is_empty() {
            let digits: u128 = fraction.parse().map_err(|_| overflow())?;
            nanos += digits * unit_nanos / 10u128.pow(fraction.len() as u32);
        }
        total_nanos = total_nanos.checked_add(nanos).ok_or_else(overflow)?;
    }

    let secs = u64::try_from(total_nanos / 1_000_000_000).map_err(|_| {
        format!("duration '{input}' out of range")
    })?;
    Ok(Duration::new(secs, (total_nanos % 1_000_000_000) as u32))
}
