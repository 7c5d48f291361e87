//! Duration literal parsing.
//!
//! Accepts a sequence of decimal numbers, each with an optional fraction and
//! a mandatory unit suffix, such as `300ms`, `1.5h` or `2h45m`. Valid units
//! are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. A bare `0` needs no
//! unit. A leading `+` is accepted; a leading `-` is only accepted for a zero
//! duration because [`Duration`] cannot be negative.

use std::time::Duration;

use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits past this count cannot change a nanosecond result.
const MAX_FRACTION_DIGITS: usize = 18;

/// Failure to parse a duration literal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DurationError {
    /// The literal is empty or contains a component without digits.
    #[error("expected a number followed by a unit, such as 5s or 1h30m")]
    InvalidFormat,
    /// A number is not followed by a unit.
    #[error("missing unit; expected one of ns, us, ms, s, m, h")]
    MissingUnit,
    /// A unit suffix is not recognised.
    #[error("unknown unit {unit:?}; expected one of ns, us, ms, s, m, h")]
    UnknownUnit {
        /// Rejected suffix.
        unit: String,
    },
    /// The literal denotes a negative duration.
    #[error("negative durations are not supported")]
    Negative,
    /// The literal exceeds the representable range.
    #[error("duration is too large")]
    Overflow,
}

/// Parse a duration literal such as `5s` or `1h30m`.
///
/// # Errors
///
/// Returns a [`DurationError`] if `raw` does not follow the grammar
/// described in the module documentation or exceeds `u64::MAX` nanoseconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use layered_config::coerce::parse_duration;
///
/// assert_eq!(parse_duration("1m30s")?, Duration::from_secs(90));
/// assert_eq!(parse_duration("1.5ms")?, Duration::from_micros(1_500));
/// # Ok::<(), layered_config::coerce::DurationError>(())
/// ```
pub fn parse_duration(raw: &str) -> Result<Duration, DurationError> {
    let negative = raw.starts_with('-');
    let body = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(DurationError::InvalidFormat);
    }

    let mut total: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (component, remainder) = parse_component(rest)?;
        total = total
            .checked_add(component)
            .ok_or(DurationError::Overflow)?;
        rest = remainder;
    }

    if negative && total != 0 {
        return Err(DurationError::Negative);
    }
    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| DurationError::Overflow)
}

/// Parse one `<whole>[.<fraction>]<unit>` component, returning its value in
/// nanoseconds and the unparsed remainder.
fn parse_component(input: &str) -> Result<(u128, &str), DurationError> {
    let (whole, after_whole) = split_while(input, |c| c.is_ascii_digit());
    let (fraction, after_fraction) = after_whole
        .strip_prefix('.')
        .map_or(("", after_whole), |tail| {
            split_while(tail, |c| c.is_ascii_digit())
        });
    if whole.is_empty() && fraction.is_empty() {
        return Err(DurationError::InvalidFormat);
    }

    let (unit, remainder) = split_while(after_fraction, |c| !(c.is_ascii_digit() || c == '.'));
    if unit.is_empty() {
        return Err(DurationError::MissingUnit);
    }
    let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
        unit: unit.to_owned(),
    })?;

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| DurationError::Overflow)?
    };
    let whole_nanos = whole_value
        .checked_mul(scale)
        .ok_or(DurationError::Overflow)?;
    let nanos = whole_nanos
        .checked_add(fraction_nanos(fraction, scale)?)
        .ok_or(DurationError::Overflow)?;
    Ok((nanos, remainder))
}

/// Convert fractional digits of a `scale`-nanosecond unit to nanoseconds,
/// truncating anything below one nanosecond.
fn fraction_nanos(fraction: &str, scale: u128) -> Result<u128, DurationError> {
    if fraction.is_empty() {
        return Ok(0);
    }
    let digits = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    let numerator = digits
        .parse::<u128>()
        .map_err(|_| DurationError::InvalidFormat)?;
    let exponent = u32::try_from(digits.len()).map_err(|_| DurationError::Overflow)?;
    let denominator = 10_u128
        .checked_pow(exponent)
        .ok_or(DurationError::Overflow)?;
    numerator
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_div(denominator))
        .ok_or(DurationError::Overflow)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Split `input` at the first character failing `keep`.
fn split_while(input: &str, keep: fn(char) -> bool) -> (&str, &str) {
    let end = input.find(|c: char| !keep(c)).unwrap_or(input.len());
    input.split_at(end)
}
