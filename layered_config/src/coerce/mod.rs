//! String-to-value coercion for leaf fields.
//!
//! Every source hands the resolver untyped strings. [`apply`] converts one of
//! them into the semantic type of a [`FieldSlot`] and writes it through the
//! slot. Dispatch is a closed match over [`FieldKind`]: each arm owns its own
//! parse and range check, so adding a kind means adding an arm here.

mod duration;
mod error;
mod slot;

pub use duration::{DurationError, parse_duration};
pub use error::CoercionError;
pub use slot::{FieldKind, FieldSlot};

use std::num::IntErrorKind;

/// Coerce `raw` into the slot's kind and store it.
///
/// Strings are stored verbatim. Integers are parsed in base 10 and
/// range-checked against the declared width; unsigned kinds reject any sign.
/// Durations use the `<number><unit>` grammar described on
/// [`parse_duration`].
///
/// # Errors
///
/// Returns a [`CoercionError`] describing why `raw` could not be converted.
/// [`CoercionError::UnsupportedKind`] is returned for slots with no registered
/// conversion; the loader escalates it to a fatal schema error.
///
/// # Examples
///
/// ```
/// use layered_config::coerce::{self, FieldSlot};
///
/// let mut port = 0_u16;
/// coerce::apply(FieldSlot::U16(&mut port), "8080")?;
/// assert_eq!(port, 8080);
/// # Ok::<(), layered_config::coerce::CoercionError>(())
/// ```
pub fn apply(slot: FieldSlot<'_>, raw: &str) -> Result<(), CoercionError> {
    match slot {
        FieldSlot::Bool(target) => *target = parse_bool(raw)?,
        FieldSlot::I8(target) => *target = parse_signed(raw, FieldKind::I8)?,
        FieldSlot::I16(target) => *target = parse_signed(raw, FieldKind::I16)?,
        FieldSlot::I32(target) => *target = parse_signed(raw, FieldKind::I32)?,
        FieldSlot::I64(target) => *target = parse_signed(raw, FieldKind::I64)?,
        FieldSlot::Isize(target) => *target = parse_signed(raw, FieldKind::Isize)?,
        FieldSlot::U8(target) => *target = parse_unsigned(raw, FieldKind::U8)?,
        FieldSlot::U16(target) => *target = parse_unsigned(raw, FieldKind::U16)?,
        FieldSlot::U32(target) => *target = parse_unsigned(raw, FieldKind::U32)?,
        FieldSlot::U64(target) => *target = parse_unsigned(raw, FieldKind::U64)?,
        FieldSlot::Usize(target) => *target = parse_unsigned(raw, FieldKind::Usize)?,
        FieldSlot::F32(target) => *target = parse_float(raw)?,
        FieldSlot::F64(target) => *target = parse_float(raw)?,
        FieldSlot::Str(target) => raw.clone_into(target),
        FieldSlot::Duration(target) => {
            *target = parse_duration(raw).map_err(|source| CoercionError::InvalidDuration {
                value: raw.to_owned(),
                source,
            })?;
        }
        FieldSlot::Unsupported => return Err(CoercionError::UnsupportedKind),
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionError::InvalidBool {
            value: raw.to_owned(),
        }),
    }
}

fn parse_signed<T>(raw: &str, kind: FieldKind) -> Result<T, CoercionError>
where
    T: TryFrom<i64>,
{
    let wide = raw
        .parse::<i64>()
        .map_err(|source| integer_error(raw, kind, source))?;
    T::try_from(wide).map_err(|_| out_of_range(raw, kind))
}

fn parse_unsigned<T>(raw: &str, kind: FieldKind) -> Result<T, CoercionError>
where
    T: TryFrom<u64>,
{
    if raw.starts_with(['+', '-']) {
        return Err(CoercionError::UnexpectedSign {
            value: raw.to_owned(),
            kind,
        });
    }
    let wide = raw
        .parse::<u64>()
        .map_err(|source| integer_error(raw, kind, source))?;
    T::try_from(wide).map_err(|_| out_of_range(raw, kind))
}

fn integer_error(raw: &str, kind: FieldKind, source: std::num::ParseIntError) -> CoercionError {
    match source.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(raw, kind),
        _ => CoercionError::InvalidInteger {
            value: raw.to_owned(),
            source,
        },
    }
}

fn out_of_range(raw: &str, kind: FieldKind) -> CoercionError {
    CoercionError::OutOfRange {
        value: raw.to_owned(),
        kind,
    }
}

fn parse_float<T>(raw: &str) -> Result<T, CoercionError>
where
    T: std::str::FromStr<Err = std::num::ParseFloatError>,
{
    raw.parse::<T>().map_err(|source| CoercionError::InvalidFloat {
        value: raw.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests;
