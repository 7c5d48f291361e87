//! Coercion of raw strings into each field kind.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[case("1", true)]
#[case("t", true)]
#[case("T", true)]
#[case("TRUE", true)]
#[case("true", true)]
#[case("True", true)]
#[case("0", false)]
#[case("f", false)]
#[case("F", false)]
#[case("FALSE", false)]
#[case("false", false)]
#[case("False", false)]
fn accepts_boolean_tokens(#[case] raw: &str, #[case] expected: bool) -> Result<()> {
    let mut value = !expected;
    apply(FieldSlot::Bool(&mut value), raw).map_err(|err| anyhow!(err))?;
    ensure!(value == expected, "{raw:?} should parse as {expected}");
    Ok(())
}

#[rstest]
#[case("yes")]
#[case("tRuE")]
#[case("")]
#[case(" true")]
fn rejects_other_boolean_spellings(#[case] raw: &str) {
    let mut value = false;
    assert!(matches!(
        apply(FieldSlot::Bool(&mut value), raw),
        Err(CoercionError::InvalidBool { .. })
    ));
}

#[test]
fn signed_integers_accept_explicit_signs() -> Result<()> {
    let mut small = 0_i8;
    apply(FieldSlot::I8(&mut small), "-128").map_err(|err| anyhow!(err))?;
    ensure!(small == i8::MIN, "expected i8::MIN, got {small}");

    let mut wide = 0_i64;
    apply(FieldSlot::I64(&mut wide), "+42").map_err(|err| anyhow!(err))?;
    ensure!(wide == 42, "expected 42, got {wide}");
    Ok(())
}

#[rstest]
#[case::i8_overflow(FieldKind::I8, "99999999999")]
#[case::i8_positive_edge(FieldKind::I8, "128")]
#[case::i16_negative(FieldKind::I16, "-32769")]
#[case::i32_overflow(FieldKind::I32, "2147483648")]
#[case::i64_overflow(FieldKind::I64, "9223372036854775808")]
#[case::u8_overflow(FieldKind::U8, "256")]
#[case::u16_overflow(FieldKind::U16, "70000")]
#[case::u64_overflow(FieldKind::U64, "18446744073709551616")]
fn out_of_range_values_are_rejected(#[case] kind: FieldKind, #[case] raw: &str) -> Result<()> {
    let mut i8_value = 0_i8;
    let mut i16_value = 0_i16;
    let mut i32_value = 0_i32;
    let mut i64_value = 0_i64;
    let mut u8_value = 0_u8;
    let mut u16_value = 0_u16;
    let mut u64_value = 0_u64;
    let slot = match kind {
        FieldKind::I8 => FieldSlot::I8(&mut i8_value),
        FieldKind::I16 => FieldSlot::I16(&mut i16_value),
        FieldKind::I32 => FieldSlot::I32(&mut i32_value),
        FieldKind::I64 => FieldSlot::I64(&mut i64_value),
        FieldKind::U8 => FieldSlot::U8(&mut u8_value),
        FieldKind::U16 => FieldSlot::U16(&mut u16_value),
        FieldKind::U64 => FieldSlot::U64(&mut u64_value),
        other => return Err(anyhow!("case uses unexpected kind {other}")),
    };
    let err = apply(slot, raw).err().ok_or_else(|| anyhow!("{raw} should not fit {kind}"))?;
    ensure!(
        err == CoercionError::OutOfRange {
            value: raw.to_owned(),
            kind,
        },
        "unexpected error: {err}"
    );
    ensure!(
        i8_value == 0 && u8_value == 0 && u16_value == 0,
        "failed coercion must leave the field untouched"
    );
    Ok(())
}

#[rstest]
#[case("+1")]
#[case("-1")]
fn unsigned_integers_reject_signs(#[case] raw: &str) {
    let mut value = 7_u32;
    assert!(matches!(
        apply(FieldSlot::U32(&mut value), raw),
        Err(CoercionError::UnexpectedSign { kind: FieldKind::U32, .. })
    ));
    assert_eq!(value, 7);
}

#[rstest]
#[case("12abc")]
#[case("0x10")]
#[case("1.5")]
#[case("")]
fn malformed_integers_are_rejected(#[case] raw: &str) {
    let mut value = 0_i32;
    assert!(matches!(
        apply(FieldSlot::I32(&mut value), raw),
        Err(CoercionError::InvalidInteger { .. })
    ));
}

#[rstest]
#[case("1.5", 1.5)]
#[case("-2e3", -2000.0)]
#[case("42", 42.0)]
fn floats_accept_decimal_and_exponent_notation(#[case] raw: &str, #[case] expected: f64) {
    let mut value = 0.0_f64;
    assert_eq!(apply(FieldSlot::F64(&mut value), raw), Ok(()));
    assert_eq!(value.to_bits(), expected.to_bits());
}

#[test]
fn floats_reject_garbage() {
    let mut value = 0.0_f32;
    assert!(matches!(
        apply(FieldSlot::F32(&mut value), "one"),
        Err(CoercionError::InvalidFloat { .. })
    ));
}

#[test]
fn strings_are_applied_verbatim() -> Result<()> {
    let mut value = String::from("old");
    apply(FieldSlot::Str(&mut value), "  spaced, = value ").map_err(|err| anyhow!(err))?;
    ensure!(value == "  spaced, = value ", "unexpected string {value:?}");
    Ok(())
}

#[test]
fn durations_parse_unit_literals_not_integers() -> Result<()> {
    let mut value = Duration::ZERO;
    apply(FieldSlot::Duration(&mut value), "5s").map_err(|err| anyhow!(err))?;
    ensure!(value == Duration::from_secs(5), "expected 5s, got {value:?}");

    let err = apply(FieldSlot::Duration(&mut value), "5")
        .err()
        .ok_or_else(|| anyhow!("bare integers are not durations"))?;
    ensure!(
        matches!(err, CoercionError::InvalidDuration { .. }),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
fn unsupported_slots_have_no_conversion() {
    assert_eq!(
        apply(FieldSlot::Unsupported, "anything"),
        Err(CoercionError::UnsupportedKind)
    );
}

#[test]
fn slot_kind_matches_variant() {
    let mut value = String::new();
    assert_eq!(FieldSlot::Str(&mut value).kind(), FieldKind::Str);
    assert_eq!(FieldSlot::Unsupported.kind(), FieldKind::Unsupported);
}
