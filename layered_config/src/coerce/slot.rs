//! Semantic field kinds and the writable slots that carry them.

use std::fmt;
use std::time::Duration;

/// Semantic type classification of a leaf field.
///
/// Integer widths only differ in the range accepted during coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `String`.
    Str,
    /// `std::time::Duration`, written as a duration literal such as `5s`.
    Duration,
    /// A type with no string conversion, such as `Vec<T>` or `Option<T>`.
    Unsupported,
}

impl FieldKind {
    /// Human-readable name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "string",
            Self::Duration => "duration",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A settable location inside a configuration record.
///
/// Slots are produced by a field descriptor's location handle and borrow the
/// record only for as long as a single value is being written.
#[derive(Debug)]
pub enum FieldSlot<'r> {
    /// Boolean target.
    Bool(&'r mut bool),
    /// 8-bit signed target.
    I8(&'r mut i8),
    /// 16-bit signed target.
    I16(&'r mut i16),
    /// 32-bit signed target.
    I32(&'r mut i32),
    /// 64-bit signed target.
    I64(&'r mut i64),
    /// Pointer-width signed target.
    Isize(&'r mut isize),
    /// 8-bit unsigned target.
    U8(&'r mut u8),
    /// 16-bit unsigned target.
    U16(&'r mut u16),
    /// 32-bit unsigned target.
    U32(&'r mut u32),
    /// 64-bit unsigned target.
    U64(&'r mut u64),
    /// Pointer-width unsigned target.
    Usize(&'r mut usize),
    /// Single-precision float target.
    F32(&'r mut f32),
    /// Double-precision float target.
    F64(&'r mut f64),
    /// String target.
    Str(&'r mut String),
    /// Elapsed-time target.
    Duration(&'r mut Duration),
    /// A field that cannot be written from a string.
    Unsupported,
}

impl FieldSlot<'_> {
    /// The semantic kind written through this slot.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::I8(_) => FieldKind::I8,
            Self::I16(_) => FieldKind::I16,
            Self::I32(_) => FieldKind::I32,
            Self::I64(_) => FieldKind::I64,
            Self::Isize(_) => FieldKind::Isize,
            Self::U8(_) => FieldKind::U8,
            Self::U16(_) => FieldKind::U16,
            Self::U32(_) => FieldKind::U32,
            Self::U64(_) => FieldKind::U64,
            Self::Usize(_) => FieldKind::Usize,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
            Self::Str(_) => FieldKind::Str,
            Self::Duration(_) => FieldKind::Duration,
            Self::Unsupported => FieldKind::Unsupported,
        }
    }
}
