//! The element type registry and per-scalar decoding.
//!
//! The set of element types is closed: ten fixed-width numeric types,
//! each addressed in a header by its C type token. Decoding is always an
//! explicit fixed-width `from_*_bytes` per scalar, so tensor buffers carry
//! no alignment requirement.

use std::fmt;
use std::str::FromStr;

use crate::error::TensorError;

/// Fixed-width numeric type of a tensor's elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// `int8_t`
    Int8,
    /// `uint8_t`
    UInt8,
    /// `int16_t`
    Int16,
    /// `uint16_t`
    UInt16,
    /// `int32_t`
    Int32,
    /// `uint32_t`
    UInt32,
    /// `int64_t`
    Int64,
    /// `uint64_t`
    UInt64,
    /// `float` (IEEE 754 binary32).
    Float32,
    /// `double` (IEEE 754 binary64).
    Float64,
}

impl ElementType {
    /// Every recognized element type, in registry order.
    pub const ALL: [ElementType; 10] = [
        Self::Float32,
        Self::Float64,
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
    ];

    /// Resolve a header type token (`"float"`, `"int64_t"`, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorlog_core::ElementType;
    ///
    /// assert_eq!(ElementType::resolve("int32_t").unwrap(), ElementType::Int32);
    /// assert!(ElementType::resolve("bool").is_err());
    /// ```
    pub fn resolve(token: &str) -> Result<Self, TensorError> {
        let ty = match token {
            "float" => Self::Float32,
            "double" => Self::Float64,
            "int8_t" => Self::Int8,
            "uint8_t" => Self::UInt8,
            "int16_t" => Self::Int16,
            "uint16_t" => Self::UInt16,
            "int32_t" => Self::Int32,
            "uint32_t" => Self::UInt32,
            "int64_t" => Self::Int64,
            "uint64_t" => Self::UInt64,
            _ => {
                return Err(TensorError::UnknownType {
                    token: token.to_string(),
                })
            }
        };
        Ok(ty)
    }

    /// The header token for this type. Inverse of [`resolve`](Self::resolve).
    pub fn token(self) -> &'static str {
        match self {
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Int8 => "int8_t",
            Self::UInt8 => "uint8_t",
            Self::Int16 => "int16_t",
            Self::UInt16 => "uint16_t",
            Self::Int32 => "int32_t",
            Self::UInt32 => "uint32_t",
            Self::Int64 => "int64_t",
            Self::UInt64 => "uint64_t",
        }
    }

    /// Size of one element in bytes.
    pub fn width(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Whether this is one of the two floating-point types.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Decode one element from exactly [`width`](Self::width) bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != self.width()`.
    pub fn decode(self, bytes: &[u8], order: ByteOrder) -> Scalar {
        match self {
            Self::Int8 => Scalar::I8(i8::decode(bytes, order)),
            Self::UInt8 => Scalar::U8(u8::decode(bytes, order)),
            Self::Int16 => Scalar::I16(i16::decode(bytes, order)),
            Self::UInt16 => Scalar::U16(u16::decode(bytes, order)),
            Self::Int32 => Scalar::I32(i32::decode(bytes, order)),
            Self::UInt32 => Scalar::U32(u32::decode(bytes, order)),
            Self::Int64 => Scalar::I64(i64::decode(bytes, order)),
            Self::UInt64 => Scalar::U64(u64::decode(bytes, order)),
            Self::Float32 => Scalar::F32(f32::decode(bytes, order)),
            Self::Float64 => Scalar::F64(f64::decode(bytes, order)),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ElementType {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

/// Byte order of the raw tensor payloads.
///
/// Logs are written in the producer's native order, which is little-endian
/// on every platform the producer ships on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
    /// Whatever the current target uses.
    Native,
}

/// One decoded element, tagged with its type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    /// `int8_t` value.
    I8(i8),
    /// `uint8_t` value.
    U8(u8),
    /// `int16_t` value.
    I16(i16),
    /// `uint16_t` value.
    U16(u16),
    /// `int32_t` value.
    I32(i32),
    /// `uint32_t` value.
    U32(u32),
    /// `int64_t` value.
    I64(i64),
    /// `uint64_t` value.
    U64(u64),
    /// `float` value.
    F32(f32),
    /// `double` value.
    F64(f64),
}

impl Scalar {
    /// The element type this scalar was decoded as.
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::I8(_) => ElementType::Int8,
            Self::U8(_) => ElementType::UInt8,
            Self::I16(_) => ElementType::Int16,
            Self::U16(_) => ElementType::UInt16,
            Self::I32(_) => ElementType::Int32,
            Self::U32(_) => ElementType::UInt32,
            Self::I64(_) => ElementType::Int64,
            Self::U64(_) => ElementType::UInt64,
            Self::F32(_) => ElementType::Float32,
            Self::F64(_) => ElementType::Float64,
        }
    }

    /// Widen to `f64`. Lossy for 64-bit integers beyond 2^53.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::I8(v) => v as f64,
            Self::U8(v) => v as f64,
            Self::I16(v) => v as f64,
            Self::U16(v) => v as f64,
            Self::I32(v) => v as f64,
            Self::U32(v) => v as f64,
            Self::I64(v) => v as f64,
            Self::U64(v) => v as f64,
            Self::F32(v) => v as f64,
            Self::F64(v) => v,
        }
    }

    /// Append this scalar's encoding to `out`.
    pub fn write_bytes(&self, out: &mut Vec<u8>, order: ByteOrder) {
        match *self {
            Self::I8(v) => v.encode(out, order),
            Self::U8(v) => v.encode(out, order),
            Self::I16(v) => v.encode(out, order),
            Self::U16(v) => v.encode(out, order),
            Self::I32(v) => v.encode(out, order),
            Self::U32(v) => v.encode(out, order),
            Self::I64(v) => v.encode(out, order),
            Self::U64(v) => v.encode(out, order),
            Self::F32(v) => v.encode(out, order),
            Self::F64(v) => v.encode(out, order),
        }
    }
}

/// Canonical string form: decimal integers, floats in shortest
/// round-trip notation (`1.0`, `0.1`, `NaN`, `inf`).
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v:?}"),
            Self::F64(v) => write!(f, "{v:?}"),
        }
    }
}

/// A Rust primitive that corresponds to exactly one [`ElementType`].
///
/// Used for typed extraction ([`TensorValue::to_vec`](crate::TensorValue::to_vec))
/// and by fixture encoders.
pub trait Element: Copy + fmt::Debug + 'static {
    /// The element type this primitive decodes.
    const TYPE: ElementType;

    /// Decode from exactly `TYPE.width()` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != Self::TYPE.width()`.
    fn decode(bytes: &[u8], order: ByteOrder) -> Self;

    /// Append the encoding of `self` to `out`.
    fn encode(self, out: &mut Vec<u8>, order: ByteOrder);

    /// Wrap in the matching [`Scalar`] variant.
    fn into_scalar(self) -> Scalar;
}

macro_rules! impl_element {
    ($($ty:ty => $elem:ident, $variant:ident;)*) => {
        $(
            impl Element for $ty {
                const TYPE: ElementType = ElementType::$elem;

                fn decode(bytes: &[u8], order: ByteOrder) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    match order {
                        ByteOrder::Little => <$ty>::from_le_bytes(buf),
                        ByteOrder::Big => <$ty>::from_be_bytes(buf),
                        ByteOrder::Native => <$ty>::from_ne_bytes(buf),
                    }
                }

                fn encode(self, out: &mut Vec<u8>, order: ByteOrder) {
                    let bytes = match order {
                        ByteOrder::Little => self.to_le_bytes(),
                        ByteOrder::Big => self.to_be_bytes(),
                        ByteOrder::Native => self.to_ne_bytes(),
                    };
                    out.extend_from_slice(&bytes);
                }

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }
            }
        )*
    };
}

impl_element! {
    i8 => Int8, I8;
    u8 => UInt8, U8;
    i16 => Int16, I16;
    u16 => UInt16, U16;
    i32 => Int32, I32;
    u32 => UInt32, U32;
    i64 => Int64, I64;
    u64 => UInt64, U64;
    f32 => Float32, F32;
    f64 => Float64, F64;
}
