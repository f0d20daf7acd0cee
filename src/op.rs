//! Operations that make up a compiled format: byte-order and alignment
//! switches, pad bytes, and one operation per scalar type code.

/// Byte order used when splitting or reassembling multi-byte integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Byte order requested by a control character, before `Native` resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Platform order. Resolves to [NATIVE_BYTE_ORDER].
    Native,
    Little,
    Big,
}

/// Byte order [Endian::Native] resolves to. Fixed to little-endian regardless
/// of host so packed output is reproducible.
pub const NATIVE_BYTE_ORDER: ByteOrder = ByteOrder::LittleEndian;

/// Width in bytes of a packed pointer value (`P`).
pub const POINTER_WIDTH: usize = core::mem::size_of::<usize>();

impl Endian {
    /// Resolves this request to a concrete byte order.
    pub fn byte_order(self) -> ByteOrder {
        match self {
            Endian::Native => NATIVE_BYTE_ORDER,
            Endian::Little => ByteOrder::LittleEndian,
            Endian::Big => ByteOrder::BigEndian,
        }
    }
}

/// A single operation in a compiled format stream.
///
/// Format strings compile to an ordered stream of these, terminated by one
/// trailing [Op::Stop]; the pack and unpack interpreters walk the stream in
/// order. See [crate::format::Format].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// End of stream. The sole success exit for both interpreters.
    Stop,
    /// Switch the running byte order.
    SetEndian(Endian),
    /// Switch alignment padding on or off.
    SetAlignment(bool),
    /// `x`: one pad byte. Skipped on unpack, zero-filled on pack; no value.
    SkipByte,
    /// `c`: one byte exposed as a single-character text value.
    Char,
    /// `b`
    Int8,
    /// `B`
    UInt8,
    /// `?`: one byte, any nonzero value decodes to true.
    Bool,
    /// `h`
    Int16,
    /// `H`
    UInt16,
    /// `i` or `l`
    Int32,
    /// `I` or `L`
    UInt32,
    /// `q`
    Int64,
    /// `Q`
    UInt64,
    /// `f`: recognized but not implemented; rejected at execution time.
    Float32,
    /// `d`: recognized but not implemented; rejected at execution time.
    Float64,
    /// `s`: recognized but not implemented; rejected at execution time.
    CString,
    /// `p`: recognized but not implemented; rejected at execution time.
    PString,
    /// `P`: pointer-width unsigned value.
    Pointer,
}

impl Op {
    /// Number of buffer bytes this operation reads or writes, if it has a
    /// fixed width. Control operations and the variable-length string codes
    /// have none.
    pub fn width(self) -> Option<usize> {
        match self {
            Op::SkipByte | Op::Char | Op::Int8 | Op::UInt8 | Op::Bool => Some(1),
            Op::Int16 | Op::UInt16 => Some(2),
            Op::Int32 | Op::UInt32 | Op::Float32 => Some(4),
            Op::Int64 | Op::UInt64 | Op::Float64 => Some(8),
            Op::Pointer => Some(POINTER_WIDTH),
            Op::Stop | Op::SetEndian(_) | Op::SetAlignment(_) | Op::CString | Op::PString => None,
        }
    }

    /// Whether this operation consumes one input value when packing and
    /// produces one when unpacking.
    pub fn takes_value(self) -> bool {
        !matches!(
            self,
            Op::Stop | Op::SetEndian(_) | Op::SetAlignment(_) | Op::SkipByte
        )
    }
}
