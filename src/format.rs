//! Format: compiled operation stream used to pack and unpack byte buffers.

use crate::{
    bytes::align_up,
    errors::{PackError, ParseError, UnpackError},
    op::{Endian, Op},
    pack, unpack,
    value::Value,
};

/// A compiled format: ordered [Op] stream ending in a single [Op::Stop]. Use
/// [Format::compile] to build one from a format string, then [Format::unpack]
/// and [Format::pack] as many times as needed. The stream is immutable after
/// compilation; interpreters only borrow it.
#[derive(Debug, Clone)]
pub struct Format {
    ops: Vec<Op>,
    arity: usize,
}

impl Format {
    /// Compiles a format string. Fails on the first unrecognized character;
    /// nothing partially-built escapes a failed compilation.
    ///
    /// A decimal count repeats the following code (`"4i"` is four 32-bit
    /// signed integers); spaces separate codes and are otherwise ignored.
    pub fn compile(format: &str) -> Result<Self, ParseError> {
        let mut ops = Vec::with_capacity(format.len() + 1);
        let mut repeat = 0usize;

        for (position, c) in format.chars().enumerate() {
            // Digits accumulate into the repeat register.
            if let Some(digit) = c.to_digit(10) {
                repeat = repeat
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(digit as usize))
                    .ok_or(ParseError::CountOverflow { position })?;
                continue;
            }

            // With an empty repeat register, check for control characters.
            if repeat == 0 {
                match c {
                    '@' => {
                        ops.push(Op::SetEndian(Endian::Native));
                        ops.push(Op::SetAlignment(true));
                    }
                    '=' => {
                        ops.push(Op::SetEndian(Endian::Native));
                        ops.push(Op::SetAlignment(false));
                    }
                    '<' => {
                        ops.push(Op::SetEndian(Endian::Little));
                        ops.push(Op::SetAlignment(false));
                    }
                    '>' | '!' => {
                        ops.push(Op::SetEndian(Endian::Big));
                        ops.push(Op::SetAlignment(false));
                    }
                    // Whitespace is allowed between codes.
                    ' ' => {}
                    // Not a control character: an implicit count of one.
                    _ => repeat = 1,
                }
            }

            // With a nonzero repeat register, the character must be a type
            // code; emit it once per repetition.
            if repeat > 0 {
                let op = match c {
                    'x' => Op::SkipByte,
                    'c' => Op::Char,
                    '?' => Op::Bool,
                    'b' => Op::Int8,
                    'B' => Op::UInt8,
                    'h' => Op::Int16,
                    'H' => Op::UInt16,
                    'i' | 'l' => Op::Int32,
                    'I' | 'L' => Op::UInt32,
                    'q' => Op::Int64,
                    'Q' => Op::UInt64,
                    'f' => Op::Float32,
                    'd' => Op::Float64,
                    's' => Op::CString,
                    'p' => Op::PString,
                    'P' => Op::Pointer,
                    _ => return Err(ParseError::BadCharacter { found: c, position }),
                };
                for _ in 0..repeat {
                    ops.push(op);
                }
                repeat = 0;
            }
        }

        ops.push(Op::Stop);
        let arity = ops.iter().filter(|op| op.takes_value()).count();

        Ok(Format { ops, arity })
    }

    /// Compiled operations in execution order, terminated by [Op::Stop].
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of values this format produces when unpacking and consumes when
    /// packing.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Total encoded length in bytes, including alignment padding, or `None`
    /// when the format contains variable-length string codes.
    ///
    /// Informational: unpacking checks buffer bounds per operation, so a
    /// longer buffer is still accepted (the format may describe only a
    /// prefix of it).
    pub fn byte_len(&self) -> Option<usize> {
        let mut len = 0usize;
        let mut alignment = true;
        for op in &self.ops {
            match op {
                Op::Stop => break,
                Op::SetEndian(_) => {}
                Op::SetAlignment(on) => alignment = *on,
                Op::SkipByte => len += 1,
                Op::CString | Op::PString => return None,
                _ => {
                    let width = op.width()?;
                    if alignment {
                        len = align_up(len, width);
                    }
                    len += width;
                }
            }
        }
        Some(len)
    }

    /// Unpacks `data` according to this format. See [crate::unpack()].
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<Value>, UnpackError> {
        unpack::run(self, data)
    }

    /// Packs `values` according to this format. See [crate::pack()].
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>, PackError> {
        pack::run(self, values)
    }
}
