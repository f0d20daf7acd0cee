//! Error types for format compilation, packing, and unpacking.
//!
//! Every failure path reports a typed error; nothing aborts the process.

use crate::op::Op;

/// Errors produced when compiling a format string into a
/// [crate::format::Format].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Character is neither a type code nor a control character.
    #[error("bad character {found:?} in format string at position {position}")]
    BadCharacter { found: char, position: usize },
    /// Repeat count does not fit in a machine word.
    #[error("repeat count overflow in format string at position {position}")]
    CountOverflow { position: usize },
}

/// Errors produced when unpacking a buffer against a compiled format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnpackError {
    /// Buffer ran out before the operation's bytes could be read.
    #[error("not enough data for format: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// The format contains a code that is recognized but not implemented.
    #[error("unpacking {op:?} is not supported")]
    Unsupported { op: Op },
}

/// Errors produced when packing a value list against a compiled format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// Number of supplied values does not match the format's arity.
    #[error("expected {expected} values for packing, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    /// Value is outside the exact representable range of the requested code.
    #[error("value outside valid range of {op:?}")]
    RangeError { op: Op },
    /// Supplied value variant does not match the requested code.
    #[error("cannot pack {found} value as {op:?}")]
    TypeMismatch { op: Op, found: &'static str },
    /// The format contains a code that is recognized but not implemented.
    #[error("packing {op:?} is not supported")]
    Unsupported { op: Op },
}

/// Any error from the string-convenience [crate::pack] / [crate::unpack]
/// entry points, which compile and interpret in one call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Unpack(#[from] UnpackError),
    #[error(transparent)]
    Pack(#[from] PackError),
}
