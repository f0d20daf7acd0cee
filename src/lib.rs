//! # bytepack
//!
//! A library for packing and unpacking fixed binary structures described by
//! compact format strings, in the spirit of C's `struct` layouts.
//!
//! A format string compiles to a stream of operations: byte-order and
//! alignment switches, pad bytes, and one operation per scalar field. The
//! same compiled [format::Format] turns a value list into bytes and a byte
//! buffer back into values, so fixed binary headers can be parsed without
//! hand-rolled slicing.
//!
//! ## Format characters
//!
//! | char | meaning | char | meaning |
//! |---|---|---|---|
//! | `@` | native order, align on | `=` | native order, align off |
//! | `<` | little-endian, align off | `>` / `!` | big-endian, align off |
//! | `x` | 1 pad byte | `c` | 1-byte char |
//! | `b` / `B` | signed/unsigned 8-bit | `?` | 1-byte bool |
//! | `h` / `H` | signed/unsigned 16-bit | `i`/`l`, `I`/`L` | signed/unsigned 32-bit |
//! | `q` / `Q` | signed/unsigned 64-bit | `P` | pointer-width unsigned |
//!
//! A decimal count repeats the following code (`"4i"` is four 32-bit signed
//! integers); spaces are ignored. Native order is fixed to little-endian so
//! output is reproducible across hosts. The float (`f`, `d`) and string
//! (`s`, `p`) codes are recognized but rejected with a typed error at pack
//! and unpack time.
//!
//! ## Example
//!
//! ```
//! use bytepack::value::Value;
//!
//! // 16-bit id, two pad bytes, then a 32-bit length, little-endian.
//! let bytes = bytepack::pack("<H2xI", &[Value::UInt(7), Value::UInt(640)]).unwrap();
//! assert_eq!(bytes, [0x07, 0x00, 0x00, 0x00, 0x80, 0x02, 0x00, 0x00]);
//!
//! let values = bytepack::unpack("<H2xI", &bytes).unwrap();
//! assert_eq!(values, [Value::UInt(7), Value::UInt(640)]);
//! ```

pub mod bytes;
pub mod dump;
pub mod errors;
pub mod format;
pub mod op;
pub mod value;

mod pack;
mod unpack;

use crate::{errors::Error, format::Format, value::Value};

/// Compiles `format` and unpacks `data` in one call.
///
/// Compile once with [Format::compile] instead when the same format is
/// applied to many buffers.
pub fn unpack(format: &str, data: &[u8]) -> Result<Vec<Value>, Error> {
    Ok(Format::compile(format)?.unpack(data)?)
}

/// Compiles `format` and packs `values` in one call.
///
/// Compile once with [Format::compile] instead when the same format is
/// applied to many value lists.
pub fn pack(format: &str, values: &[Value]) -> Result<Vec<u8>, Error> {
    Ok(Format::compile(format)?.pack(values)?)
}
