//! The pack interpreter: walks a compiled format over a value list and
//! produces an encoded buffer.

use crate::{
    bytes::push_split_bytes,
    errors::PackError,
    format::Format,
    op::{ByteOrder, NATIVE_BYTE_ORDER, Op, POINTER_WIDTH},
    value::Value,
};

const PAD_BYTE: u8 = 0;

pub(crate) fn run(format: &Format, values: &[Value]) -> Result<Vec<u8>, PackError> {
    let mut out = Vec::with_capacity(format.byte_len().unwrap_or(0));
    let mut next = 0usize;
    let mut alignment = true;
    let mut byte_order = NATIVE_BYTE_ORDER;
    let arity = format.arity();

    for op in format.ops() {
        match *op {
            // Sole success exit; the value list must be exactly consumed.
            Op::Stop => {
                if next != values.len() {
                    return Err(PackError::ArityMismatch {
                        expected: arity,
                        got: values.len(),
                    });
                }
                return Ok(out);
            }

            Op::SetEndian(endian) => byte_order = endian.byte_order(),
            Op::SetAlignment(on) => alignment = on,

            // Pad bytes are emitted unconditionally and consume no value.
            Op::SkipByte => out.push(PAD_BYTE),

            Op::Char => {
                let value = take(values, &mut next, arity)?;
                let Value::Text(text) = value else {
                    return Err(PackError::TypeMismatch {
                        op: *op,
                        found: value.kind(),
                    });
                };
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if (c as u32) < 128 => out.push(c as u8),
                    (Some(_), None) => return Err(PackError::RangeError { op: *op }),
                    _ => {
                        return Err(PackError::TypeMismatch {
                            op: *op,
                            found: value.kind(),
                        });
                    }
                }
            }
            Op::Bool => {
                let value = take(values, &mut next, arity)?;
                let Value::Bool(flag) = value else {
                    return Err(PackError::TypeMismatch {
                        op: *op,
                        found: value.kind(),
                    });
                };
                out.push(u8::from(*flag));
            }

            Op::Int8 => {
                let value = take(values, &mut next, arity)?;
                push_int(&mut out, value, 1, byte_order, alignment, *op)?;
            }
            Op::Int16 => {
                let value = take(values, &mut next, arity)?;
                push_int(&mut out, value, 2, byte_order, alignment, *op)?;
            }
            Op::Int32 => {
                let value = take(values, &mut next, arity)?;
                push_int(&mut out, value, 4, byte_order, alignment, *op)?;
            }
            Op::Int64 => {
                let value = take(values, &mut next, arity)?;
                push_int(&mut out, value, 8, byte_order, alignment, *op)?;
            }

            Op::UInt8 => {
                let value = take(values, &mut next, arity)?;
                push_uint(&mut out, value, 1, byte_order, alignment, *op)?;
            }
            Op::UInt16 => {
                let value = take(values, &mut next, arity)?;
                push_uint(&mut out, value, 2, byte_order, alignment, *op)?;
            }
            Op::UInt32 => {
                let value = take(values, &mut next, arity)?;
                push_uint(&mut out, value, 4, byte_order, alignment, *op)?;
            }
            Op::UInt64 => {
                let value = take(values, &mut next, arity)?;
                push_uint(&mut out, value, 8, byte_order, alignment, *op)?;
            }
            Op::Pointer => {
                let value = take(values, &mut next, arity)?;
                push_uint(&mut out, value, POINTER_WIDTH, byte_order, alignment, *op)?;
            }

            Op::Float32 | Op::Float64 | Op::CString | Op::PString => {
                return Err(PackError::Unsupported { op: *op });
            }
        }
    }

    // Never reached: compilation always terminates the stream with Stop.
    Ok(out)
}

/// Pops the next input value, failing when the list is exhausted early.
fn take<'a>(values: &'a [Value], next: &mut usize, expected: usize) -> Result<&'a Value, PackError> {
    let value = values.get(*next).ok_or(PackError::ArityMismatch {
        expected,
        got: values.len(),
    })?;
    *next += 1;
    Ok(value)
}

/// Pads `out` with zero bytes until its length is a multiple of `width`.
fn pad_alignment(out: &mut Vec<u8>, width: usize, alignment: bool) {
    if alignment {
        while out.len() % width != 0 {
            out.push(PAD_BYTE);
        }
    }
}

fn push_int(
    out: &mut Vec<u8>,
    value: &Value,
    width: usize,
    byte_order: ByteOrder,
    alignment: bool,
    op: Op,
) -> Result<(), PackError> {
    let Value::Int(v) = value else {
        return Err(PackError::TypeMismatch {
            op,
            found: value.kind(),
        });
    };
    // 64-bit codes accept their full range; narrower codes are range-checked.
    if width < 8 {
        let bits = width as u32 * 8;
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if *v < min || *v > max {
            return Err(PackError::RangeError { op });
        }
    }
    pad_alignment(out, width, alignment);
    push_split_bytes(out, *v as u64, byte_order, width);
    Ok(())
}

fn push_uint(
    out: &mut Vec<u8>,
    value: &Value,
    width: usize,
    byte_order: ByteOrder,
    alignment: bool,
    op: Op,
) -> Result<(), PackError> {
    let Value::UInt(v) = value else {
        return Err(PackError::TypeMismatch {
            op,
            found: value.kind(),
        });
    };
    if width < 8 && *v >> (width as u32 * 8) != 0 {
        return Err(PackError::RangeError { op });
    }
    pad_alignment(out, width, alignment);
    push_split_bytes(out, *v, byte_order, width);
    Ok(())
}
