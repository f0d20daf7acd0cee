//! The unpack interpreter: walks a compiled format over a byte buffer and
//! produces decoded values.

use crate::{
    bytes::{align_up, int_from_bytes, uint_from_bytes},
    errors::UnpackError,
    format::Format,
    op::{ByteOrder, NATIVE_BYTE_ORDER, Op, POINTER_WIDTH},
    value::Value,
};

pub(crate) fn run(format: &Format, data: &[u8]) -> Result<Vec<Value>, UnpackError> {
    let mut values = Vec::with_capacity(format.arity());
    let mut index = 0usize;
    let mut alignment = true;
    let mut byte_order = NATIVE_BYTE_ORDER;

    for op in format.ops() {
        match *op {
            // Trailing unconsumed bytes are ignored: the format may describe
            // only a prefix of the buffer.
            Op::Stop => return Ok(values),

            Op::SetEndian(endian) => byte_order = endian.byte_order(),
            Op::SetAlignment(on) => alignment = on,

            // Pad bytes are consumed unconditionally, without alignment.
            Op::SkipByte => {
                read(data, &mut index, 1)?;
            }

            Op::Char => {
                let bytes = read_aligned(data, &mut index, 1, alignment)?;
                // Bytes >= 128 are carried through as the raw byte value.
                values.push(Value::Text(char::from(bytes[0]).to_string()));
            }
            Op::Bool => {
                let bytes = read_aligned(data, &mut index, 1, alignment)?;
                values.push(Value::Bool(bytes[0] != 0));
            }

            Op::Int8 => values.push(read_int(data, &mut index, 1, byte_order, alignment)?),
            Op::Int16 => values.push(read_int(data, &mut index, 2, byte_order, alignment)?),
            Op::Int32 => values.push(read_int(data, &mut index, 4, byte_order, alignment)?),
            Op::Int64 => values.push(read_int(data, &mut index, 8, byte_order, alignment)?),

            Op::UInt8 => values.push(read_uint(data, &mut index, 1, byte_order, alignment)?),
            Op::UInt16 => values.push(read_uint(data, &mut index, 2, byte_order, alignment)?),
            Op::UInt32 => values.push(read_uint(data, &mut index, 4, byte_order, alignment)?),
            Op::UInt64 => values.push(read_uint(data, &mut index, 8, byte_order, alignment)?),
            Op::Pointer => {
                values.push(read_uint(
                    data,
                    &mut index,
                    POINTER_WIDTH,
                    byte_order,
                    alignment,
                )?);
            }

            Op::Float32 | Op::Float64 | Op::CString | Op::PString => {
                return Err(UnpackError::Unsupported { op: *op });
            }
        }
    }

    // Never reached: compilation always terminates the stream with Stop.
    Ok(values)
}

/// Reads exactly `width` bytes, first advancing `index` past alignment
/// padding when requested. Skipped padding is not validated.
fn read_aligned<'a>(
    data: &'a [u8],
    index: &mut usize,
    width: usize,
    alignment: bool,
) -> Result<&'a [u8], UnpackError> {
    if alignment {
        *index = align_up(*index, width);
    }
    read(data, index, width)
}

fn read<'a>(data: &'a [u8], index: &mut usize, width: usize) -> Result<&'a [u8], UnpackError> {
    if *index + width > data.len() {
        return Err(UnpackError::Truncated {
            offset: *index,
            needed: width,
            available: data.len().saturating_sub(*index),
        });
    }
    let bytes = &data[*index..*index + width];
    *index += width;
    Ok(bytes)
}

fn read_int(
    data: &[u8],
    index: &mut usize,
    width: usize,
    byte_order: ByteOrder,
    alignment: bool,
) -> Result<Value, UnpackError> {
    let bytes = read_aligned(data, index, width, alignment)?;
    Ok(Value::Int(int_from_bytes(bytes, byte_order)))
}

fn read_uint(
    data: &[u8],
    index: &mut usize,
    width: usize,
    byte_order: ByteOrder,
    alignment: bool,
) -> Result<Value, UnpackError> {
    let bytes = read_aligned(data, index, width, alignment)?;
    Ok(Value::UInt(uint_from_bytes(bytes, byte_order)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_little_and_big_endian() {
        assert_eq!(
            Format::compile("<H").unwrap().unpack(&[0x34, 0x12]).unwrap(),
            vec![Value::UInt(0x1234)]
        );
        assert_eq!(
            Format::compile(">H").unwrap().unpack(&[0x12, 0x34]).unwrap(),
            vec![Value::UInt(0x1234)]
        );
    }

    #[test]
    fn test_unpack_native_is_little() {
        assert_eq!(
            Format::compile("H").unwrap().unpack(&[0x34, 0x12]).unwrap(),
            vec![Value::UInt(0x1234)]
        );
    }

    #[test]
    fn test_unpack_sign_extension() {
        assert_eq!(
            Format::compile("<h").unwrap().unpack(&[0xfe, 0xff]).unwrap(),
            vec![Value::Int(-2)]
        );
        assert_eq!(
            Format::compile("<b").unwrap().unpack(&[0x80]).unwrap(),
            vec![Value::Int(-128)]
        );
    }

    #[test]
    fn test_unpack_truncated() {
        assert_eq!(
            Format::compile("<i").unwrap().unpack(&[0x01, 0x02]).unwrap_err(),
            UnpackError::Truncated {
                offset: 0,
                needed: 4,
                available: 2
            }
        );
    }

    #[test]
    fn test_unpack_bool() {
        assert_eq!(
            Format::compile("<3?").unwrap().unpack(&[0, 1, 0x7f]).unwrap(),
            vec![Value::Bool(false), Value::Bool(true), Value::Bool(true)]
        );
    }

    #[test]
    fn test_unpack_char_high_byte() {
        assert_eq!(
            Format::compile("<c").unwrap().unpack(&[0xff]).unwrap(),
            vec![Value::Text("\u{ff}".to_string())]
        );
    }

    #[test]
    fn test_unpack_skip_byte() {
        assert_eq!(
            Format::compile("<xB").unwrap().unpack(&[0xaa, 0xbb]).unwrap(),
            vec![Value::UInt(0xbb)]
        );
    }

    #[test]
    fn test_unpack_skip_byte_needs_data() {
        assert!(matches!(
            Format::compile("<Bx").unwrap().unpack(&[1]).unwrap_err(),
            UnpackError::Truncated { .. }
        ));
    }

    #[test]
    fn test_unpack_alignment_skips_padding() {
        // Aligned mode: the 16-bit value starts at offset 2, not 1.
        let data = [0x01, 0x00, 0x34, 0x12];
        assert_eq!(
            Format::compile("@bh").unwrap().unpack(&data).unwrap(),
            vec![Value::Int(1), Value::Int(0x1234)]
        );
    }

    #[test]
    fn test_unpack_alignment_off_reads_packed() {
        let data = [0x01, 0x34, 0x12];
        assert_eq!(
            Format::compile("=bh").unwrap().unpack(&data).unwrap(),
            vec![Value::Int(1), Value::Int(0x1234)]
        );
    }

    #[test]
    fn test_unpack_trailing_bytes_ignored() {
        let data = [0x05, 0xde, 0xad, 0xbe, 0xef];
        assert_eq!(
            Format::compile("<B").unwrap().unpack(&data).unwrap(),
            vec![Value::UInt(5)]
        );
    }

    #[test]
    fn test_unpack_mid_stream_order_switch() {
        let data = [0x34, 0x12, 0x12, 0x34];
        assert_eq!(
            Format::compile("<H>H").unwrap().unpack(&data).unwrap(),
            vec![Value::UInt(0x1234), Value::UInt(0x1234)]
        );
    }

    #[test]
    fn test_unpack_float_unsupported() {
        assert_eq!(
            Format::compile("<f").unwrap().unpack(&[0; 4]).unwrap_err(),
            UnpackError::Unsupported { op: Op::Float32 }
        );
    }

    #[test]
    fn test_unpack_cstring_unsupported() {
        assert_eq!(
            Format::compile("<4s").unwrap().unpack(&[0; 4]).unwrap_err(),
            UnpackError::Unsupported { op: Op::CString }
        );
    }

    #[test]
    fn test_unpack_pointer_is_native_width() {
        let mut data = vec![0u8; POINTER_WIDTH];
        data[0] = 0x2a;
        assert_eq!(
            Format::compile("<P").unwrap().unpack(&data).unwrap(),
            vec![Value::UInt(0x2a)]
        );
    }

    #[test]
    fn test_unpack_int64_full_range() {
        assert_eq!(
            Format::compile("<q").unwrap().unpack(&[0xff; 8]).unwrap(),
            vec![Value::Int(-1)]
        );
        assert_eq!(
            Format::compile("<Q").unwrap().unpack(&[0xff; 8]).unwrap(),
            vec![Value::UInt(u64::MAX)]
        );
    }
}
