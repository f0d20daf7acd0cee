//! Hex dump helper for inspecting buffers while debugging header layouts.

/// Formats `data` as a classic hex dump: offset column, up to 16 hex bytes
/// per line, and an ASCII gutter with non-printable bytes shown as `.`.
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in data.chunks(16).enumerate() {
        out.push_str(&format!("{:08x}  ", line * 16));
        for i in 0..16 {
            match chunk.get(i) {
                Some(byte) => out.push_str(&format!("{byte:02x} ")),
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }
        out.push(' ');
        for &byte in chunk {
            out.push(if (0x20..0x7f).contains(&byte) {
                byte as char
            } else {
                '.'
            });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_dump_empty() {
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn test_hex_dump_short_line() {
        let dump = hex_dump(b"BM\x00\x7f");
        assert!(dump.starts_with("00000000  42 4d 00 7f "));
        assert!(dump.ends_with(" BM..\n"));
        assert_eq!(dump.lines().count(), 1);
    }

    #[test]
    fn test_hex_dump_two_lines() {
        let data: Vec<u8> = (0..18).collect();
        let dump = hex_dump(&data);
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.starts_with("00000000  00 01 02 03 04 05 06 07  08 09"));
        assert!(dump.lines().nth(1).unwrap().starts_with("00000010  10 11"));
    }
}
