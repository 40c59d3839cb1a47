//! Hex rendering of byte buffers.

use std::fmt;
use std::io::{self, Write};

use crate::error::{Result, TestFailure};

/// Lowercase hex view of a byte slice, two digits per byte, no separators.
pub struct Hex<'a>(pub &'a [u8]);

impl<'a> fmt::Display for Hex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Debug for Hex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hex({})", self)
    }
}

#[inline]
pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    // Writing into a String cannot fail.
    let _ = fmt::write(&mut s, format_args!("{}", Hex(bytes)));
    s
}

/// Parse a hex string (either case) back into bytes.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let invalid = |reason: String| TestFailure::InvalidHex {
        input: s.to_string(),
        reason,
    };

    if s.len() % 2 != 0 {
        return Err(invalid(format!("odd length {}", s.len())));
    }

    s.as_bytes()
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| match (nibble(pair[0]), nibble(pair[1])) {
            (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
            _ => Err(invalid(format!("non-hex digit at offset {}", i * 2))),
        })
        .collect()
}

#[inline(always)]
fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Write `"{file}:{line}: {hex}"`.
pub fn print_buf_to<W: Write>(w: &mut W, buf: &[u8], file: &str, line: i32) -> io::Result<()> {
    writeln!(w, "{}:{}: {}", file, line, Hex(buf))
}

/// Print a buffer tagged with its source location on stdout.
pub fn print_buf(buf: &[u8], file: &str, line: i32) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_buf_to(&mut out, buf, file, line)?;
    out.flush()?;
    Ok(())
}

/// `print_buf` stamped with the caller's file and line.
#[macro_export]
macro_rules! print_buf {
    ($buf:expr) => {
        $crate::hex::print_buf($buf, file!(), line!() as i32)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_lowercase_no_separators() {
        assert_eq!(to_hex(&[0x00, 0xab, 0xff, 0x10]), "00abff10");
        assert_eq!(to_hex(&[]), "");
        assert_eq!(format!("{:?}", Hex(&[0xde, 0xad])), "Hex(dead)");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_hex("00abFF").unwrap(), vec![0x00, 0xab, 0xff]);
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_hex("abc"), Err(TestFailure::InvalidHex { .. })));
        match parse_hex("00zz") {
            Err(TestFailure::InvalidHex { reason, .. }) => {
                assert_eq!(reason, "non-hex digit at offset 2")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_print_buf_format() {
        let mut out = Vec::new();
        print_buf_to(&mut out, &[1, 2, 0xfe], "driver.c", 42).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "driver.c:42: 0102fe\n");
    }
}
