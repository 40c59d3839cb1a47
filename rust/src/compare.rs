//! Expected-vs-computed buffer comparison.

use std::io::{self, Write};

use crate::error::{or_exit, Result, TestFailure};
use crate::hex::Hex;

/// Index of the first byte where the buffers differ.
///
/// When one buffer is a strict prefix of the other the answer is the
/// shorter length.
#[inline]
pub fn first_mismatch(reference: &[u8], output: &[u8]) -> Option<usize> {
    if let Some(i) = reference.iter().zip(output).position(|(r, o)| r != o) {
        return Some(i);
    }
    if reference.len() != output.len() {
        Some(reference.len().min(output.len()))
    } else {
        None
    }
}

/// Print both buffers, then the verdict, into `out`.
///
/// The mismatch line is not written here: the caller decides where it goes
/// (stderr for the console path, see [`TestFailure::exit`]).
pub fn compare_and_print_to<W: Write>(
    out: &mut W,
    label: &str,
    reference: &[u8],
    output: &[u8],
) -> Result<()> {
    tracing::debug!(label, len = reference.len(), "comparing buffers");

    writeln!(out, "[test] expected output {} is {}", label, Hex(reference))?;
    writeln!(out, "[test] computed output {} is {}", label, Hex(output))?;

    if let Some(index) = first_mismatch(reference, output) {
        out.flush()?;
        return Err(TestFailure::BufferMismatch {
            label: label.to_string(),
            index,
        });
    }

    writeln!(out, "[test] {} is a success", label)?;
    Ok(())
}

/// Compare on stdout, returning the failure instead of exiting.
pub fn compare_and_print(label: &str, reference: &[u8], output: &[u8]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = compare_and_print_to(&mut out, label, reference, output);
    out.flush()?;
    result
}

/// Compare on stdout and terminate with `EXIT_FAILURE` on mismatch.
pub fn compare_and_print_or_exit(label: &str, reference: &[u8], output: &[u8]) {
    or_exit(compare_and_print(label, reference, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_mismatch() {
        assert_eq!(first_mismatch(b"abc", b"abc"), None);
        assert_eq!(first_mismatch(b"abc", b"abd"), Some(2));
        assert_eq!(first_mismatch(b"xbc", b"abd"), Some(0));
        assert_eq!(first_mismatch(b"ab", b"abc"), Some(2));
        assert_eq!(first_mismatch(b"", b""), None);
    }

    #[test]
    fn test_equal_buffers_succeed() {
        let mut out = Vec::new();
        compare_and_print_to(&mut out, "sha256", &[0xca, 0xfe], &[0xca, 0xfe]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[test] expected output sha256 is cafe\n\
             [test] computed output sha256 is cafe\n\
             [test] sha256 is a success\n"
        );
    }

    #[test]
    fn test_mismatch_reports_index_without_success_line() {
        let mut out = Vec::new();
        let err = compare_and_print_to(&mut out, "mac", &[1, 2, 3, 4], &[1, 2, 9, 4]).unwrap_err();
        match err {
            TestFailure::BufferMismatch { label, index } => {
                assert_eq!(label, "mac");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with("[test] computed output mac is 01020904\n"));
        assert!(!printed.contains("success"));
    }
}
