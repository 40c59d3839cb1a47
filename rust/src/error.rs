//! Failure type shared by every check in the crate.
//!
//! The Rust API hands failures back as values. The C entry points (and the
//! `*_or_exit` helpers) turn them into a process exit through
//! [`TestFailure::exit`].

use std::io::{self, Write};

use thiserror::Error;

/// Exit status used by the integer checks.
pub const CHECK_FAILURE_EXIT_CODE: i32 = 253;

/// `EXIT_FAILURE` from `<stdlib.h>`.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum TestFailure {
    #[error("[test] reference {label} and expected {label} differ at byte {index}")]
    BufferMismatch { label: String, index: usize },

    #[error("Test check failure: {left} != {right}")]
    CheckFailed { left: String, right: String },

    #[error(" WARNING : malloc failed in tests !")]
    AllocationFailed { size: usize },

    #[error("[test] {label} is a null buffer of length {len}")]
    NullBuffer { label: String, len: usize },

    #[error("invalid hex string {input:?}: {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, TestFailure>;

impl TestFailure {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            TestFailure::CheckFailed { .. } => CHECK_FAILURE_EXIT_CODE,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether the report belongs on stderr rather than stdout.
    pub fn reports_on_stderr(&self) -> bool {
        matches!(
            self,
            TestFailure::BufferMismatch { .. }
                | TestFailure::NullBuffer { .. }
                | TestFailure::InvalidHex { .. }
                | TestFailure::Io(_)
        )
    }

    /// Write the one-line report for this failure.
    pub fn report_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", self)?;
        w.flush()
    }

    /// Report on the appropriate stream and terminate the process.
    pub fn exit(self) -> ! {
        let code = self.exit_code();
        tracing::debug!(exit_code = code, failure = %self, "terminating test process");

        // Nothing left to do if the console itself is gone.
        let _ = if self.reports_on_stderr() {
            self.report_to(&mut io::stderr().lock())
        } else {
            self.report_to(&mut io::stdout().lock())
        };
        let _ = io::stdout().flush();
        std::process::exit(code)
    }
}

/// Unwrap a result or terminate the process with the failure's exit code.
pub fn or_exit<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(failure) => failure.exit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let check = TestFailure::CheckFailed {
            left: "1".into(),
            right: "2".into(),
        };
        assert_eq!(check.exit_code(), 253);

        let mismatch = TestFailure::BufferMismatch {
            label: "aead".into(),
            index: 3,
        };
        assert_eq!(mismatch.exit_code(), EXIT_FAILURE);
        assert_eq!(TestFailure::AllocationFailed { size: 8 }.exit_code(), 1);
    }

    #[test]
    fn test_null_buffer_reports_on_stderr_and_exits_1() {
        let null = TestFailure::NullBuffer {
            label: "nonce".into(),
            len: 12,
        };
        assert_eq!(null.to_string(), "[test] nonce is a null buffer of length 12");
        assert!(null.reports_on_stderr());
        assert_eq!(null.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_messages_match_console_format() {
        let mismatch = TestFailure::BufferMismatch {
            label: "tag".into(),
            index: 7,
        };
        assert_eq!(
            mismatch.to_string(),
            "[test] reference tag and expected tag differ at byte 7"
        );
        assert!(mismatch.reports_on_stderr());

        let check = TestFailure::CheckFailed {
            left: "-1".into(),
            right: "4".into(),
        };
        assert_eq!(check.to_string(), "Test check failure: -1 != 4");
        assert!(!check.reports_on_stderr());

        let mut out = Vec::new();
        TestFailure::AllocationFailed { size: 0 }
            .report_to(&mut out)
            .unwrap();
        assert_eq!(out, b" WARNING : malloc failed in tests !\n");
    }
}
