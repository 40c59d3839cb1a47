//! # testlib
//!
//! Support routines for generated test drivers: hex dumps, expected-vs-computed
//! buffer comparison, fixed-width integer checks and cycle-count reporting.
//!
//! The Rust API returns failures; the C entry points (feature `ffi`) exit the
//! process with the harness's status codes (1 for buffer or allocation
//! failures, 253 for integer checks).
//!
//! ```rust
//! use testlib::{check, compare_and_print_to, TestFailure};
//!
//! let mut out = Vec::new();
//! compare_and_print_to(&mut out, "digest", &[0xab, 0xcd], &[0xab, 0xcd]).unwrap();
//! assert!(String::from_utf8(out).unwrap().ends_with("[test] digest is a success\n"));
//!
//! let err = check(3u32, 4u32).unwrap_err();
//! assert!(matches!(err, TestFailure::CheckFailed { .. }));
//! assert_eq!(err.exit_code(), 253);
//! ```

pub mod alloc;
pub mod check;
pub mod compare;
pub mod config;
pub mod cycles;
pub mod error;
pub mod hex;
pub mod logging;
pub mod report;
pub mod timing;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use alloc::{alloc_buffer, try_malloc, unsafe_malloc};
pub use check::{
    check, check16, check32, check64, check8, check_or_exit, checku16, checku32, checku64,
    checku8, touch, CheckInt,
};
pub use compare::{
    compare_and_print, compare_and_print_or_exit, compare_and_print_to, first_mismatch,
};
pub use config::{settings, ReportFormat, Settings};
pub use cycles::{cpucycles, cpucycles_begin, cpucycles_end, cycles_per_round, Cycles};
pub use error::{or_exit, Result, TestFailure, CHECK_FAILURE_EXIT_CODE, EXIT_FAILURE};
pub use hex::{parse_hex, to_hex, Hex};
pub use timing::{perr, print_clock_diff, print_cycles_per_round, process_clock, ClockTicks};
