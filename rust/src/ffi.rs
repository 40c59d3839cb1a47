//! C ABI entry points, named as generated test drivers expect them.
//!
//! Every failure here terminates the process; see `include/testlib.h`.
#![allow(non_snake_case)]

use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_void};

use crate::check::{check_or_exit, touch};
use crate::compare::compare_and_print_or_exit;
use crate::cycles::{self, Cycles};
use crate::error::{or_exit, TestFailure};
use crate::hex;
use crate::logging;
use crate::timing::{self, ClockTicks};

/// Borrow a C string, tolerating null and invalid UTF-8.
unsafe fn c_str<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed("(null)")
    } else {
        CStr::from_ptr(ptr).to_string_lossy()
    }
}

/// View `(ptr, len)` as a slice. A null pointer is only acceptable for an
/// empty buffer.
unsafe fn c_buf<'a>(ptr: *const u8, len: usize, label: &str) -> &'a [u8] {
    if len == 0 {
        return &[];
    }
    if ptr.is_null() {
        TestFailure::NullBuffer {
            label: label.to_string(),
            len,
        }
        .exit();
    }
    std::slice::from_raw_parts(ptr, len)
}

/// # Safety
/// `buf` must point to `size` readable bytes; `file` must be a C string or null.
#[no_mangle]
pub unsafe extern "C" fn print_buf(buf: *const u8, size: usize, file: *const c_char, line: c_int) {
    logging::init_once();
    let file = c_str(file);
    let bytes = c_buf(buf, size, &file);
    or_exit(hex::print_buf(bytes, &file, line));
}

/// # Safety
/// `reference` and `output` must each point to `size` readable bytes;
/// `txt` must be a C string or null.
#[no_mangle]
pub unsafe extern "C" fn TestLib_compare_and_print(
    txt: *const c_char,
    reference: *const u8,
    output: *const u8,
    size: c_int,
) {
    logging::init_once();
    let label = c_str(txt);
    // A negative size compares nothing.
    let len = usize::try_from(size).unwrap_or(0);
    let reference = c_buf(reference, len, &label);
    let output = c_buf(output, len, &label);
    compare_and_print_or_exit(&label, reference, output);
}

#[no_mangle]
pub extern "C" fn TestLib_touch(x: i32) {
    touch(x)
}

macro_rules! export_check {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[no_mangle]
            pub extern "C" fn $name(x: $t, y: $t) {
                logging::init_once();
                check_or_exit(x, y)
            }
        )*
    };
}

export_check! {
    TestLib_check8: i8, TestLib_check16: i16, TestLib_check32: i32, TestLib_check64: i64,
    TestLib_checku8: u8, TestLib_checku16: u16, TestLib_checku32: u32, TestLib_checku64: u64,
}

/// Never returns null: allocation failure terminates the process.
#[no_mangle]
pub extern "C" fn TestLib_unsafe_malloc(size: usize) -> *mut c_void {
    logging::init_once();
    crate::alloc::unsafe_malloc(size).as_ptr()
}

#[no_mangle]
pub extern "C" fn TestLib_print_clock_diff(t1: ClockTicks, t2: ClockTicks) {
    logging::init_once();
    or_exit(timing::print_clock_diff(t1, t2));
}

#[no_mangle]
pub extern "C" fn TestLib_perr(err_code: u32) {
    logging::init_once();
    or_exit(timing::perr(err_code));
}

#[no_mangle]
pub extern "C" fn TestLib_print_cycles_per_round(c1: Cycles, c2: Cycles, rounds: u32) {
    logging::init_once();
    or_exit(timing::print_cycles_per_round(c1, c2, rounds));
}

#[no_mangle]
pub extern "C" fn TestLib_cpucycles() -> Cycles {
    cycles::cpucycles()
}

#[no_mangle]
pub extern "C" fn TestLib_cpucycles_begin() -> Cycles {
    cycles::cpucycles_begin()
}

#[no_mangle]
pub extern "C" fn TestLib_cpucycles_end() -> Cycles {
    cycles::cpucycles_end()
}
