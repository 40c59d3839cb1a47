//! Fixed-width integer equality checks.

use std::fmt::Display;

use crate::error::{or_exit, Result, TestFailure};

/// Integer widths the harness checks. Sealed to the eight fixed-width types.
pub trait CheckInt: Copy + PartialEq + Display + private::Sealed {
    /// Bit width, for diagnostics.
    const BITS: u32;
    const SIGNED: bool;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_check_int {
    ($($t:ty => $signed:expr),* $(,)?) => {
        $(
            impl private::Sealed for $t {}
            impl CheckInt for $t {
                const BITS: u32 = <$t>::BITS;
                const SIGNED: bool = $signed;
            }
        )*
    };
}

impl_check_int! {
    i8 => true, i16 => true, i32 => true, i64 => true,
    u8 => false, u16 => false, u32 => false, u64 => false,
}

/// `Ok` when `x == y`, otherwise a [`TestFailure::CheckFailed`] carrying
/// both values in decimal.
#[inline]
pub fn check<T: CheckInt>(x: T, y: T) -> Result<()> {
    if x == y {
        return Ok(());
    }
    tracing::debug!(bits = T::BITS, signed = T::SIGNED, %x, %y, "integer check failed");
    Err(TestFailure::CheckFailed {
        left: x.to_string(),
        right: y.to_string(),
    })
}

/// Like [`check`], exiting with status 253 on inequality.
#[inline]
pub fn check_or_exit<T: CheckInt>(x: T, y: T) {
    or_exit(check(x, y))
}

macro_rules! mk_check {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[doc = concat!("Exit with status 253 unless two `", stringify!($t), "` values are equal.")]
            #[inline]
            pub fn $name(x: $t, y: $t) {
                check_or_exit(x, y)
            }
        )*
    };
}

mk_check! {
    check8: i8, check16: i16, check32: i32, check64: i64,
    checku8: u8, checku16: u16, checku32: u32, checku64: u64,
}

/// Keeps a value observable to the optimizer; intentionally a no-op.
#[inline(never)]
pub fn touch(x: i32) {
    std::hint::black_box(x);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_pass_every_width() {
        check(i8::MIN, i8::MIN).unwrap();
        check(-300i16, -300i16).unwrap();
        check(i32::MAX, i32::MAX).unwrap();
        check(i64::MIN, i64::MIN).unwrap();
        check(u8::MAX, u8::MAX).unwrap();
        check(0u16, 0u16).unwrap();
        check(7u32, 7u32).unwrap();
        check(u64::MAX, u64::MAX).unwrap();
    }

    #[test]
    fn test_signed_failure_keeps_sign() {
        let err = check(-5i8, 5i8).unwrap_err();
        assert_eq!(err.to_string(), "Test check failure: -5 != 5");
        assert_eq!(err.exit_code(), 253);
    }

    #[test]
    fn test_unsigned_failure_prints_full_range() {
        let err = check(u64::MAX, 0u64).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Test check failure: 18446744073709551615 != 0"
        );
    }

    #[test]
    fn test_named_checks_pass_on_equality() {
        check8(1, 1);
        check16(2, 2);
        check32(3, 3);
        check64(4, 4);
        checku8(5, 5);
        checku16(6, 6);
        checku32(7, 7);
        checku64(8, 8);
        touch(9);
    }
}
