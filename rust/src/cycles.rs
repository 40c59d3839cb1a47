//! CPU cycle counter sampling for per-round performance figures.
//!
//! x86_64 reads the time-stamp counter directly. Other targets report
//! nanoseconds on a monotonic clock; the per-round arithmetic is the same,
//! only the unit differs.

/// A counter sample.
pub type Cycles = u64;

/// Plain `rdtsc` read.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn cpucycles() -> Cycles {
    // SAFETY: rdtsc is available on every x86_64 CPU.
    unsafe { core::arch::x86_64::_rdtsc() }
}

/// Sample taken before the measured region: `cpuid` keeps earlier
/// instructions from drifting past the read.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn cpucycles_begin() -> Cycles {
    use core::arch::x86_64::{__cpuid, _rdtsc};
    // SAFETY: cpuid leaf 0 and rdtsc are available on every x86_64 CPU.
    unsafe {
        let _ = __cpuid(0);
        _rdtsc()
    }
}

/// Sample taken after the measured region: `rdtscp` waits for earlier
/// instructions, `cpuid` keeps later ones from starting early.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn cpucycles_end() -> Cycles {
    use core::arch::x86_64::{__cpuid, __rdtscp, _rdtsc};
    let mut aux = 0u32;
    // SAFETY: cpuid is available on every x86_64 CPU; leaf 0x8000_0001
    // EDX bit 27 reports RDTSCP support.
    let has_rdtscp = unsafe {
        __cpuid(0x8000_0000).eax >= 0x8000_0001 && (__cpuid(0x8000_0001).edx >> 27) & 1 == 1
    };
    // SAFETY: rdtscp is only issued when the CPU reports it; rdtsc and cpuid
    // leaf 0 exist on every x86_64 CPU.
    unsafe {
        let t = if has_rdtscp { __rdtscp(&mut aux) } else { _rdtsc() };
        let _ = __cpuid(0);
        t
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn monotonic_nanos() -> Cycles {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    ANCHOR.get_or_init(Instant::now).elapsed().as_nanos() as Cycles
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn cpucycles() -> Cycles {
    monotonic_nanos()
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn cpucycles_begin() -> Cycles {
    monotonic_nanos()
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn cpucycles_end() -> Cycles {
    monotonic_nanos()
}

/// Counter delta divided by `rounds`. The delta wraps like unsigned C
/// arithmetic; zero rounds yields infinity (or NaN for a zero delta).
#[inline]
pub fn cycles_per_round(start: Cycles, end: Cycles, rounds: u32) -> f32 {
    end.wrapping_sub(start) as f32 / rounds as f32
}
