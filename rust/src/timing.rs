//! Elapsed-time and cycle-count reporting.

use std::io::{self, Write};
use std::os::raw::c_long;

use crate::config::{settings, ReportFormat};
use crate::cycles::{cycles_per_round, Cycles};
use crate::error::Result;
use crate::report::PerfReport;

/// `clock_t` as the C library on the supported targets defines it.
pub type ClockTicks = c_long;

/// `CLOCKS_PER_SEC`, fixed at one million by POSIX/XSI.
pub const CLOCKS_PER_SEC: f64 = 1_000_000.0;

extern "C" {
    fn clock() -> ClockTicks;
}

/// Processor time used so far, in `clock()` ticks.
pub fn process_clock() -> ClockTicks {
    // SAFETY: clock() takes no arguments and only reads process accounting.
    unsafe { clock() }
}

#[inline]
pub fn user_time_seconds(t1: ClockTicks, t2: ClockTicks) -> f64 {
    (t2 as f64 - t1 as f64) / CLOCKS_PER_SEC
}

fn emit<W: Write>(w: &mut W, report: PerfReport, format: ReportFormat) -> io::Result<()> {
    writeln!(w, "{}", report.render(format))
}

pub fn print_clock_diff_to<W: Write>(
    w: &mut W,
    t1: ClockTicks,
    t2: ClockTicks,
    format: ReportFormat,
) -> io::Result<()> {
    let seconds = user_time_seconds(t1, t2);
    tracing::debug!(t1, t2, seconds, "clock diff");
    emit(w, PerfReport::UserTime { seconds }, format)
}

/// Print `"User time: <seconds>"` for two `clock()` samples.
pub fn print_clock_diff(t1: ClockTicks, t2: ClockTicks) -> Result<()> {
    let mut out = io::stdout().lock();
    print_clock_diff_to(&mut out, t1, t2, settings().report)?;
    out.flush()?;
    Ok(())
}

pub fn print_cycles_per_round_to<W: Write>(
    w: &mut W,
    c1: Cycles,
    c2: Cycles,
    rounds: u32,
    format: ReportFormat,
) -> io::Result<()> {
    let per_round = cycles_per_round(c1, c2, rounds);
    if rounds == 0 {
        tracing::warn!(c1, c2, "cycles per round requested for zero rounds");
    }
    emit(
        w,
        PerfReport::CyclesPerRound {
            rounds,
            cycles_per_round: per_round,
        },
        format,
    )
}

/// Print the average number of counter ticks per round between two samples.
pub fn print_cycles_per_round(c1: Cycles, c2: Cycles, rounds: u32) -> Result<()> {
    let mut out = io::stdout().lock();
    print_cycles_per_round_to(&mut out, c1, c2, rounds, settings().report)?;
    out.flush()?;
    Ok(())
}

pub fn perr_to<W: Write>(w: &mut W, code: u32) -> io::Result<()> {
    writeln!(w, "Got error code {}.", code)
}

pub fn perr(code: u32) -> Result<()> {
    let mut out = io::stdout().lock();
    perr_to(&mut out, code)?;
    out.flush()?;
    Ok(())
}
