//! Run a single testlib operation from the command line.
//!
//! Exists so the exit statuses of the terminating paths can be observed from
//! outside the process.

use clap::{Parser, Subcommand, ValueEnum};

use testlib::{or_exit, parse_hex};

#[derive(Parser)]
#[command(name = "testlib-probe", about = "Exercise testlib checks from the shell")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Width {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

#[derive(Subcommand)]
enum Command {
    /// Print a hex buffer tagged with a file and line
    Hex {
        bytes: String,
        #[arg(long, default_value = "probe")]
        file: String,
        #[arg(long, default_value_t = 0)]
        line: i32,
    },
    /// Compare an expected buffer against a computed one
    Compare {
        label: String,
        expected: String,
        computed: String,
    },
    /// Check two integers of the given width for equality
    Check {
        #[arg(value_enum)]
        width: Width,
        #[arg(allow_hyphen_values = true)]
        x: String,
        #[arg(allow_hyphen_values = true)]
        y: String,
    },
    /// Allocate through the C allocator and release the block
    Malloc { size: usize },
    /// Report user time between two clock() samples
    ClockDiff {
        #[arg(allow_hyphen_values = true)]
        t1: i64,
        #[arg(allow_hyphen_values = true)]
        t2: i64,
    },
    /// Report cycles per round between two counter samples
    Cycles { c1: u64, c2: u64, rounds: u32 },
    /// Print an error code
    Perr { code: u32 },
}

fn parse_pair<T: std::str::FromStr>(x: &str, y: &str) -> (T, T) {
    match (x.parse(), y.parse()) {
        (Ok(a), Ok(b)) => (a, b),
        _ => {
            eprintln!("values {x:?} and {y:?} do not fit the requested width");
            std::process::exit(2);
        }
    }
}

fn run_check(width: Width, x: &str, y: &str) {
    match width {
        Width::I8 => {
            let (a, b) = parse_pair::<i8>(x, y);
            testlib::check8(a, b)
        }
        Width::I16 => {
            let (a, b) = parse_pair::<i16>(x, y);
            testlib::check16(a, b)
        }
        Width::I32 => {
            let (a, b) = parse_pair::<i32>(x, y);
            testlib::check32(a, b)
        }
        Width::I64 => {
            let (a, b) = parse_pair::<i64>(x, y);
            testlib::check64(a, b)
        }
        Width::U8 => {
            let (a, b) = parse_pair::<u8>(x, y);
            testlib::checku8(a, b)
        }
        Width::U16 => {
            let (a, b) = parse_pair::<u16>(x, y);
            testlib::checku16(a, b)
        }
        Width::U32 => {
            let (a, b) = parse_pair::<u32>(x, y);
            testlib::checku32(a, b)
        }
        Width::U64 => {
            let (a, b) = parse_pair::<u64>(x, y);
            testlib::checku64(a, b)
        }
    }
}

fn main() {
    testlib::logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Hex { bytes, file, line } => {
            let buf = or_exit(parse_hex(&bytes));
            or_exit(testlib::hex::print_buf(&buf, &file, line));
        }
        Command::Compare {
            label,
            expected,
            computed,
        } => {
            let expected = or_exit(parse_hex(&expected));
            let computed = or_exit(parse_hex(&computed));
            testlib::compare_and_print_or_exit(&label, &expected, &computed);
        }
        Command::Check { width, x, y } => {
            run_check(width, &x, &y);
            println!("check passed");
        }
        Command::Malloc { size } => {
            let block = testlib::unsafe_malloc(size);
            // SAFETY: the block came from the C allocator just above.
            unsafe { testlib::alloc::free_c(block) };
            println!("allocated {size} bytes");
        }
        Command::ClockDiff { t1, t2 } => or_exit(testlib::print_clock_diff(t1 as _, t2 as _)),
        Command::Cycles { c1, c2, rounds } => {
            or_exit(testlib::print_cycles_per_round(c1, c2, rounds))
        }
        Command::Perr { code } => or_exit(testlib::perr(code)),
    }
}
