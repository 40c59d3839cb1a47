//! Performance reports, as console text or JSON lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ReportFormat;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PerfReport {
    UserTime { seconds: f64 },
    CyclesPerRound { rounds: u32, cycles_per_round: f32 },
}

impl fmt::Display for PerfReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerfReport::UserTime { seconds } => write!(f, "User time: {:.6}", seconds),
            PerfReport::CyclesPerRound {
                rounds,
                cycles_per_round,
            } => write!(
                f,
                "[perf] cpu cycles per round (averaged over {}) is {:.6}",
                rounds, cycles_per_round
            ),
        }
    }
}

impl PerfReport {
    fn is_finite(&self) -> bool {
        match self {
            PerfReport::UserTime { seconds } => seconds.is_finite(),
            PerfReport::CyclesPerRound {
                cycles_per_round, ..
            } => cycles_per_round.is_finite(),
        }
    }

    /// Render as a single line, without the trailing newline.
    ///
    /// JSON has no infinity or NaN, so non-finite figures always print as text.
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Json if self.is_finite() => serde_json::to_string(self)
                .unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "JSON report unavailable");
                    self.to_string()
                }),
            _ => self.to_string(),
        }
    }
}
