//! Progress, throughput and ETA over totals of any size.

use std::fmt;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Default number of accepted candidates between two progress reports.
pub const DEFAULT_REPORT_EVERY: u64 = 1000;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {msg}";

/// Estimated time left, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eta {
    /// Nothing written yet, so no rate to extrapolate from.
    Unknown,
    Remaining(BigUint),
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = match self {
            Eta::Unknown => return f.write_str("unknown"),
            Eta::Remaining(secs) => secs,
        };
        match secs.to_u64() {
            Some(s) if s >= 3600 => write!(f, "{}h {:02}m {:02}s", s / 3600, s / 60 % 60, s % 60),
            Some(s) if s >= 60 => write!(f, "{}m {:02}s", s / 60, s % 60),
            _ => write!(f, "{secs}s"),
        }
    }
}

/// Point-in-time progress figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub count: u64,
    pub total: BigUint,
    /// `100 * count / total`, clamped to `0..=100`.
    pub percent: u8,
    /// Candidates per second.
    pub rate: u64,
    pub eta: Eta,
}

impl Snapshot {
    pub fn compute(count: u64, total: &BigUint, elapsed: Duration) -> Self {
        let percent = if total.is_zero() {
            100
        } else {
            (BigUint::from(count) * 100u32 / total).to_u8().unwrap_or(100).min(100)
        };

        // Sub-second elapsed times count as one second.
        let rate = count / elapsed.as_secs().max(1);

        let eta = if rate == 0 {
            Eta::Unknown
        } else {
            let count = BigUint::from(count);
            let remaining = if *total > count { total - &count } else { BigUint::zero() };
            Eta::Remaining(remaining / rate)
        };

        Self { count, total: total.clone(), percent, rate, eta }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} | {}% | {} pw/s | ETA: {}",
            self.count, self.total, self.percent, self.rate, self.eta
        )
    }
}

/// Styled bar drawn on stderr, away from the data stream.
pub fn stderr_bar() -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stderr());
    bar.set_style(
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    bar
}

/// Emits a [`Snapshot`] every `every` accepted candidates.
///
/// The bar's position is the percentage, so totals beyond `u64` still draw.
pub struct ProgressReporter {
    bar: ProgressBar,
    total: BigUint,
    every: u64,
    started: Instant,
}

impl ProgressReporter {
    /// `every` must be non-zero; [`crate::RunConfig`] validates it.
    pub fn new(bar: ProgressBar, total: BigUint, every: u64) -> Self {
        bar.set_length(100);
        Self { bar, total, every: every.max(1), started: Instant::now() }
    }

    #[inline]
    pub fn is_due(&self, count: u64) -> bool {
        count % self.every == 0
    }

    /// Reports if `count` lands on the cadence.
    pub fn observe(&self, count: u64) -> Option<Snapshot> {
        self.is_due(count).then(|| self.report(count))
    }

    pub fn report(&self, count: u64) -> Snapshot {
        let snapshot = Snapshot::compute(count, &self.total, self.started.elapsed());
        self.bar.set_position(u64::from(snapshot.percent));
        self.bar.set_message(snapshot.to_string());
        tracing::debug!(
            count = snapshot.count,
            percent = snapshot.percent,
            rate = snapshot.rate,
            eta = %snapshot.eta,
            "progress"
        );
        snapshot
    }

    /// Reports the final state and leaves the bar on screen.
    pub fn finish(self, count: u64) -> Snapshot {
        let snapshot = self.report(count);
        self.bar.abandon();
        snapshot
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
