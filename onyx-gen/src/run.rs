use std::fmt;
use std::time::Duration;

use indicatif::ProgressBar;
use num_bigint::BigUint;
use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

use crate::alphabet::{Alphabet, LengthRange};
use crate::enumerator::{Enumerator, exhaustive_total};
use crate::error::{ConfigError, Result};
use crate::filter::ExclusionSet;
use crate::progress::{DEFAULT_REPORT_EVERY, ProgressReporter};
use crate::sampler::Sampler;
use crate::sink::LineSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Every string of every length, in odometer order.
    Exhaustive,
    /// This many accepted random candidates.
    RandomSample(u64),
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Exhaustive => f.write_str("exhaustive"),
            GenerationMode::RandomSample(count) => write!(f, "random({count})"),
        }
    }
}

/// Validated, immutable parameters of one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    alphabet: Alphabet,
    lengths: LengthRange,
    mode: GenerationMode,
    exclusions: ExclusionSet,
    report_every: u64,
}

impl RunConfig {
    /// Rejects a zero sample count, and sample runs whose filters no candidate can pass.
    pub fn new(
        alphabet: Alphabet,
        lengths: LengthRange,
        mode: GenerationMode,
        exclusions: ExclusionSet,
    ) -> std::result::Result<Self, ConfigError> {
        if let GenerationMode::RandomSample(count) = mode {
            if count == 0 {
                return Err(ConfigError::ZeroCount);
            }
            // Sampling retries rejected draws, so it would never finish.
            if !exclusions.admits_any(&alphabet, lengths.max()) {
                return Err(ConfigError::NoAcceptableCandidates);
            }
        }

        Ok(Self { alphabet, lengths, mode, exclusions, report_every: DEFAULT_REPORT_EVERY })
    }

    pub fn with_report_every(mut self, every: u64) -> std::result::Result<Self, ConfigError> {
        if every == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }
        self.report_every = every;
        Ok(self)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn lengths(&self) -> LengthRange {
        self.lengths
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn exclusions(&self) -> ExclusionSet {
        self.exclusions
    }

    pub fn report_every(&self) -> u64 {
        self.report_every
    }

    /// Candidates the run expects to attempt. Exhaustive totals are exact at any size.
    pub fn total(&self) -> BigUint {
        match self.mode {
            GenerationMode::Exhaustive => exhaustive_total(self.alphabet.len(), self.lengths),
            GenerationMode::RandomSample(count) => BigUint::from(count),
        }
    }
}

/// Outcome of a run that was not aborted by an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidates accepted and written.
    pub written: u64,
    /// Candidates produced, including excluded ones.
    pub attempted: u64,
    pub bytes: u64,
    pub total: BigUint,
    /// Stopped early by cancellation.
    pub interrupted: bool,
    pub elapsed: Duration,
}

/// Generates candidates per `config` into `sink`.
///
/// Progress is drawn on `bar` every [`RunConfig::report_every`] written lines.
/// `cancel` is checked between candidates; once cancelled the run stops before
/// the next candidate. Whatever the outcome, the sink is finished before
/// returning, so the output holds only whole lines.
pub async fn generate<W>(
    config: &RunConfig,
    sink: LineSink<W>,
    bar: ProgressBar,
    cancel: &CancellationToken,
) -> Result<RunSummary>
where
    W: AsyncWrite + Unpin,
{
    let total = config.total();
    tracing::info!(
        alphabet = config.alphabet.len(),
        min_len = config.lengths.min(),
        max_len = config.lengths.max(),
        mode = %config.mode,
        exclusions = %config.exclusions,
        total = %total,
        "starting generation"
    );
    let reporter = ProgressReporter::new(bar, total, config.report_every);

    match config.mode {
        GenerationMode::Exhaustive => {
            let candidates = Enumerator::new(&config.alphabet, config.lengths);
            drive(candidates, None, config, sink, reporter, cancel).await
        }
        GenerationMode::RandomSample(count) => {
            let candidates = Sampler::new(&config.alphabet, config.lengths);
            drive(candidates, Some(count), config, sink, reporter, cancel).await
        }
    }
}

async fn drive<I, W>(
    candidates: I,
    target: Option<u64>,
    config: &RunConfig,
    mut sink: LineSink<W>,
    reporter: ProgressReporter,
    cancel: &CancellationToken,
) -> Result<RunSummary>
where
    I: Iterator<Item = String>,
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    let mut attempted = 0u64;
    let mut interrupted = false;
    let mut failure = None;

    for candidate in candidates {
        if target.is_some_and(|target| written >= target) {
            break;
        }
        if cancel.is_cancelled() {
            interrupted = true;
            break;
        }

        attempted += 1;
        if config.exclusions.is_excluded(&candidate) {
            continue;
        }

        if let Err(err) = sink.write_line(&candidate).await {
            failure = Some(err);
            break;
        }
        written += 1;

        if reporter.observe(written).is_some() {
            // Let the signal listener run on single-threaded runtimes.
            tokio::task::yield_now().await;
        }
    }

    let elapsed = reporter.elapsed();
    let finished = sink.finish().await;
    reporter.finish(written);

    if let Some(err) = failure {
        if let Err(flush_err) = finished {
            tracing::warn!(error = %flush_err, "flush after write failure also failed");
        }
        tracing::error!(error = %err, written, "write failed");
        return Err(err.into());
    }
    let stats = finished?;
    debug_assert_eq!(stats.lines, written);

    if interrupted {
        tracing::warn!(written, attempted, "generation interrupted");
    } else {
        tracing::info!(written, attempted, bytes = stats.bytes, "generation complete");
    }

    Ok(RunSummary {
        written,
        attempted,
        bytes: stats.bytes,
        total: config.total(),
        interrupted,
        elapsed,
    })
}
