//! Password candidate generation for wordlists.
//!
//! Candidates are built from an ordered [`Alphabet`] over a [`LengthRange`],
//! either exhaustively with the odometer [`Enumerator`] or by drawing a fixed
//! number of random strings with the [`Sampler`]. An [`ExclusionSet`] drops
//! weak shapes such as all-lowercase or digits-only strings, and accepted
//! candidates are streamed one per line through a [`LineSink`].
//!
//! Memory use is independent of the output size: the enumerator keeps one
//! digit per position, and the sink holds a fixed-size buffer that waits for
//! the file to drain. Totals are exact [`num_bigint::BigUint`] values, so
//! progress and ETA stay correct for search spaces far beyond `u64`.
//!
//! # Usage
//!
//! ```sh
//! onyx -a l/u/d -e x/y -l 6-8 -f words.txt
//! onyx -a l/u/d/s -e w -l 12-16 -n 1000 -f sample.txt
//! ```

pub mod alphabet;
pub mod enumerator;
pub mod error;
pub mod filter;
pub mod progress;
pub mod run;
pub mod sampler;
pub mod sink;

pub use alphabet::{Alphabet, CharClass, LengthRange};
pub use enumerator::{Enumerator, exhaustive_total};
pub use error::{ConfigError, Error, Result};
pub use filter::{ExclusionRule, ExclusionSet};
pub use progress::{DEFAULT_REPORT_EVERY, Eta, ProgressReporter, Snapshot};
pub use run::{GenerationMode, RunConfig, RunSummary, generate};
pub use sampler::Sampler;
pub use sink::{LINE_ENDING, LineSink, SinkStats};
