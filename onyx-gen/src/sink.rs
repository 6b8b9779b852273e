use std::io;
use std::path::Path;

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::Error;

/// Line terminator of the host platform.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Default write buffer size. The sink never holds more than this in memory.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Totals reported once a sink has been finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub lines: u64,
    pub bytes: u64,
}

/// Appends one candidate per line to an async byte stream.
///
/// Writes go through a fixed-size buffer; when it is full the buffer is drained
/// into the inner writer, and if that writer is not ready (`Poll::Pending`) the
/// calling task is suspended until it is woken, then resumes with the same
/// bytes. Lines are emitted in call order.
///
/// Callers must end every run with [`LineSink::finish`], including after a
/// write error, so buffered lines reach the medium.
pub struct LineSink<W> {
    writer: BufWriter<W>,
    line: Vec<u8>,
    stats: SinkStats,
}

impl LineSink<File> {
    /// Opens `path` for appending, creating it if missing.
    pub async fn append(path: &Path) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
        Ok(Self::new(file))
    }

    /// Opens `path` for writing, discarding any existing contents.
    pub async fn truncate(path: &Path) -> Result<Self, Error> {
        let file = File::create(path)
            .await
            .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
        Ok(Self::new(file))
    }
}

impl<W: AsyncWrite + Unpin> LineSink<W> {
    pub fn new(inner: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, inner)
    }

    pub fn with_capacity(capacity: usize, inner: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, inner),
            line: Vec::with_capacity(64),
            stats: SinkStats::default(),
        }
    }

    /// Writes `candidate` followed by [`LINE_ENDING`], waiting for the medium if needed.
    pub async fn write_line(&mut self, candidate: &str) -> io::Result<()> {
        self.line.clear();
        self.line.extend_from_slice(candidate.as_bytes());
        self.line.extend_from_slice(LINE_ENDING.as_bytes());

        self.writer.write_all(&self.line).await?;

        self.stats.lines += 1;
        self.stats.bytes += self.line.len() as u64;
        Ok(())
    }

    /// Lines accepted so far.
    #[inline]
    pub fn lines(&self) -> u64 {
        self.stats.lines
    }

    /// Flushes everything buffered and shuts the writer down.
    pub async fn finish(mut self) -> io::Result<SinkStats> {
        self.writer.flush().await?;
        self.writer.shutdown().await?;
        Ok(self.stats)
    }
}
