//! Console output for the command line.
//!
//! This is for what the user asked to see. Diagnostics about the crawl
//! itself go through `tracing` instead.

use std::io::{self, Result, Write};

/// Controls where logs for a specific channel are routed to
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Policy {
    Stdout,
    Stderr,
    Silent,
}

pub struct Policies {
    /// Progress lines like "--- Crawl ---".
    pub status: Policy,

    /// The result of a command: an outline, a document, some stats.
    pub report: Policy,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            status: Policy::Stdout,
            report: Policy::Stdout,
        }
    }
}

/// One of the process's real streams, or an in-memory recording of one.
pub enum Stream {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Recorded(Vec<u8>),
}

impl Stream {
    /// Everything written so far, if this stream is recorded.
    pub fn recorded(&self) -> Option<String> {
        match self {
            Self::Recorded(buf) => Some(String::from_utf8_lossy(buf).into_owned()),
            _ => None,
        }
    }
}

impl Write for Stream {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::Stdout(w) => w.write(bytes),
            Self::Stderr(w) => w.write(bytes),
            Self::Recorded(w) => w.write(bytes),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Stderr(w) => w.flush(),
            Self::Recorded(_) => Ok(()),
        }
    }
}

pub enum LogWriter<'a> {
    Stdout(&'a mut Stream),
    Stderr(&'a mut Stream),
    Silent,
}

impl Write for LogWriter<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::Stdout(w) => w.write(bytes),
            Self::Stderr(w) => w.write(bytes),
            Self::Silent => Ok(bytes.len()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Stderr(w) => w.flush(),
            Self::Silent => Ok(()),
        }
    }
}

pub struct Logger {
    pub stdout: Stream,
    pub stderr: Stream,
    pub pol: Policies,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            stdout: Stream::Stdout(io::stdout()),
            stderr: Stream::Stderr(io::stderr()),
            pol: Policies::default(),
        }
    }

    /// Records both streams in memory, for tests.
    pub fn new_vec() -> Self {
        Self {
            stdout: Stream::Recorded(vec![]),
            stderr: Stream::Recorded(vec![]),
            pol: Policies::default(),
        }
    }

    fn lw_for(&mut self, pol: Policy) -> LogWriter {
        match pol {
            Policy::Stdout => LogWriter::Stdout(&mut self.stdout),
            Policy::Stderr => LogWriter::Stderr(&mut self.stderr),
            Policy::Silent => LogWriter::Silent,
        }
    }

    pub fn status(&mut self) -> LogWriter {
        self.lw_for(self.pol.status)
    }

    pub fn report(&mut self) -> LogWriter {
        self.lw_for(self.pol.report)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
