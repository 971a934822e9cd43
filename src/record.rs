//! Per-repetition timing records and their output formats.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Result;

/// Column names, in record order.
pub const CSV_HEADER: &str =
    "backend,variant,threads,N,bins,min,max,seed,gen_ms,hist_ms,total_ms,sum_hist";

/// Outcome of one generate/count/validate cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingRecord {
    pub backend: &'static str,
    pub variant: &'static str,
    #[serde(rename = "threads")]
    pub threads_used: usize,
    #[serde(rename = "N")]
    pub n: u64,
    pub bins: usize,
    pub min: i32,
    pub max: i32,
    pub seed: u32,
    pub gen_ms: u64,
    pub hist_ms: u64,
    pub total_ms: u64,
    pub sum_hist: u64,
}

impl fmt::Display for TimingRecord {
    /// One CSV row in [`CSV_HEADER`] order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            self.backend,
            self.variant,
            self.threads_used,
            self.n,
            self.bins,
            self.min,
            self.max,
            self.seed,
            self.gen_ms,
            self.hist_ms,
            self.total_ms,
            self.sum_hist
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format `{other}` (use: csv | json)")),
        }
    }
}

/// Writes records to `out`, one per line.
pub struct RecordWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Writes the CSV header ahead of the records; a no-op for JSON lines.
    pub fn header(&mut self) -> Result<()> {
        if self.format == OutputFormat::Csv {
            self.csv_header()?;
        }
        Ok(())
    }

    /// Writes the CSV header whatever the record format is. Used when the
    /// header itself is the requested output.
    pub fn csv_header(&mut self) -> Result<()> {
        writeln!(self.out, "{CSV_HEADER}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn write(&mut self, record: &TimingRecord) -> Result<()> {
        match self.format {
            OutputFormat::Csv => writeln!(self.out, "{record}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, record)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
