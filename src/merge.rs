//! Raw report gluing.
//!
//! Each raw report is made of header lines (`*`, `D`, `"`), one source
//! line (`S,<24h database>`) and data lines. The external tool always
//! terminates a raw report with one line of rubbish, which is dropped.
//! The final report is one header, with a single source line listing every
//! contributing 24h database, followed by all data lines in processing order.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;

use crate::Result;

/// Source line prefix, in the final report
pub const SOURCE_LINE_PREFIX: &str = "Source file(s)";

/// Raw report line classification, based on its first character
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `*` decorative header line
    Decorative,
    /// `D` descriptive header line
    Descriptive,
    /// `S` source (24h database) line
    Source,
    /// `"` quoted header line
    Quoted,
    /// Anything else
    Data,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        match line.chars().next() {
            Some('*') => Self::Decorative,
            Some('D') => Self::Descriptive,
            Some('S') => Self::Source,
            Some('"') => Self::Quoted,
            _ => Self::Data,
        }
    }
    pub fn is_header(&self) -> bool {
        !matches!(self, Self::Data)
    }
}

/// How header lines of several raw reports are combined
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Header lines of every raw report are kept
    #[default]
    Accumulate,
    /// Only the header of the last raw report is kept.
    /// The source line still lists every 24h database.
    LastSegment,
}

#[derive(Debug, Clone, PartialEq)]
enum HeaderLine {
    Verbatim(String),
    /// Where the source line is emitted
    SourceSlot,
}

/// [Merger] is the state machine that glues raw reports together.
/// Feed raw reports in 24h database order with [Merger::push_raw],
/// then [Merger::finish].
#[derive(Debug, Clone, Default)]
pub struct Merger {
    policy: HeaderPolicy,
    header: Vec<HeaderLine>,
    sources: Vec<String>,
    data: Vec<String>,
    raw_reports: usize,
}

impl Merger {
    pub fn new(policy: HeaderPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }
    /// Number of raw reports processed so far
    pub fn raw_reports(&self) -> usize {
        self.raw_reports
    }
    /// Processes the content of one raw report
    pub fn push_raw(&mut self, content: &str) {
        if self.policy == HeaderPolicy::LastSegment {
            self.header.clear();
        }
        let mut lines = content.lines().collect::<Vec<_>>();
        // last line is always rubbish
        lines.pop();
        for line in lines {
            self.push_line(line);
        }
        self.raw_reports += 1;
    }
    fn push_line(&mut self, line: &str) {
        match LineKind::classify(line) {
            LineKind::Source => self.merge_source(line),
            LineKind::Data => self.data.push(format!("{}\n", line)),
            _ => self.header.push(HeaderLine::Verbatim(format!("{}\n", line))),
        }
    }
    /// Merges one source line into the single source line of the report.
    /// The source line is positioned where it first appeared.
    fn merge_source(&mut self, line: &str) {
        let source = match line.split(',').nth(1) {
            Some(source) => source.trim(),
            None => {
                warn!("ignoring source line without source: \"{}\"", line);
                return;
            },
        };
        if !self.sources.iter().any(|s| s == source) {
            self.sources.push(source.to_string());
        }
        if !self.header.contains(&HeaderLine::SourceSlot) {
            self.header.push(HeaderLine::SourceSlot);
        }
    }
    /// Current state of the source line
    pub fn source_line(&self) -> String {
        if self.sources.is_empty() {
            format!("{}\n", SOURCE_LINE_PREFIX)
        } else {
            format!("{},{}\n", SOURCE_LINE_PREFIX, self.sources.iter().join(","))
        }
    }
    /// Glues given raw report files, in the given order
    pub fn merge_files<P: AsRef<Path>>(paths: &[P], policy: HeaderPolicy) -> Result<FinalReport> {
        let mut merger = Self::new(policy);
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)?;
            merger.push_raw(&content);
            debug!("\"{}\" merged", path.display());
        }
        Ok(merger.finish())
    }
    pub fn finish(self) -> FinalReport {
        let source_line = self.source_line();
        let header = self
            .header
            .into_iter()
            .map(|line| match line {
                HeaderLine::Verbatim(line) => line,
                HeaderLine::SourceSlot => source_line.clone(),
            })
            .collect();
        FinalReport {
            header,
            data: self.data,
        }
    }
}

/// [FinalReport] is the consolidated report of one system, for one day.
/// All lines are `\n` terminated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalReport {
    pub header: Vec<String>,
    pub data: Vec<String>,
}

impl FinalReport {
    /// True when no raw report contributed anything
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.data.is_empty()
    }
    /// Header lines followed by data lines
    pub fn lines(&self) -> impl Iterator<Item = &String> + '_ {
        self.header.iter().chain(self.data.iter())
    }
    /// Writes (or rewrites) the report
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        for line in self.lines() {
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()?;
        Ok(path.to_path_buf())
    }
}

impl std::fmt::Display for FinalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in self.lines() {
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
