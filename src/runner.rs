//! External survey tool invocation
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{segment::Segment, Error, Result};

/// Default external tool
pub const DEFAULT_PROGRAM: &str = "orca_prhrep";

/// Arguments requesting the 24h database catalogue
pub const LIST_ARGS: [&str; 1] = ["-list"];

/// Outcome of one external invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    /// Exit code, None when terminated by a signal
    pub status: Option<i32>,
    /// Captured standard output
    pub stdout: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// [ExternalToolRunner] abstracts the survey tool so the pipeline
/// can be driven by anything that produces the expected files.
/// The tool is expected to run within the pipeline working directory:
/// file arguments are relative to it.
/// Invocations are blocking. There is no timeout: a hung tool
/// hangs the caller.
pub trait ExternalToolRunner {
    /// Runs the tool with given arguments, waiting for its completion.
    /// Only a failure to spawn is reported as an error, the exit status
    /// is left to the caller.
    fn run(&self, args: &[String]) -> Result<ToolOutput>;
    /// Readable command line, for traces
    fn command_line(&self, args: &[String]) -> String {
        args.join(" ")
    }
}

/// Report extraction request, for one system and one 24h database
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    /// Observation period
    pub period: &'a str,
    /// Slack (padding) of the observation interval
    pub slack: &'a str,
    /// External header to be prepended by the tool,
    /// relative to the working directory
    pub header: &'a Path,
    /// DGPS system code
    pub system: &'a str,
    /// 24h database
    pub segment: &'a Segment,
}

impl<'a> ReportRequest<'a> {
    /// Name the tool will use for the raw report. It appends
    /// `.<year>_<jjj>` itself.
    pub fn raw_stem(&self) -> String {
        raw_stem(self.system, self.segment)
    }
    /// `-rep 1 -s <P> <S> [HDR] [NAME] [SYSTEM] [24H_DB]`
    pub fn args(&self) -> Vec<String> {
        vec![
            "-rep".to_string(),
            "1".to_string(),
            "-s".to_string(),
            self.period.to_string(),
            self.slack.to_string(),
            self.header.to_string_lossy().to_string(),
            self.raw_stem(),
            self.system.to_string(),
            self.segment.to_string(),
        ]
    }
}

/// Raw report name prefix, for given system and 24h database
pub(crate) fn raw_stem(system: &str, segment: &Segment) -> String {
    format!("{}{}_RAW", system, segment)
}

/// [OrcaPrhrep] runs the actual survey tool, within a working directory
#[derive(Debug, Clone)]
pub struct OrcaPrhrep {
    program: PathBuf,
    workdir: PathBuf,
}

impl Default for OrcaPrhrep {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            workdir: PathBuf::from("."),
        }
    }
}

impl OrcaPrhrep {
    /// Copies and returns [OrcaPrhrep] with custom program
    pub fn with_program(&self, program: impl AsRef<Path>) -> Self {
        let mut s = self.clone();
        s.program = program.as_ref().to_path_buf();
        s
    }
    /// Copies and returns [OrcaPrhrep] running in given directory
    pub fn with_workdir(&self, workdir: impl AsRef<Path>) -> Self {
        let mut s = self.clone();
        s.workdir = workdir.as_ref().to_path_buf();
        s
    }
}

impl ExternalToolRunner for OrcaPrhrep {
    fn run(&self, args: &[String]) -> Result<ToolOutput> {
        let command = self.command_line(args);
        info!("{}", command);
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| Error::ToolSpawn {
                command: command.clone(),
                source,
            })?;
        let output = ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        };
        debug!("{} - status: {:?}", command, output.status);
        Ok(output)
    }
    fn command_line(&self, args: &[String]) -> String {
        let mut line = self.program.to_string_lossy().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
