use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use crate::prelude::*;

/// Survey tool stand-in: lists a fixed catalogue and writes
/// predefined raw reports, like the real tool would.
pub struct FakeTool {
    pub workdir: PathBuf,
    pub catalogue: String,
    /// Raw report content, per (system, 24h database)
    pub raw: HashMap<(String, String), String>,
    /// 24h databases for which the tool exits in error
    pub failing: HashSet<String>,
    /// Every invocation, in order
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl FakeTool {
    pub fn new(workdir: &Path, catalogue: &[&str]) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            catalogue: catalogue.join("\n"),
            raw: HashMap::new(),
            failing: HashSet::new(),
            calls: RefCell::new(Vec::new()),
        }
    }
    pub fn with_raw(mut self, system: &str, segment: &str, content: &str) -> Self {
        self.raw
            .insert((system.to_string(), segment.to_string()), content.to_string());
        self
    }
    pub fn failing(mut self, segment: &str) -> Self {
        self.failing.insert(segment.to_string());
        self
    }
    /// Report requests that were issued, as (system, 24h database)
    pub fn report_requests(&self) -> Vec<(String, String)> {
        self.calls
            .borrow()
            .iter()
            .filter(|args| args[0] == "-rep")
            .map(|args| (args[7].clone(), args[8].clone()))
            .collect()
    }
}

impl ExternalToolRunner for FakeTool {
    fn run(&self, args: &[String]) -> Result<ToolOutput> {
        self.calls.borrow_mut().push(args.to_vec());
        if args[0] == "-list" {
            return Ok(ToolOutput {
                status: Some(0),
                stdout: self.catalogue.clone(),
            });
        }
        assert_eq!(args.len(), 9, "bad report request {:?}", args);
        let (header, stem, system, segment) = (&args[5], &args[6], &args[7], &args[8]);
        assert!(
            self.workdir.join(header).exists(),
            "header \"{}\" should exist",
            header
        );
        if self.failing.contains(segment) {
            return Ok(ToolOutput {
                status: Some(1),
                stdout: String::new(),
            });
        }
        if let Some(content) = self.raw.get(&(system.clone(), segment.clone())) {
            let fields = segment.split('_').collect::<Vec<_>>();
            let filename = format!("{}.{}_{}", stem, fields[2], fields[3]);
            std::fs::write(self.workdir.join(filename), content).unwrap();
        }
        Ok(ToolOutput {
            status: Some(0),
            stdout: String::from("report generated"),
        })
    }
}

/// Lists file names of given directory, sorted
pub fn dir_content(dir: &Path) -> Vec<String> {
    let mut names = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    names.sort();
    names
}
