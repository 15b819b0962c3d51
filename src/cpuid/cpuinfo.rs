//! Line-oriented access to the textual processor description.
//!
//! The source is a sequence of `key : value` records, one per line. Lookups
//! preserve the rule the build has always relied on: the first line whose
//! key matches an accepted label wins, and the value is everything after the
//! first colon with exactly one separator character skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

/// Path of the processor description on Linux.
const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Label of the line listing instruction-set extensions.
const FEATURES_LABEL: &str = "Features";

/// A snapshot of the textual processor description.
pub struct CpuInfo {
    lines: Vec<String>,
}

impl CpuInfo {
    /// Reads the platform's processor description.
    pub fn open() -> io::Result<Self> {
        Self::from_reader(File::open(CPUINFO_PATH)?)
    }

    /// Reads a processor description from any line-oriented source.
    pub fn from_reader<R: Read>(source: R) -> io::Result<Self> {
        let lines = BufReader::new(source)
            .lines()
            .collect::<io::Result<Vec<_>>>()?;
        Ok(CpuInfo { lines })
    }

    /// Returns the value of the first line whose key starts with one of
    /// `labels`, or `None` if no line matches.
    pub fn value_of(&self, labels: &[&str]) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| labels.iter().any(|label| line.starts_with(label)))
            .and_then(|line| value_part(line))
    }

    /// Whether `name` equals a whole whitespace-delimited token of the
    /// `Features` line's value.
    pub fn has_feature(&self, name: &str) -> bool {
        self.value_of(&[FEATURES_LABEL])
            .map(|value| value.split_whitespace().any(|token| token == name))
            .unwrap_or(false)
    }
}

/// Splits a `key : value` record, skipping the colon and exactly one
/// separator character.
fn value_part(line: &str) -> Option<&str> {
    let colon = line.find(':')?;
    let mut rest = line[colon + 1..].chars();
    rest.next();
    Some(rest.as_str())
}
