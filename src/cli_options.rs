use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("unrecognized key {0}")]
    UnrecognizedKey(String),
    #[error("missing value after {0}")]
    MissingValue(String),
    #[error("invalid sample count {0:?}, expected a positive integer")]
    InvalidSamples(String),
    #[error("unknown check {0:?}, expected one of all, bounds, interval, spawn")]
    UnknownCheck(String),
}

/// Which robustness sweep(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    All,
    Bounds,
    Interval,
    Spawn,
}

impl Check {
    /// True if running `self` means running `other`.
    pub fn includes(self, other: Check) -> bool {
        self == Check::All || self == other
    }
}

impl FromStr for Check {
    type Err = CliError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Check::All),
            "bounds" => Ok(Check::Bounds),
            "interval" => Ok(Check::Interval),
            "spawn" => Ok(Check::Spawn),
            _ => Err(CliError::UnknownCheck(s.to_owned())),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Check::All => "all",
            Check::Bounds => "bounds",
            Check::Interval => "interval",
            Check::Spawn => "spawn",
        };
        f.pad(name)
    }
}

#[derive(Debug, PartialEq)]
pub struct CliOptions {
    pub use_multi_thread: bool,
    pub samples: usize,
    pub check: Check,
    pub show_help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            use_multi_thread: true,
            samples: 100_000,
            check: Check::All,
            show_help: false,
        }
    }
}

impl CliOptions {
    pub fn message() -> &'static str {
        r#"
        --use_multi_thread | --use_single_thread
        --samples <n>                              (default 100000)
        --check <all|bounds|interval|spawn>        (default all)
        --help
        "#
    }
}

pub fn parse_args(args: Vec<String>) -> Result<CliOptions, CliError> {
    let mut pairs: HashMap<String, Option<String>> = HashMap::new();
    let mut args = args.into_iter().rev().collect::<Vec<_>>();
    args.pop(); // Removes args[0]

    while let Some(key) = args.pop() {
        if !key.starts_with('-') {
            return Err(CliError::UnrecognizedKey(key));
        }
        match args.last() {
            Some(value) if !value.starts_with('-') => {
                let value = args.pop();
                pairs.insert(key, value);
            }
            _ => {
                pairs.insert(key, None);
            }
        }
    }

    let mut options = CliOptions::default();
    for (k, v) in pairs.into_iter() {
        match k.as_str() {
            "--use_multi_thread" => options.use_multi_thread = true,
            "--use_single_thread" => options.use_multi_thread = false,
            "--samples" => {
                let v = v.ok_or_else(|| CliError::MissingValue(k.clone()))?;
                options.samples = match v.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(CliError::InvalidSamples(v)),
                };
            }
            "--check" => {
                options.check = v.ok_or_else(|| CliError::MissingValue(k.clone()))?.parse()?;
            }
            "--help" => options.show_help = true,
            _ => return Err(CliError::UnrecognizedKey(k)),
        }
    }
    Ok(options)
}
