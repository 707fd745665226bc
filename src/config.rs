//! Command-line surface and resolved configuration.
//!
//! The clap parser collects raw flags; [`Config::resolve`] turns them
//! into the record the core consumes, deciding whether the first
//! positional is the dictionary file or the input file. [`run`] is the
//! top-level entry the binary calls: build the index, open the streams,
//! filter.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};
use crate::filter::{filter_stream, FilterOptions, FilterStats};
use crate::progress::ProgressReporter;
use crate::trie::Trie;

/// Find lines that contain any substring from a dictionary.
#[derive(Parser, Debug)]
#[command(
    name = "linesift",
    version,
    about = "Find any substring from SUBSTRINGS in all lines of FILE and print the ones that contain at least one",
    after_help = "Reads standard input if FILE is missing."
)]
pub struct Cli {
    /// Accept the match regardless of upper or lower case
    #[arg(short = 'i', long)]
    pub case_insensitive: bool,

    /// Print the lines that contain none of the substrings
    #[arg(short = 'v', long)]
    pub invert: bool,

    /// Write matching lines to PATH and show progress on stderr
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Add STR to the dictionary (repeatable, replaces the SUBSTRINGS file)
    #[arg(short = 's', long = "substring", value_name = "STR")]
    pub substrings: Vec<String>,

    /// Dictionary file (unless -s is used), then the input file
    #[arg(value_name = "SUBSTRINGS | FILE")]
    pub paths: Vec<PathBuf>,
}

/// Where the dictionary comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// Newline-delimited keyword file.
    File(PathBuf),
    /// Keywords given on the command line with `-s`.
    Inline(Vec<String>),
}

/// Resolved options record consumed by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dictionary: DictionarySource,
    /// `None` means standard input.
    pub input: Option<PathBuf>,
    /// `None` means standard output.
    pub output: Option<PathBuf>,
    pub case_insensitive: bool,
    pub invert: bool,
}

impl Config {
    /// Resolve raw CLI arguments into a configuration record.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let mut paths = cli.paths.into_iter();
        let (dictionary, input) = if cli.substrings.is_empty() {
            let dict = paths.next().ok_or_else(|| {
                Error::Usage("missing SUBSTRINGS: pass a dictionary file or -s/--substring".into())
            })?;
            (DictionarySource::File(dict), paths.next())
        } else {
            (DictionarySource::Inline(cli.substrings), paths.next())
        };
        if let Some(extra) = paths.next() {
            let reason = if matches!(dictionary, DictionarySource::Inline(_)) {
                "a dictionary file cannot be combined with -s/--substring"
            } else {
                "too many arguments"
            };
            return Err(Error::Usage(format!(
                "unexpected argument {}: {reason}",
                extra.display()
            )));
        }
        Ok(Self {
            dictionary,
            input,
            output: cli.output,
            case_insensitive: cli.case_insensitive,
            invert: cli.invert,
        })
    }
}

/// Build the dictionary index, open the streams, and run the filter.
pub fn run(config: &Config) -> Result<FilterStats> {
    let trie = match &config.dictionary {
        DictionarySource::File(path) => {
            let file = File::open(path).map_err(|e| Error::Access {
                path: path.clone(),
                source: e,
            })?;
            Trie::build_from_reader(file, config.case_insensitive)?
        }
        DictionarySource::Inline(keywords) => {
            Trie::build_from_keywords(keywords, config.case_insensitive)?
        }
    };

    let (input, total_bytes): (Box<dyn Read>, u64) = match &config.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| Error::Access {
                path: path.clone(),
                source: e,
            })?;
            let total = file.metadata().map(|m| m.len()).unwrap_or(0);
            (Box::new(file), total)
        }
        None => (Box::new(io::stdin()), 0),
    };

    let options = FilterOptions {
        case_insensitive: config.case_insensitive,
        invert: config.invert,
    };

    match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| Error::Access {
                path: path.clone(),
                source: e,
            })?;
            let mut output = BufWriter::new(file);
            let mut progress = ProgressReporter::new(total_bytes);
            let stats = filter_stream(input, &mut output, &trie, &options, Some(&mut progress))?;
            output.flush().map_err(Error::Write)?;
            Ok(stats)
        }
        None => {
            let stdout = io::stdout();
            let mut output = BufWriter::new(stdout.lock());
            let stats = filter_stream(input, &mut output, &trie, &options, None)?;
            output.flush().map_err(Error::Write)?;
            Ok(stats)
        }
    }
}
