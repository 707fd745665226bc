//! linesift - streaming multi-substring line filter
//!
//! This library reads a potentially very large byte stream line-by-line
//! and emits only the lines containing at least one occurrence of any
//! substring from a user-supplied dictionary (which may hold millions of
//! entries). It is designed for one pass over inputs far larger than
//! memory: the only state proportional to the dictionary is the index,
//! and the only per-line state is a pair of reusable buffers.
//!
//! # Key Features
//!
//! - **Streaming**: chunked 4 MiB reads, one-pass, constant memory per line
//! - **Arena trie index**: contiguous node storage with a bitmap
//!   fast-reject, built cheaply from millions of keywords
//! - **Byte-exact output**: emitted lines are the original bytes,
//!   delimiters and `\r\n` included, in input order
//! - **Case-insensitive mode**: byte-level lowercase matching that never
//!   rewrites the output
//! - **Invert mode**: emit the lines that match nothing
//!
//! # Example
//!
//! ```
//! use linesift::{filter_bytes, FilterOptions};
//!
//! let output = filter_bytes(
//!     &b"afoo\nbaz\nXbarY\n"[..],
//!     ["foo", "bar"],
//!     &FilterOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(output, b"afoo\nXbarY\n");
//! ```

pub mod bytes;
pub mod config;
pub mod error;
pub mod filter;
pub mod fold;
pub mod progress;
pub mod reader;
pub mod simd;
pub mod trie;

use std::io::Read;

pub use config::{run, Cli, Config, DictionarySource};
pub use error::{Error, Result};
pub use filter::{filter_reader, filter_stream, FilterOptions, FilterStats};
pub use progress::ProgressReporter;
pub use reader::ChunkReader;
pub use trie::Trie;

/// High-level API: filter a stream against an in-memory keyword list and
/// return the emitted bytes.
///
/// This is the convenience entry point for library callers. It:
/// 1. Builds the trie index from `keywords`
/// 2. Streams `input` through the filter engine
/// 3. Collects the emitted lines into a `Vec<u8>`
///
/// The command-line binary goes through [`run`] instead, which streams
/// to a file or standard output without collecting.
pub fn filter_bytes<R, I, K>(input: R, keywords: I, options: &FilterOptions) -> Result<Vec<u8>>
where
    R: Read,
    I: IntoIterator<Item = K>,
    K: AsRef<[u8]>,
{
    let trie = Trie::build_from_keywords(keywords, options.case_insensitive)?;
    let mut output = Vec::new();
    filter_stream(input, &mut output, &trie, options, None)?;
    Ok(output)
}
