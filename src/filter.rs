//! Line filter engine.
//!
//! For each line of the input stream: build the needle view (optionally
//! lowercased into a reusable shadow buffer, trailing `\n` then `\r`
//! trimmed from the view only), ask the trie whether any suffix starts
//! with a dictionary entry, and emit the untouched original bytes when
//! the match result agrees with the invert flag.
//!
//! Guarantees: emitted lines are byte-identical to the input including
//! their terminators, input order is preserved, and embedded NUL bytes
//! are harmless (every operation is length-based).

use std::io::{Read, Write};

use tracing::debug;

use crate::bytes::{self, LineBuf};
use crate::error::{Error, Result};
use crate::fold;
use crate::progress::ProgressReporter;
use crate::reader::ChunkReader;
use crate::trie::Trie;

/// Match-phase switches, resolved by the configuration layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    /// Lowercase each line (and, at build time, the dictionary) before
    /// matching. Output bytes are never modified.
    pub case_insensitive: bool,
    /// Emit the lines that match nothing instead.
    pub invert: bool,
}

/// Counters accumulated over one filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub bytes_read: u64,
    pub lines_read: u64,
    pub lines_emitted: u64,
}

/// Filter `input` into `output` with a default-capacity chunk reader.
pub fn filter_stream<R: Read, W: Write>(
    input: R,
    output: &mut W,
    trie: &Trie,
    options: &FilterOptions,
    progress: Option<&mut ProgressReporter>,
) -> Result<FilterStats> {
    filter_reader(&mut ChunkReader::new(input), output, trie, options, progress)
}

/// Filter over a caller-configured [`ChunkReader`].
pub fn filter_reader<R: Read, W: Write>(
    reader: &mut ChunkReader<R>,
    output: &mut W,
    trie: &Trie,
    options: &FilterOptions,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<FilterStats> {
    let mut line = LineBuf::new();
    let mut shadow = LineBuf::new();
    let mut stats = FilterStats::default();

    loop {
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            break;
        }
        stats.lines_read += 1;
        stats.bytes_read += n as u64;

        let raw = line.as_slice();
        let needle = if options.case_insensitive {
            fold::to_lower_into(raw, &mut shadow)?;
            // View of the original line's length over the shadow; the
            // shadow may carry a longer tail from a previous line.
            bytes::sub(shadow.as_slice(), 0, raw.len())
        } else {
            raw
        };
        let needle = bytes::trim_trailing(needle, b'\n');
        let needle = bytes::trim_trailing(needle, b'\r');

        if trie.contains_anywhere(needle) != options.invert {
            output.write_all(raw).map_err(Error::Write)?;
            stats.lines_emitted += 1;
        }
        if let Some(reporter) = progress.as_deref_mut() {
            reporter.update(stats.bytes_read);
        }
    }

    if let Some(reporter) = progress {
        reporter.finish(stats.bytes_read);
    }
    debug!(
        bytes = stats.bytes_read,
        lines = stats.lines_read,
        emitted = stats.lines_emitted,
        "filter run complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_filter(
        keywords: &[&[u8]],
        input: &[u8],
        options: FilterOptions,
    ) -> (Vec<u8>, FilterStats) {
        let trie = Trie::build_from_keywords(keywords, options.case_insensitive).unwrap();
        let mut output = Vec::new();
        let stats = filter_stream(input, &mut output, &trie, &options, None).unwrap();
        (output, stats)
    }

    #[test]
    fn test_default_mode_keeps_matching_lines() {
        let (out, stats) = run_filter(
            &[b"foo", b"bar"],
            b"afoo\nbaz\nXbarY\n",
            FilterOptions::default(),
        );
        assert_eq!(out, b"afoo\nXbarY\n");
        assert_eq!(
            stats,
            FilterStats {
                bytes_read: 15,
                lines_read: 3,
                lines_emitted: 2,
            }
        );
    }

    #[test]
    fn test_invert_mode_keeps_the_rest() {
        let (out, _) = run_filter(
            &[b"foo", b"bar"],
            b"afoo\nbaz\nXbarY\n",
            FilterOptions {
                invert: true,
                ..FilterOptions::default()
            },
        );
        assert_eq!(out, b"baz\n");
    }

    #[test]
    fn test_case_insensitive_emits_original_bytes() {
        let (out, _) = run_filter(
            &[b"FOO"],
            b"hello foo world\nhello FOO world\nnothing\n",
            FilterOptions {
                case_insensitive: true,
                ..FilterOptions::default()
            },
        );
        assert_eq!(out, b"hello foo world\nhello FOO world\n");
    }

    #[test]
    fn test_shadow_view_is_clipped_to_current_line() {
        // First line is long and matches; the shorter second line must
        // not match against the shadow's stale tail.
        let (out, _) = run_filter(
            &[b"tail"],
            b"long line with TAIL\nshort\n",
            FilterOptions {
                case_insensitive: true,
                ..FilterOptions::default()
            },
        );
        assert_eq!(out, b"long line with TAIL\n");
    }

    #[test]
    fn test_delimiter_trimmed_from_needle_only() {
        // The keyword ends at the line end; the emitted line keeps \r\n.
        let (out, _) = run_filter(&[b"beta"], b"alpha\r\nbeta\r\n", FilterOptions::default());
        assert_eq!(out, b"beta\r\n");
    }

    #[test]
    fn test_embedded_nul_is_length_based() {
        let (out, _) = run_filter(&[b"key"], b"a\0key\0b\nmiss\0\n", FilterOptions::default());
        assert_eq!(out, b"a\0key\0b\n");
    }

    #[test]
    fn test_empty_dictionary_both_modes() {
        let input = b"one\ntwo\n";
        let (out, _) = run_filter(&[], input, FilterOptions::default());
        assert_eq!(out, b"");
        let (out, _) = run_filter(
            &[],
            input,
            FilterOptions {
                invert: true,
                ..FilterOptions::default()
            },
        );
        assert_eq!(out, input);
    }

    #[test]
    fn test_progress_reporter_sees_final_total() {
        let trie = Trie::build_from_keywords([&b"x"[..]], false).unwrap();
        let mut progress = ProgressReporter::hidden(0)
            .with_min_interval(std::time::Duration::ZERO)
            .with_min_byte_delta(4);
        let mut output = Vec::new();
        let stats = filter_stream(
            &b"x\nyy\nzzz\n"[..],
            &mut output,
            &trie,
            &FilterOptions::default(),
            Some(&mut progress),
        )
        .unwrap();
        assert_eq!(stats.bytes_read, 9);
        assert_eq!(progress.position(), 9);
    }
}
