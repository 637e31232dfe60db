//! Extraction of the `single_sort_step [low .. high]` bounds from a log.
//!
//! A log line is only considered when it contains [`MARKER`].  It then
//! has to match, as a whole, the pattern
//!
//! ```text
//! <anything>single_sort_step [<low> .. <high>]<anything>\n
//! ```
//!
//! where both tokens are hexadecimal literals.  Marker lines that do
//! not have this shape are skipped; a matching line whose tokens are
//! not hexadecimal aborts the scan.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`.

use std::{
    collections::VecDeque,
    io::{self, BufRead},
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use crate::error::{Error, HexError, Result};

/// Substring pre-selecting the candidate lines.
pub const MARKER: &str = "single_sort_step";

lazy_static! {
    // Captures are greedy: with several " .. " the first token extends
    // as far right as the remainder of the line allows.
    static ref STEP_LINE: Regex =
        Regex::new(r"^.*single_sort_step \[(.*) \.\. (.*)\].*$").unwrap();
}

/// Bounds recorded by one `single_sort_step` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBounds {
    pub low: i128,
    pub high: i128,
}

/// Counters collected while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read, whether they contain the marker or not.
    pub lines: usize,
    /// Lines containing [`MARKER`].
    pub marked: usize,
    /// Marker lines whose bounds were extracted.
    pub matched: usize,
    /// Marker lines not matching the full pattern.
    pub skipped: usize,
}

/// Return the two raw tokens of `line` if it is a complete step line.
///
/// `line` must still carry its terminator (`\n` or `\r\n`): an
/// unterminated line never matches.
///
/// # Example
///
/// ```
/// use plot_steps::steps::match_step_line;
/// let line = "sorting single_sort_step [1a .. 2f] done\n";
/// assert_eq!(match_step_line(line), Some(("1a", "2f")));
/// assert_eq!(match_step_line("single_sort_step [1a .. 2f\n"), None);
/// assert_eq!(match_step_line("single_sort_step [1a .. 2f]"), None);
/// ```
pub fn match_step_line(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_suffix('\n')?;
    let body = body.strip_suffix('\r').unwrap_or(body);
    let caps = STEP_LINE.captures(body)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Parse a base-16 literal.
///
/// Surrounding whitespace, a leading `+` or `-`, a `0x`/`0X` prefix and
/// single `_` separators between digits are accepted.  Values must fit
/// in an `i128`.
///
/// # Example
///
/// ```
/// use plot_steps::steps::parse_hex;
/// assert_eq!(parse_hex("1a"), Ok(26));
/// assert_eq!(parse_hex(" 0x2F "), Ok(47));
/// assert_eq!(parse_hex("dead_beef"), Ok(0xdead_beef));
/// assert_eq!(parse_hex("-0x10"), Ok(-16));
/// assert!(parse_hex("zz").is_err());
/// ```
pub fn parse_hex(token: &str) -> std::result::Result<i128, HexError> {
    let s = token.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(s) => (true, s),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        // A separator may follow the prefix directly.
        Some(d) => d.strip_prefix('_').unwrap_or(d),
        None => s,
    };
    if digits.is_empty() {
        return Err(HexError::Empty)
    }
    if let Some(c) = digits.chars()
        .find(|&c| !c.is_ascii_hexdigit() && c != '_') {
        return Err(HexError::Digit(c))
    }
    if digits.starts_with('_') || digits.ends_with('_')
        || digits.contains("__") {
        return Err(HexError::Separator)
    }
    // The sign is kept with the digits so that `i128::MIN` parses.
    let sign = if negative { "-" } else { "" };
    let digits: String = sign.chars()
        .chain(digits.chars().filter(|&c| c != '_'))
        .collect();
    Ok(i128::from_str_radix(&digits, 16)?)
}

fn bounds(line: usize, low: &str, high: &str) -> Result<StepBounds> {
    let hex = |token: &str| parse_hex(token).map_err(|source| {
        Error::InvalidHex { line, token: token.to_string(), source } });
    Ok(StepBounds { low: hex(low)?, high: hex(high)? })
}

/// Lazy scan of a log for step bounds.
///
/// Each item is the pair of one matching line, in file order.  The
/// iteration stops at the end of the input; an error is returned as an
/// item and the caller is expected to stop there.
pub struct StepScanner<R> {
    reader: R,
    buf: Vec<u8>,
    // Lines of the last chunk not yet examined.
    pending: VecDeque<String>,
    stats: ScanStats,
}

/// Cut `chunk` at each `\n`, `\r\n` or lone `\r`.  Terminated lines
/// are pushed with a single `\n`; a trailing unterminated piece is
/// pushed as is.
fn split_lines(chunk: &str, lines: &mut VecDeque<String>) {
    let mut rest = chunk;
    while let Some(i) = rest.find(|c: char| c == '\r' || c == '\n') {
        lines.push_back(format!("{}\n", &rest[.. i]));
        let eol = if rest[i ..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[i + eol ..];
    }
    if !rest.is_empty() {
        lines.push_back(rest.to_string());
    }
}

impl<R: BufRead> StepScanner<R> {
    pub fn new(reader: R) -> Self {
        StepScanner { reader, buf: Vec::new(), pending: VecDeque::new(),
                      stats: ScanStats::default() }
    }

    /// Next line of the input, terminator normalized to `\n`.
    fn next_line(&mut self) -> Option<io::Result<String>> {
        while self.pending.is_empty() {
            // A `\r` ending a chunk is a terminator on its own: the
            // chunk ends at `\n` or at the end of the input.
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => (),
                Err(e) => return Some(Err(e)),
            }
            match std::str::from_utf8(&self.buf) {
                Ok(chunk) => split_lines(chunk, &mut self.pending),
                Err(e) => return Some(Err(
                    io::Error::new(io::ErrorKind::InvalidData, e))),
            }
        }
        self.pending.pop_front().map(Ok)
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }
}

impl<R: BufRead> Iterator for StepScanner<R> {
    type Item = Result<StepBounds>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.next_line()? {
                Ok(text) => text,
                Err(e) => return Some(Err(Error::Read(e))),
            };
            self.stats.lines += 1;
            if !text.contains(MARKER) {
                continue
            }
            self.stats.marked += 1;
            let line = self.stats.lines;
            match match_step_line(&text) {
                Some((low, high)) => {
                    self.stats.matched += 1;
                    return Some(bounds(line, low, high))
                }
                None => {
                    self.stats.skipped += 1;
                    debug!(line, "marker line does not match the step pattern");
                }
            }
        }
    }
}

/// Collect the bounds of all step lines of `reader` into one flat
/// sequence `low₀, high₀, low₁, high₁, …`.
///
/// # Example
///
/// ```
/// use plot_steps::steps::extract_values;
/// let log = "boot\nsingle_sort_step [1a .. 2f]\nsingle_sort_step [0 .. 10]\n";
/// assert_eq!(extract_values(log.as_bytes())?, vec![26, 47, 0, 16]);
/// # Ok::<(), plot_steps::Error>(())
/// ```
pub fn extract_values<R: BufRead>(reader: R) -> Result<Vec<i128>> {
    let mut scanner = StepScanner::new(reader);
    let mut values = Vec::new();
    for step in &mut scanner {
        let StepBounds { low, high } = step?;
        values.push(low);
        values.push(high);
    }
    let ScanStats { lines, marked, matched, skipped } = scanner.stats();
    tracing::info!(lines, marked, matched, skipped, "scan complete");
    Ok(values)
}
