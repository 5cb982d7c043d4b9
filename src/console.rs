//! Terminal coordinates and the line-based interactive move source.
//!
//! Coordinates use the usual Go notation: a column letter from `A`, skipping
//! `I` to avoid confusion with `J`, followed by a row number counted from the
//! bottom edge. On a 19x19 board `A19` is the top-left point `(1, 1)` and `K10`
//! is the center `(10, 10)`.

use std::io::{self, BufRead, Write};

use crate::agent::Interactive;
use crate::board::{Board, Point};

/// Column letter for a 1-based column, skipping `I`.
pub fn column_label(x: usize) -> char {
    let mut c = b'A' + (x as u8).saturating_sub(1);
    if c >= b'I' {
        c += 1;
    }
    c as char
}

/// Parse a coordinate string (e.g. "D4") into a point on a `size` board.
///
/// Returns `None` for malformed input or points off the board.
pub fn parse_point(s: &str, size: usize) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == 'I' {
        return None;
    }
    let mut x = (col_char as u8 - b'A' + 1) as usize;
    if col_char > 'I' {
        x -= 1;
    }

    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 || row > size || x > size {
        return None;
    }
    Some(Point::new(x, size + 1 - row))
}

/// Convert a point back to its coordinate string.
pub fn format_point(p: Point, size: usize) -> String {
    format!("{}{}", column_label(p.x), size + 1 - p.y)
}

/// Reads moves typed on a terminal, one coordinate per line.
///
/// Blank lines and `#` comments are skipped. `quit` or end of input ends the
/// match. Unparsable or occupied points are reported and asked again.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Interactive for ConsoleInput<R, W> {
    fn poll(&mut self, board: &Board) -> io::Result<Option<Point>> {
        loop {
            write!(self.writer, "{} to move> ", board.next())?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }

            match parse_point(line, board.size()) {
                Some(p) if !board.exist_stone(p) => return Ok(Some(p)),
                Some(_) => writeln!(self.writer, "point {line} is occupied")?,
                None => writeln!(self.writer, "cannot parse '{line}', expected e.g. D4")?,
            }
        }
    }
}
