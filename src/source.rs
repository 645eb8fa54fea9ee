//! Landmark frame input.
//!
//! The detector runs out of process; frames cross into the pipeline as JSON
//! Lines, one frame per line. A frame is an array of `[x, y, z]` triples or
//! `{x, y, z}` objects in topology order.

use crate::landmarks::LandmarkFrame;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Stdin};
use std::path::Path;

/// Source of landmark frames
pub trait FrameSource {
    /// Next frame, or `None` at end of input
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
}

/// Reads JSON Lines frames from any buffered reader
pub struct JsonlSource<R: BufRead> {
    reader: R,
    line: String,
    line_number: usize,
}

impl<R: BufRead> JsonlSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }
}

impl JsonlSource<BufReader<File>> {
    /// Play back a recorded frame file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonlSource<BufReader<Stdin>> {
    /// Read frames from standard input (live detector pipe)
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead> FrameSource for JsonlSource<R> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }

            return LandmarkFrame::from_json(line)
                .map(Some)
                .map_err(|e| Error::InvalidInput(format!("frame line {}: {e}", self.line_number)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_frames_in_order() {
        let input = "[[0.1, 0.2, 0.0]]\n[[0.3, 0.4, 0.0]]\n";
        let mut source = JsonlSource::new(Cursor::new(input));

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.get(0).unwrap().x, 0.1);

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.get(0).unwrap().x, 0.3);

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_skips_blank_lines() {
        let input = "\n\n[[0.1, 0.2, 0.0]]\n\n";
        let mut source = JsonlSource::new(Cursor::new(input));

        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "[[0.1, 0.2, 0.0]]\nnot json\n";
        let mut source = JsonlSource::new(Cursor::new(input));

        source.next_frame().unwrap();
        let err = source.next_frame().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
