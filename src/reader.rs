//! Line by line B3 file reader.
use crate::{errors::ParsingError, prelude::Observation};

use log::debug;

use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Read},
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

/// [ObservationReader] streams [Observation]s out of any [BufRead]able
/// input, one per non blank line. Malformed lines are reported and
/// do not interrupt the stream.
pub struct ObservationReader<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> ObservationReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Number of the last line read (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl ObservationReader<BufReader<Box<dyn Read>>> {
    /// Opens a B3 file. With the `flate2` feature, files ending
    /// in `.gz` are decompressed on the fly.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let path = path.as_ref();
        let fd = File::open(path)?;

        #[cfg(feature = "flate2")]
        {
            let gzip = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("gz"))
                .unwrap_or(false);

            if gzip {
                debug!("{}: gzip compressed", path.display());
                let reader: Box<dyn Read> = Box::new(GzDecoder::new(fd));
                return Ok(Self::new(BufReader::new(reader)));
            }
        }

        let reader: Box<dyn Read> = Box::new(fd);
        Ok(Self::new(BufReader::new(reader)))
    }
}

impl<R: BufRead> Iterator for ObservationReader<R> {
    type Item = Result<Observation, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            let parsed = Observation::parse(&line);
            if let Err(e) = &parsed {
                debug!("line {}: {}", self.line_number, e);
            }
            return Some(parsed);
        }
    }
}
