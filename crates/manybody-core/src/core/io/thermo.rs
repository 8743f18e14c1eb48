use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThermoOutputError {
    #[error("Failed to create energy file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write energy record: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes sampled thermodynamic records, one line per sample.
///
/// Each line holds the kinetic and then the potential energy, separated by a
/// single space and printed in fixed notation with 16 fractional digits.
pub struct ThermoWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ThermoWriter<File> {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, ThermoOutputError> {
        let file = File::create(path).map_err(|e| ThermoOutputError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ThermoWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_sample(&mut self, kinetic: f64, potential: f64) -> Result<(), ThermoOutputError> {
        self.writer
            .write_record([format!("{kinetic:.16}"), format!("{potential:.16}")])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ThermoOutputError> {
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
