use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pipeline::frame_result::FrameResult;
use crate::stream::domain::result_sink::ResultSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to write result: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize frame {frame}: {source}")]
    Serialize {
        frame: usize,
        source: serde_json::Error,
    },
}

/// Writes one JSON object per frame, newline-delimited.
pub struct JsonLinesSink {
    writer: BufWriter<Box<dyn Write + Send>>,
    written: usize,
}

impl JsonLinesSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn to_file(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(Box::new(file)))
    }

    pub fn to_stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn written(&self) -> usize {
        self.written
    }

    fn write_line(&mut self, result: &FrameResult) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, result).map_err(|source| {
            SinkError::Serialize {
                frame: result.frame_index,
                source,
            }
        })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

impl ResultSink for JsonLinesSink {
    fn write(&mut self, result: &FrameResult) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.write_line(result)?)
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.flush().map_err(SinkError::from)?;
        log::debug!("Wrote {} frame results", self.written);
        Ok(())
    }
}
