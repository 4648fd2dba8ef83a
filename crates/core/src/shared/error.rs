use thiserror::Error;

use crate::shared::json_file::JsonFileError;

/// Error type returned by detector and refiner collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Invalid tracking configuration. Raised before the first frame is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_regions must be at least 1")]
    ZeroCapacity,
    #[error("min_similarity_threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error(transparent)]
    File(#[from] JsonFileError),
}

/// A frame that could not be processed.
///
/// The tracked-region state is left as it was before the frame, so the next
/// frame resumes from the last committed state.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("detector failed on frame {frame}: {source}")]
    Detector {
        frame: usize,
        source: CollaboratorError,
    },
    #[error("refiner failed on frame {frame}: {source}")]
    Refiner {
        frame: usize,
        source: CollaboratorError,
    },
    #[error(
        "refiner returned {landmarks} landmark sets and {regions} regions \
         for {expected} input regions on frame {frame}"
    )]
    RefinerShape {
        frame: usize,
        expected: usize,
        landmarks: usize,
        regions: usize,
    },
}

impl FrameError {
    /// Index of the frame that failed.
    pub fn frame(&self) -> usize {
        match self {
            FrameError::Detector { frame, .. }
            | FrameError::Refiner { frame, .. }
            | FrameError::RefinerShape { frame, .. } => *frame,
        }
    }
}
