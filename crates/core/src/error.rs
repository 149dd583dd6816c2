//! Benchmark Error Handling
//!
//! A healthy run never produces an error. These variants only surface when
//! something outside the measured path breaks: a strand panics, its peer
//! channel handle disappears, stdout goes away, or the configuration is
//! unusable.

use crate::channel::ChannelError;
use std::fmt;
use std::io;

/// Errors reported by the trial runner and the driver
#[derive(Debug)]
pub enum BenchError {
    /// The rendezvous channel lost its peer mid-trial
    Channel(ChannelError),
    /// A producer or consumer strand panicked before reaching the barrier
    StrandPanicked { strand: &'static str, message: String },
    /// Configuration that cannot produce a meaningful result
    InvalidConfig(String),
    /// Writing the report failed
    Io(io::Error),
    /// Encoding the JSON report failed
    Json(serde_json::Error),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Channel(e) => write!(f, "channel error: {}", e),
            BenchError::StrandPanicked { strand, message } => {
                write!(f, "{} strand panicked: {}", strand, message)
            }
            BenchError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            BenchError::Io(e) => write!(f, "I/O error: {}", e),
            BenchError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Channel(e) => Some(e),
            BenchError::Io(e) => Some(e),
            BenchError::Json(e) => Some(e),
            BenchError::StrandPanicked { .. } | BenchError::InvalidConfig(_) => None,
        }
    }
}

impl From<ChannelError> for BenchError {
    fn from(e: ChannelError) -> Self {
        BenchError::Channel(e)
    }
}

impl From<io::Error> for BenchError {
    fn from(e: io::Error) -> Self {
        BenchError::Io(e)
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(e: serde_json::Error) -> Self {
        BenchError::Json(e)
    }
}

/// Format a panic payload into an error message
pub fn format_panic_payload(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
