//! Channel data export and import
//!
//! Channel data is exchanged as UTF-8 JSON: an array with one array of
//! integers per channel, pretty-printed with two-space indentation.
//!
//! ```json
//! [
//!   [3, 7],
//!   [1, 0]
//! ]
//! ```
//!
//! Imports are checked against that shape before they replace anything.
//! The check reports the first offending element as a typed
//! [`ImportError`] instead of accepting arbitrary JSON.
//!
//! Reading happens off the UI thread through [`FileLoader`].

pub mod loader;

pub use loader::{FileLoader, LoadMessage};

use crate::error::{ChanVisError, ImportError, Result};
use crate::types::ChannelSet;
use serde_json::Value;
use std::path::Path;

/// File name offered by the save dialog
pub const DEFAULT_EXPORT_FILE_NAME: &str = "channelsData.json";

/// Extension accepted by the import paths
pub const DATA_FILE_EXTENSION: &str = "json";

/// Serialize channel data to pretty-printed JSON
pub fn export_json(channels: &ChannelSet) -> Result<String> {
    serde_json::to_string_pretty(channels)
        .map_err(|e| ChanVisError::Serialization(format!("Failed to serialize channels: {}", e)))
}

/// Write channel data to `path`, replacing any existing file
pub fn export_to_path(channels: &ChannelSet, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = export_json(channels)?;
    std::fs::write(path, content)
        .map_err(|e| ChanVisError::Io(e).with_context(format!("Failed to write {:?}", path)))?;
    tracing::info!(
        "Exported {} channels ({} samples) to {:?}",
        channels.len(),
        channels.total_samples(),
        path
    );
    Ok(())
}

/// Parse and shape-check channel data
pub fn parse_channels(text: &str) -> std::result::Result<ChannelSet, ImportError> {
    let value: Value = serde_json::from_str(text)?;

    let outer = match value {
        Value::Array(outer) => outer,
        other => {
            return Err(ImportError::Shape {
                found: json_kind(&other),
            })
        }
    };
    if outer.is_empty() {
        return Err(ImportError::Empty);
    }

    let mut channels = Vec::with_capacity(outer.len());
    for (channel, entry) in outer.iter().enumerate() {
        let Value::Array(samples) = entry else {
            return Err(ImportError::Shape {
                found: json_kind(entry),
            });
        };
        let values = samples
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                sample.as_i64().ok_or_else(|| ImportError::NotInteger {
                    channel,
                    index,
                    found: sample.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<i64>, _>>()?;
        channels.push(values);
    }

    Ok(ChannelSet::from(channels))
}

/// Read and shape-check a channel data file on the calling thread
pub fn import_from_path(path: impl AsRef<Path>) -> std::result::Result<ChannelSet, ImportError> {
    let path = path.as_ref();
    check_extension(&path.to_string_lossy())?;
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_channels(&text)
}

/// Shape-check in-memory file contents, rejecting invalid UTF-8
pub fn parse_channel_bytes(
    name: &str,
    bytes: &[u8],
) -> std::result::Result<ChannelSet, ImportError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ImportError::Read {
        path: name.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;
    parse_channels(text)
}

/// Reject names that do not end in `.json`
pub fn check_extension(name: &str) -> std::result::Result<(), ImportError> {
    let is_json = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DATA_FILE_EXTENSION));
    if is_json {
        Ok(())
    } else {
        Err(ImportError::UnsupportedFile(name.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
