//! Background file reads for imports
//!
//! Each import spawns a short-lived reader thread that parses the file and
//! posts the outcome back over a channel. The UI drains the channel once per
//! frame. Reads are never cancelled: when two imports overlap, whichever
//! finishes last is applied last.

use super::{check_extension, import_from_path, parse_channel_bytes};
use crate::error::ImportError;
use crate::types::ChannelSet;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of one background read
#[derive(Debug)]
pub enum LoadMessage {
    /// File parsed and passed the shape check
    Loaded { source: String, channels: ChannelSet },
    /// File could not be read or was rejected
    Failed { source: String, error: ImportError },
}

impl LoadMessage {
    fn from_result(source: String, result: Result<ChannelSet, ImportError>) -> Self {
        match result {
            Ok(channels) => LoadMessage::Loaded { source, channels },
            Err(error) => LoadMessage::Failed { source, error },
        }
    }
}

/// UI-side handle for background imports
pub struct FileLoader {
    tx: Sender<LoadMessage>,
    rx: Receiver<LoadMessage>,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Read `path` on a background thread, calling `on_done` once the
    /// outcome has been posted
    pub fn load_path(&self, path: PathBuf, on_done: impl FnOnce() + Send + 'static) {
        let tx = self.tx.clone();
        let source = path.display().to_string();
        tracing::info!("Loading channel data from {}", source);

        std::thread::spawn(move || {
            let result = import_from_path(&path);
            let _ = tx.send(LoadMessage::from_result(source, result));
            on_done();
        });
    }

    /// Parse in-memory file contents (drops that carry bytes instead of a path)
    pub fn load_bytes(&self, name: String, bytes: Arc<[u8]>, on_done: impl FnOnce() + Send + 'static) {
        let tx = self.tx.clone();
        tracing::info!("Loading channel data from dropped file {}", name);

        std::thread::spawn(move || {
            let result =
                check_extension(&name).and_then(|()| parse_channel_bytes(&name, &bytes));
            let _ = tx.send(LoadMessage::from_result(name, result));
            on_done();
        });
    }

    /// Drain all finished reads in completion order
    pub fn drain(&self) -> Vec<LoadMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }
}
