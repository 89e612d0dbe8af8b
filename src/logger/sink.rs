//! Output sinks.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

use crate::config::schema::OutputTarget;
use crate::error::LogError;

/// Where formatted lines go.
#[derive(Debug)]
pub enum Sink {
    Stdout,
    Stderr,
    /// Append-mode file.
    File { path: PathBuf, file: File },
    /// In-memory buffer, drained with [`SharedSink::take_memory`].
    Memory(Vec<u8>),
}

impl Sink {
    /// Open `path` for appending, creating missing parent directories.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Sink::File {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Sink::File { .. })
    }
}

impl From<OutputTarget> for Sink {
    fn from(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Sink::Stdout,
            OutputTarget::Stderr => Sink::Stderr,
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout => io::stdout().write(buf),
            Sink::Stderr => io::stderr().write(buf),
            Sink::File { file, .. } => file.write(buf),
            Sink::Memory(bytes) => {
                bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().lock().write_all(buf),
            Sink::Stderr => io::stderr().lock().write_all(buf),
            Sink::File { file, .. } => file.write_all(buf),
            Sink::Memory(bytes) => {
                bytes.extend_from_slice(buf);
                Ok(())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::File { file, .. } => file.flush(),
            Sink::Memory(_) => Ok(()),
        }
    }
}

/// A sink shared between loggers and the engine's writer.
///
/// Each formatted event is written under the lock in one `write_all`.
#[derive(Debug, Clone)]
pub struct SharedSink(Arc<Mutex<Sink>>);

impl SharedSink {
    pub fn new(sink: Sink) -> Self {
        Self(Arc::new(Mutex::new(sink)))
    }

    /// Lock the sink. A panic while writing does not make it unusable.
    pub fn lock(&self) -> MutexGuard<'_, Sink> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap in `sink`, returning the previous one.
    pub fn replace(&self, sink: Sink) -> Sink {
        std::mem::replace(&mut *self.lock(), sink)
    }

    /// Drain a memory sink. Other sinks yield an empty string.
    pub fn take_memory(&self) -> String {
        match &mut *self.lock() {
            Sink::Memory(bytes) => String::from_utf8_lossy(&std::mem::take(bytes)).into_owned(),
            _ => String::new(),
        }
    }

    /// Path of the current file sink, if any.
    pub fn file_path(&self) -> Option<PathBuf> {
        match &*self.lock() {
            Sink::File { path, .. } => Some(path.clone()),
            _ => None,
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// Writer handed to the engine for one event.
pub struct SinkWriter<'a>(MutexGuard<'a, Sink>);

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedSink {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter(self.lock())
    }
}
