use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Error;
use crate::holder::Holder;

/// A writer for a log file that can be closed and reopened while in use.
///
/// The file name stays constant for the whole life of the writer, across any
/// number of close/reopen cycles. Opening always appends, so previously
/// written content survives a reopen.
///
/// The writer is cheap to clone; clones share the same underlying file slot,
/// which is how one clone can rotate the file out from under writers using
/// another. A write issued while the writer is closed does not fail, it
/// blocks until some clone calls [`open`][RotatingWriter::open].
///
/// A writer that grabbed the file handle just before a
/// [`close`][RotatingWriter::close] may still complete its write on the old
/// file. That is the same race a log-rotation utility imposes on any program
/// and is harmless: the old file stays valid until the last in-flight write
/// lets go of it.
#[derive(Clone, Debug)]
pub struct RotatingWriter {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    file: Holder<Arc<File>>,
}

impl RotatingWriter {
    /// Creates a writer for the given file name, initially closed.
    ///
    /// No file is touched until [`open`][RotatingWriter::open] is called.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        RotatingWriter {
            inner: Arc::new(Inner {
                path: path.into(),
                file: Holder::new(None),
            }),
        }
    }

    /// The logical file name this writer appends to.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Opens the log file, creating it if missing and appending if present.
    ///
    /// On success any writes blocked on a closed writer resume immediately.
    /// On failure the previous state is left untouched. Calling this while
    /// already open replaces the handle; the old one is released once the
    /// last in-flight write on it finishes.
    pub fn open(&self) -> Result<(), Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.inner.path)
            .map_err(|source| Error::Open {
                path: self.inner.path.clone(),
                source,
            })?;
        self.inner.file.put(Some(Arc::new(file)));
        Ok(())
    }

    /// Closes the log file. Subsequent writes block until the next
    /// [`open`][RotatingWriter::open].
    ///
    /// The file is synced to disk before the handle is dropped, so a rename
    /// done by the rotation utility does not lose buffered data. Returns
    /// [`Error::NotOpen`] when the writer is already closed.
    pub fn close(&self) -> Result<(), Error> {
        let file = self.inner.file.take().ok_or_else(|| Error::NotOpen {
            path: self.inner.path.clone(),
        })?;
        file.sync_all().map_err(|source| Error::Close {
            path: self.inner.path.clone(),
            source,
        })
    }

    /// Writes a string, blocking while the writer is closed.
    pub fn write_str(&self, s: &str) -> io::Result<usize> {
        self.write_bytes(s.as_bytes())
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let file = self.inner.file.get_when_present();
        (&*file).write(buf)
    }

    fn flush_file(&self) -> io::Result<()> {
        let file = self.inner.file.get_when_present();
        (&*file).flush()
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_file()
    }
}

impl Write for &RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_file()
    }
}
