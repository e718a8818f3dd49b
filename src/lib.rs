#![doc(html_root_url = "https://docs.rs/logrot/0.1.0/logrot/")]
#![warn(missing_docs)]

//! Append-only log file writing that survives rotation.
//!
//! The main motivation is integration with logrotate. When logrotate wants
//! to rotate a log file, it moves the current file to a new place and
//! expects the running program to close and reopen the file so new messages
//! land in a fresh one. This is most often signalled by SIGHUP or SIGUSR1.
//!
//! The [`RotatingWriter`] here keeps a fixed logical file name and lets the
//! physical file be closed and reopened at any time, from any thread, while
//! other threads keep writing. A write that arrives while the file is
//! momentarily closed does not fail and does not lose data; it simply blocks
//! until the reopen finishes. Opening always appends, never truncates.
//!
//! ```rust
//! use logrot::RotatingWriter;
//!
//! # let dir = tempfile::tempdir()?;
//! # let path = dir.path().join("app.log");
//! let log = RotatingWriter::new(&path);
//! log.open()?;
//! log.write_str("started\n")?;
//!
//! // logrotate has renamed the file; reopen under the same name.
//! log.close()?;
//! log.open()?;
//! log.write_str("rotated\n")?;
//! log.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! With the `signals` feature enabled, the [`signals`] module hooks the
//! close/reopen cycle to Unix signals, and [`log_writer_with_signals`] sets
//! the whole thing up in one call. See `demos/rotate_log.rs` for a complete
//! program exercising it against the real `mv` + `SIGHUP` dance.

mod error;
mod holder;
#[cfg(feature = "signals")]
mod logfile;
#[cfg(feature = "signals")]
pub mod signals;
mod writer;

pub use error::Error;
pub use holder::Holder;
#[cfg(feature = "signals")]
pub use logfile::{log_writer_with_signals, must_log_writer_with_signals};
pub use writer::RotatingWriter;
