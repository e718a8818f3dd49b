//! One-call setup of a rotating log writer with signal handling attached.

use std::io::Write;

use crate::signals;
use crate::{Error, RotatingWriter};

/// Opens a log file and attaches the rotation signal listener to it.
///
/// When the program receives `SIGHUP` or `SIGUSR1`, the file is closed and
/// reopened, letting a rotation utility take the old one. Received signals
/// and any close/open failure during rotation are reported through the
/// [`log`] crate; a failed rotation does not stop the listener.
///
/// A `log_name` that is empty or `"-"` means "no file": the `fallback`
/// writer (typically standard output) is returned as-is, with no signal
/// handling attached.
pub fn log_writer_with_signals<W>(
    log_name: &str,
    fallback: W,
) -> Result<Box<dyn Write + Send>, Error>
where
    W: Write + Send + 'static,
{
    if log_name.is_empty() || log_name == "-" {
        return Ok(Box::new(fallback));
    }

    let writer = RotatingWriter::new(log_name);
    writer.open()?;

    let rotated = writer.clone();
    signals::run_on_poke(
        |message, signal| log::info!("{} {}", message, signal),
        move || {
            if let Err(err) = rotated.close() {
                log::error!("{}", err);
            }
            if let Err(err) = rotated.open() {
                log::error!("{}", err);
            }
        },
    )
    .map_err(|source| Error::Signals {
        path: log_name.into(),
        source,
    })?;

    Ok(Box::new(writer))
}

/// Like [`log_writer_with_signals`], but panics on failure.
///
/// For programs that cannot do anything useful without their log file and
/// prefer to die loudly at startup.
pub fn must_log_writer_with_signals<W>(log_name: &str, fallback: W) -> Box<dyn Write + Send>
where
    W: Write + Send + 'static,
{
    match log_writer_with_signals(log_name, fallback) {
        Ok(writer) => writer,
        Err(err) => panic!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_uses_fallback() {
        let mut writer = log_writer_with_signals("", Vec::new()).unwrap();
        writer.write_all(b"to the fallback").unwrap();
    }

    #[test]
    fn dash_uses_fallback() {
        let mut writer = log_writer_with_signals("-", Vec::new()).unwrap();
        writer.write_all(b"to the fallback").unwrap();
    }

    #[test]
    fn unopenable_name_errors() {
        let err = log_writer_with_signals("/nonexistent-dir/log.txt", Vec::new())
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
