//! Signal-driven rotation triggers.
//!
//! A log-rotation utility renames the current log file and then pokes the
//! program, usually with `SIGHUP` or `SIGUSR1`. The functions here bridge
//! that poke to an arbitrary action (for a [`RotatingWriter`], close then
//! reopen) running on a dedicated thread, one notification at a time.
//!
//! Platform support is expressed through the [`Notify`] trait. On Unix,
//! [`SignalNotifier`] listens for real signals through the
//! [`signal-hook`](https://crates.io/crates/signal-hook) crate; elsewhere
//! [`NoopNotifier`] accepts the registration and does nothing. The
//! [`PlatformNotifier`] alias names whichever one the build selected.
//!
//! [`RotatingWriter`]: crate::RotatingWriter

use std::io::Error;

use libc::c_int;

/// Reports a received notification: the action message (e.g. "Poked") and
/// the name of the signal that carried it.
pub type Reporter = Box<dyn Fn(&str, &str) + Send>;

/// Signals meaning "rotate now".
#[cfg(unix)]
pub const POKE_SIGNALS: &[c_int] = &[signal_hook::consts::SIGHUP, signal_hook::consts::SIGUSR1];

/// Signals meaning "shutting down".
#[cfg(unix)]
pub const INTERRUPT_SIGNALS: &[c_int] = &[
    signal_hook::consts::SIGINT,
    signal_hook::consts::SIGTERM,
    signal_hook::consts::SIGQUIT,
];

/// Signals meaning "rotate now". Empty on platforms without signal support.
#[cfg(not(unix))]
pub const POKE_SIGNALS: &[c_int] = &[];

/// Signals meaning "shutting down". Empty on platforms without signal
/// support.
#[cfg(not(unix))]
pub const INTERRUPT_SIGNALS: &[c_int] = &[];

/// The capability of running an action whenever a signal arrives.
pub trait Notify {
    /// Registers `action` to run once per received signal from `signals`.
    ///
    /// Each notification first goes to the `reporter` with `action_message`
    /// and the signal's name, then `action` runs. Invocations are
    /// sequential; notifications arriving faster than the action completes
    /// are buffered, and once the buffer is full further ones are dropped
    /// (a queued rotation already covers them).
    ///
    /// The listener runs for the rest of the process lifetime. An error from
    /// the action must be handled inside the action itself; the listener
    /// keeps dispatching regardless.
    fn run_on_signals(
        &self,
        action_message: &'static str,
        reporter: Reporter,
        signals: &[c_int],
        action: Box<dyn FnMut() + Send>,
    ) -> Result<(), Error>;
}

/// A [`Notify`] implementation that ignores all registrations.
///
/// This is the [`PlatformNotifier`] on targets without Unix signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl Notify for NoopNotifier {
    fn run_on_signals(
        &self,
        action_message: &'static str,
        _reporter: Reporter,
        _signals: &[c_int],
        _action: Box<dyn FnMut() + Send>,
    ) -> Result<(), Error> {
        log::debug!(
            "signal notifications ({}) are not supported on this platform",
            action_message
        );
        Ok(())
    }
}

#[cfg(unix)]
mod native {
    use std::io::Error;
    use std::sync::mpsc;
    use std::thread;

    use libc::c_int;
    use signal_hook::iterator::Signals;
    use signal_hook::low_level::signal_name;

    use super::{Notify, Reporter};

    /// The Unix [`Notify`] implementation, backed by `signal-hook`.
    ///
    /// Received signals flow through a bounded channel sized to the number
    /// of registered signals times
    /// [`buffer_multiplier`][SignalNotifier::buffer_multiplier], so pokes
    /// arriving while a rotation is still in progress are not lost.
    #[derive(Clone, Copy, Debug)]
    pub struct SignalNotifier {
        buffer_multiplier: usize,
    }

    impl SignalNotifier {
        /// Creates a notifier with the default buffer multiplier of 1.
        pub fn new() -> Self {
            SignalNotifier {
                buffer_multiplier: 1,
            }
        }

        /// Sets how many pending notifications to buffer per registered
        /// signal. Values below 1 are treated as 1; the channel must be
        /// buffered or closely spaced signals would be dropped.
        pub fn buffer_multiplier(mut self, multiplier: usize) -> Self {
            self.buffer_multiplier = multiplier.max(1);
            self
        }
    }

    impl Default for SignalNotifier {
        fn default() -> Self {
            SignalNotifier::new()
        }
    }

    impl Notify for SignalNotifier {
        fn run_on_signals(
            &self,
            action_message: &'static str,
            reporter: Reporter,
            signals: &[c_int],
            mut action: Box<dyn FnMut() + Send>,
        ) -> Result<(), Error> {
            if signals.is_empty() {
                return Ok(());
            }
            // Registration happens here, before returning, so a signal
            // raised right after this call is already caught.
            let mut pending = Signals::new(signals)?;
            let (sender, receiver) = mpsc::sync_channel(self.buffer_multiplier * signals.len());
            thread::spawn(move || {
                for signal in pending.forever() {
                    // A full buffer means enough rotations are already
                    // queued; dropping this one loses nothing.
                    let _ = sender.try_send(signal);
                }
            });
            thread::spawn(move || {
                for signal in receiver {
                    match signal_name(signal) {
                        Some(name) => reporter(action_message, name),
                        None => reporter(action_message, &signal.to_string()),
                    }
                    action();
                }
            });
            Ok(())
        }
    }
}

#[cfg(unix)]
pub use native::SignalNotifier;

/// The [`Notify`] implementation selected for this target.
#[cfg(unix)]
pub type PlatformNotifier = SignalNotifier;

/// The [`Notify`] implementation selected for this target.
#[cfg(not(unix))]
pub type PlatformNotifier = NoopNotifier;

/// Runs `action` whenever a "rotate now" signal ([`POKE_SIGNALS`]) arrives.
///
/// The reporter is called once per signal with the message `"Poked"` and the
/// signal's name. A no-op on platforms without signal support.
pub fn run_on_poke<R, F>(reporter: R, action: F) -> Result<(), Error>
where
    R: Fn(&str, &str) + Send + 'static,
    F: FnMut() + Send + 'static,
{
    PlatformNotifier::default().run_on_signals(
        "Poked",
        Box::new(reporter),
        POKE_SIGNALS,
        Box::new(action),
    )
}

/// Runs `action` whenever a shutdown signal ([`INTERRUPT_SIGNALS`]) arrives.
///
/// The reporter is called once per signal with the message `"Interrupted"`
/// and the signal's name. A no-op on platforms without signal support.
pub fn run_on_interrupt<R, F>(reporter: R, action: F) -> Result<(), Error>
where
    R: Fn(&str, &str) + Send + 'static,
    F: FnMut() + Send + 'static,
{
    PlatformNotifier::default().run_on_signals(
        "Interrupted",
        Box::new(reporter),
        INTERRUPT_SIGNALS,
        Box::new(action),
    )
}
