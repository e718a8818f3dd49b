//! Example of rotating a log file on SIGHUP.
//!
//! This program keeps writing messages into a file `log.txt`. If it receives
//! SIGHUP or SIGUSR1, it closes and reopens it.
//!
//! To demonstrate the effect:
//!
//! * Run the program.
//! * Observe `log.txt` appeared and is growing.
//! * Move the `log.txt` to some other file (`mv log.txt log2.txt`).
//! * See that `log2.txt` is still growing, even under the different name.
//! * Send `SIGHUP` to the program (`killall -SIGHUP rotate_log`).
//! * See `log2.txt` no longer grows, a new `log.txt` appeared and grows.
//!
//! # Features
//!
//! This relies on the `signals` feature.

use std::error::Error;
use std::io::Write;
use std::thread;
use std::time::Duration;

use logrot::RotatingWriter;

/// Keeps writing into the given writer, one line per second.
fn log_forever<W: Write>(mut w: W) -> Result<(), Box<dyn Error>> {
    let mut no = 1u128;
    loop {
        thread::sleep(Duration::from_secs(1));
        writeln!(w, "Tick no {}", no)?;
        no += 1;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let log = RotatingWriter::new("log.txt");
    log.open()?;

    // Rotate on SIGHUP/SIGUSR1, telling on stderr what happened.
    let rotated = log.clone();
    logrot::signals::run_on_poke(
        |message, signal| eprintln!("{} {}", message, signal),
        move || {
            if let Err(err) = rotated.close() {
                eprintln!("{}", err);
            }
            if let Err(err) = rotated.open() {
                eprintln!("{}", err);
            }
        },
    )?;

    log_forever(&log)
}
