//! End-to-end rotation driven by a real signal.
//!
//! Kept to a single test: signal handlers are process-global, so a second
//! test raising SIGHUP in this binary would trip the first one's listener.

#![cfg(all(unix, feature = "signals"))]

use std::fs;
use std::sync::mpsc;
use std::time::Duration;

use signal_hook::consts::SIGHUP;
use signal_hook::low_level::raise;

use logrot::{signals, RotatingWriter};

#[test]
fn sighup_rotates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signalled.log");
    let archived = dir.path().join("signalled.log.1");

    let log = RotatingWriter::new(&path);
    log.open().unwrap();

    let (rotations, rotated) = mpsc::channel();
    let (reports, reported) = mpsc::channel();
    {
        let log = log.clone();
        signals::run_on_poke(
            move |message, signal| reports.send(format!("{} {}", message, signal)).unwrap(),
            move || {
                log.close().unwrap();
                log.open().unwrap();
                rotations.send(()).unwrap();
            },
        )
        .unwrap();
    }

    log.write_str("before rotation\n").unwrap();
    fs::rename(&path, &archived).unwrap();

    raise(SIGHUP).unwrap();
    rotated.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        "Poked SIGHUP",
        reported.recv_timeout(Duration::from_secs(5)).unwrap()
    );

    log.write_str("after rotation\n").unwrap();
    log.close().unwrap();

    assert_eq!("before rotation\n", fs::read_to_string(&archived).unwrap());
    assert_eq!("after rotation\n", fs::read_to_string(&path).unwrap());
}
