//! The one-call setup layer.

#![cfg(feature = "signals")]

use std::fs;
use std::io::Write;

use logrot::log_writer_with_signals;

/// A real file name produces a writer appending to that file.
#[test]
fn named_log_goes_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("served.log");

    let mut writer = log_writer_with_signals(path.to_str().unwrap(), std::io::sink()).unwrap();
    writer.write_all(b"first\n").unwrap();
    writer.write_all(b"second\n").unwrap();
    writer.flush().unwrap();

    assert_eq!("first\nsecond\n", fs::read_to_string(&path).unwrap());
}

/// The sentinel names skip the file entirely and hand back the fallback.
#[test]
fn sentinel_names_use_fallback() {
    for name in ["", "-"] {
        let mut writer = log_writer_with_signals(name, Vec::new()).unwrap();
        writer.write_all(b"nowhere\n").unwrap();
        writer.flush().unwrap();
    }
}
