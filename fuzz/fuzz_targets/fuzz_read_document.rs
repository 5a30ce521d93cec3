#![no_main]

use calphad_xml::codec::{read_document, write_string, WriterConfig};
use calphad_xml::database::Database;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Reading arbitrary bytes must fail gracefully, never panic
    let mut db = Database::new();
    if read_document(&mut db, Cursor::new(data)).is_err() {
        return;
    }

    // Whatever was read must either encode or fail with an error
    let _ = write_string(&db, &WriterConfig::lenient());
});
