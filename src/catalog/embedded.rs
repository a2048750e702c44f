//! Embedded catalog
//!
//! Default entries and questions compiled into the binary at build time.

// Include generated catalog text from build script
include!(concat!(env!("OUT_DIR"), "/entries.rs"));
include!(concat!(env!("OUT_DIR"), "/questions.rs"));
