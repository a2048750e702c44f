//! Build script to generate the embedded catalog
//!
//! Reads the default entries and questions files and generates Rust source code with const strings.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_text_const(
        "data/entries.txt",
        &Path::new(&out_dir).join("entries.rs"),
        "EMBEDDED_ENTRIES",
        "Default entries file (name line followed by a 0/1 answer line)",
    );

    generate_text_const(
        "data/questions.txt",
        &Path::new(&out_dir).join("questions.rs"),
        "EMBEDDED_QUESTIONS",
        "Default questions file (prompt line followed by one question per line)",
    );

    // Rebuild if the data set changes
    println!("cargo:rerun-if-changed=data/entries.txt");
    println!("cargo:rerun-if-changed=data/questions.txt");
}

fn generate_text_const(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let line_count = content.lines().filter(|l| !l.trim().is_empty()).count();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated catalog text").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "pub const {const_name}: &str = {content:?};").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of non-empty lines in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_LINES: usize = {line_count};").unwrap();
}
