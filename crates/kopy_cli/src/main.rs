//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kopy_core` linkage.
//! - Render a markdown file to a standalone HTML document when given a path.

use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        // Tiny probe to validate core crate wiring independently from the
        // UI/FFI runtime setup.
        println!("kopy_core ping={}", kopy_core::ping());
        println!("kopy_core version={}", kopy_core::core_version());
        return ExitCode::SUCCESS;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("kopy: failed to read `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let title = Path::new(&path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("note");
    let fragment = kopy_core::render_markdown(&source);
    println!("{}", kopy_core::html_document(title, &fragment));
    ExitCode::SUCCESS
}
