//! Validate and minify the WGSL shaders.

use std::path::Path;

use naga::valid::{Capabilities, ValidationFlags, Validator};

/// Check a WGSL shader for errors and write a minified copy to file.
fn minify_wgsl(source: impl AsRef<Path>, target: impl AsRef<Path>) {
    // Read the source WGSL
    let source = std::fs::read_to_string(source).expect("Error reading WGSL shader file");

    // Parse into NAGA module
    let module = naga::front::wgsl::parse_str(&source).expect("Error compiling WGSL shader");

    // Fail the build early instead of when the pipeline is created at runtime
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .expect("Error while validating WGSL shader");

    // Minify the WGSL
    let output = wgsl_minifier::minify_wgsl_source(&source);

    // Convert to bytes
    std::fs::write(target, output).expect("Error writing minified WGSL shader to file");
}

fn main() {
    // Rerun build script if shaders changed
    println!("cargo::rerun-if-changed=shaders/present.wgsl");

    let out_dir_str = std::env::var_os("OUT_DIR").unwrap();
    let out_dir = Path::new(&out_dir_str);

    minify_wgsl("shaders/present.wgsl", out_dir.join("present.wgsl"));
}
