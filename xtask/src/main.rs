//! Custom cargo commands for the gleaner crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests (default and minimal features)
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask wasm      - Build the browser bundle
//!   cargo xtask fuzz      - Run every fuzz target for a short while
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &["strip_markup", "bitap_scoring", "index_parsing"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("wasm") => wasm()?,
        Some("fuzz") => fuzz()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (tests + clippy + wasm + weights)
  test      Run all Rust tests, with default and minimal features
  check     Quick check (cargo check + test + clippy)
  wasm      Build the browser bundle with wasm-pack
  fuzz      Run each fuzz target for 60 seconds (needs nightly + cargo-fuzz)
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("gleaner Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking default field weights...");
    check_default_weights()?;
    println!("✓ Weights sum to 1 and favor the title\n");

    println!("[2/4] Running Rust tests...");
    test()?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Checking the wasm build...");
    run_cargo(&[
        "check",
        "--quiet",
        "--lib",
        "--target",
        "wasm32-unknown-unknown",
        "--no-default-features",
        "--features",
        "wasm",
    ])?;
    println!("✓ wasm32 build checks\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test", "--quiet"])?;
    // The sequential loader and the ASCII-only folding path
    run_cargo(&["test", "--quiet", "--lib", "--no-default-features"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Build the browser bundle
fn wasm() -> Result<()> {
    let root = project_root()?;
    let status = Command::new("wasm-pack")
        .args([
            "build",
            "--target",
            "web",
            "--release",
            "--",
            "--no-default-features",
            "--features",
            "wasm",
        ])
        .current_dir(&root)
        .status()
        .context("Failed to run wasm-pack (is it installed?)")?;

    if !status.success() {
        bail!("wasm-pack build failed");
    }
    Ok(())
}

/// Run every fuzz target briefly
fn fuzz() -> Result<()> {
    let fuzz_dir = project_root()?.join("fuzz");
    for target in FUZZ_TARGETS {
        println!("Fuzzing {}...", target);
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"])
            .current_dir(&fuzz_dir)
            .status()
            .with_context(|| format!("Failed to run cargo fuzz for {}", target))?;
        if !status.success() {
            bail!("fuzz target {} failed", target);
        }
    }
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// The published defaults must stay normalized: the README documents them as
/// fractions of one.
fn check_default_weights() -> Result<()> {
    let root = project_root()?;
    let config_rs = std::fs::read_to_string(root.join("src/config.rs"))
        .context("Failed to read config.rs")?;

    let title = extract_weight(&config_rs, "title")?;
    let description = extract_weight(&config_rs, "description")?;
    let content = extract_weight(&config_rs, "content")?;
    let tags = extract_weight(&config_rs, "tags")?;

    let sum = title + description + content + tags;
    if (sum - 1.0).abs() > 1e-9 {
        bail!("default weights sum to {}, expected 1.0", sum);
    }
    if !(title >= description && description >= content && content >= tags) {
        bail!(
            "default weights out of order: title={} description={} content={} tags={}",
            title,
            description,
            content,
            tags
        );
    }

    Ok(())
}

fn extract_weight(content: &str, field: &str) -> Result<f64> {
    // Look for "title: 0.4," inside `impl Default for FieldWeights`
    let body = content
        .split("impl Default for FieldWeights")
        .nth(1)
        .context("FieldWeights default not found")?;
    for line in body.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(&format!("{}:", field)) {
            let num_str = rest.trim().trim_end_matches(',').trim();
            if let Ok(n) = num_str.parse::<f64>() {
                return Ok(n);
            }
        }
    }
    bail!("default weight for {} not found", field)
}
