//! Conformance suite runner.
//!
//! Convention:
//!   accept/  -- *.pl + *.expected (clean parse, rendered output must match)
//!   reject/  -- *.pl [+ *.expected] (at least one diagnostic; full report
//!               must match when an expected file is present)

use crate::tap::Tap;
use std::path::{Path, PathBuf};

use modlog_core::{parse_source, ParseOutput};

pub const SOURCE_EXTENSION: &str = "pl";

pub struct RunResult {
    pub failed: usize,
}

pub fn run_suite(suite_dir: &Path) -> RunResult {
    let mut tap = Tap::new();

    run_accept_dir(suite_dir, &mut tap);
    run_reject_dir(suite_dir, &mut tap);

    let failed = tap.failure_count();
    tap.finish();

    RunResult { failed }
}

fn run_accept_dir(suite_dir: &Path, tap: &mut Tap) {
    let dir = suite_dir.join("accept");
    for source in glob_sources(&dir) {
        let name = format!("accept/{}", stem(&source));
        let expected_path = source.with_extension("expected");
        let expected = match read_expected(&expected_path) {
            Ok(Some(s)) => s,
            Ok(None) => {
                tap.not_ok(
                    &name,
                    format!("missing expected file: {}", expected_path.display()),
                );
                continue;
            }
            Err(e) => {
                tap.not_ok(&name, e);
                continue;
            }
        };

        match parse_file(&source) {
            Ok(out) if !out.is_clean() => {
                let diags: Vec<String> = out.diagnostics.iter().map(|d| d.to_string()).collect();
                tap.not_ok(
                    &name,
                    format!("unexpected syntax errors:\n{}", diags.join("\n")),
                );
            }
            Ok(out) => check_rendered(&name, &expected, &out, tap),
            Err(e) => tap.not_ok(&name, e),
        }
    }
}

fn run_reject_dir(suite_dir: &Path, tap: &mut Tap) {
    let dir = suite_dir.join("reject");
    for source in glob_sources(&dir) {
        let name = format!("reject/{}", stem(&source));
        let expected = match read_expected(&source.with_extension("expected")) {
            Ok(e) => e,
            Err(e) => {
                tap.not_ok(&name, e);
                continue;
            }
        };

        match parse_file(&source) {
            Ok(out) if out.is_clean() => {
                tap.not_ok(
                    &name,
                    format!(
                        "expected a syntax error but parse succeeded:\n{}",
                        out.render()
                    ),
                );
            }
            Ok(out) => match &expected {
                Some(expected) => check_rendered(&name, expected, &out, tap),
                None => tap.ok(&name),
            },
            Err(e) => tap.not_ok(&name, e),
        }
    }
}

fn check_rendered(name: &str, expected: &str, out: &ParseOutput, tap: &mut Tap) {
    let got = out.render();
    if got == expected {
        tap.ok(name);
    } else {
        tap.not_ok(name, text_diff(expected, &got));
    }
}

// -- Helpers --

fn parse_file(path: &Path) -> Result<ParseOutput, String> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    parse_source(&src).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Expected output with the trailing newline(s) an editor adds removed.
fn read_expected(path: &Path) -> Result<Option<String>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(Some(s.trim_end_matches(['\n', '\r']).to_owned()))
}

fn glob_sources(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION) {
                results.push(path);
            }
        }
    }
    results.sort();
    results
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn text_diff(expected: &str, got: &str) -> String {
    format!("--- expected\n{}\n+++ got\n{}", expected, got)
}
