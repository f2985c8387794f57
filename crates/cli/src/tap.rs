//! TAP 14 reporter for the conformance runner.

use std::io::{self, Write};

pub struct Tap {
    results: Vec<TapResult>,
}

struct TapResult {
    name: String,
    failure: Option<String>,
}

impl Tap {
    pub fn new() -> Self {
        Tap {
            results: Vec::new(),
        }
    }

    pub fn ok(&mut self, name: impl Into<String>) {
        self.results.push(TapResult {
            name: name.into(),
            failure: None,
        });
    }

    pub fn not_ok(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.results.push(TapResult {
            name: name.into(),
            failure: Some(reason.into()),
        });
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.failure.is_some()).count()
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "TAP version 14")?;
        writeln!(out, "1..{}", self.results.len())?;
        for (i, r) in self.results.iter().enumerate() {
            match &r.failure {
                None => writeln!(out, "ok {} - {}", i + 1, r.name)?,
                Some(reason) => {
                    writeln!(out, "not ok {} - {}", i + 1, r.name)?;
                    for line in reason.lines() {
                        writeln!(out, "  # {}", line)?;
                    }
                }
            }
        }
        let failed = self.failure_count();
        writeln!(out, "# tests {}", self.results.len())?;
        writeln!(out, "# pass  {}", self.results.len() - failed)?;
        writeln!(out, "# fail  {}", failed)
    }

    pub fn finish(self) {
        let stdout = io::stdout();
        let _ = self.write_to(&mut stdout.lock());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_plan_results_and_summary() {
        let mut tap = Tap::new();
        tap.ok("accept/facts");
        tap.not_ok("reject/head", "expected a diagnostic\nbut none was produced");
        let mut buf = Vec::new();
        tap.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "TAP version 14\n1..2\nok 1 - accept/facts\nnot ok 2 - reject/head\n  # expected a diagnostic\n  # but none was produced\n# tests 2\n# pass  1\n# fail  1\n"
        );
    }
}
