use anyhow::{Context, Result};
use std::path::Path;

/// A single lint finding in a script source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    pub line: usize,
    pub rule: &'static str,
}

/// Lint one script source. Two rules, matching what the demo sources
/// actually trip: trailing whitespace and hard tabs.
pub fn lint_source(src: &str) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        if line != line.trim_end() {
            findings.push(LintFinding {
                line: idx + 1,
                rule: "no-trailing-whitespace",
            });
        }
        if line.contains('\t') {
            findings.push(LintFinding {
                line: idx + 1,
                rule: "no-tabs",
            });
        }
    }
    findings
}

/// Rewritten source with both lintable problems fixed.
pub fn fix_source(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for line in src.lines() {
        out.push_str(line.trim_end().replace('\t', "    ").as_str());
        out.push('\n');
    }
    out
}

/// Lint a script file on disk; with `fix` set, problems are rewritten in
/// place and not reported.
pub fn lint_file(path: &Path, fix: bool) -> Result<Vec<LintFinding>> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script for lint: {}", path.display()))?;
    let findings = lint_source(&src);
    if findings.is_empty() {
        return Ok(findings);
    }
    if fix {
        std::fs::write(path, fix_source(&src))
            .with_context(|| format!("Failed to write lint fix: {}", path.display()))?;
        return Ok(Vec::new());
    }
    for finding in &findings {
        tracing::warn!(
            file = %path.display(),
            line = finding.line,
            rule = finding.rule,
            "lint finding"
        );
    }
    Ok(findings)
}
