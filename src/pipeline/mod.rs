pub mod lint;
pub mod output;
pub mod rules;
pub mod transforms;

use crate::config::{BuildMode, Config};
use anyhow::{Context, Result};
use rules::AssetClass;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of one pipeline run.
#[derive(Debug)]
pub struct BuildReport {
    pub mode: BuildMode,
    /// Inputs seen, keyed by asset class label.
    pub counts: BTreeMap<&'static str, usize>,
    /// Everything written under the output dir.
    pub emitted: Vec<PathBuf>,
    /// Entry script bundle names referenced by the HTML shell.
    pub scripts: Vec<String>,
    /// Extracted stylesheet bundle name, when any stylesheet was seen.
    pub stylesheet: Option<String>,
    pub lint_findings: usize,
}

/// Run the full pipeline: clean, walk, transform per file (scripts are
/// linted as they pass), then the fixed post steps: copy static files,
/// extract the stylesheet bundle, write the HTML shell.
pub fn run_build(config: &Config, mode: BuildMode) -> Result<BuildReport> {
    let src_dir = &config.build.source_dir;
    let out_dir = &config.build.output_dir;
    tracing::info!(mode = %mode, src = %src_dir.display(), out = %out_dir.display(), "build start");

    output::clean_output(out_dir)?;

    let mut report = BuildReport {
        mode,
        counts: BTreeMap::new(),
        emitted: Vec::new(),
        scripts: Vec::new(),
        stylesheet: None,
        lint_findings: 0,
    };

    // Deterministic walk so the stylesheet bundle concatenates in a stable
    // order across runs.
    let mut sources: Vec<PathBuf> = WalkDir::new(src_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    sources.sort();

    let template_path = src_dir.join(&config.build.html_template);
    let mut style_bundle: Vec<u8> = Vec::new();
    let mut entry_scripts: Vec<(PathBuf, String)> = Vec::new();

    for path in &sources {
        // The shell template is a post step, not a routed asset.
        if *path == template_path {
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let class = rules::classify(ext);
        *report.counts.entry(class.label()).or_insert(0) += 1;

        if matches!(class, AssetClass::Script) {
            report.lint_findings += lint::lint_file(path, config.build.lint_fix)?.len();
        }

        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read source: {}", path.display()))?;
        let chain = rules::transform_chain(mode, class);
        let transformed = transforms::apply_chain(&chain, bytes)
            .with_context(|| format!("Transform failed: {}", path.display()))?;

        // Stylesheets are not emitted individually; they feed the extracted
        // bundle written as a post step.
        if let AssetClass::Stylesheet(dialect) = class {
            style_bundle.extend_from_slice(&transformed);
            if !style_bundle.ends_with(b"\n") {
                style_bundle.push(b'\n');
            }
            tracing::debug!(dialect = dialect.name(), file = %path.display(), "compiled into bundle");
            continue;
        }

        let spec = rules::output_spec(mode, class);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("asset");
        let digest = output::content_hash(&transformed, config.build.hash_len);
        let filename = output::output_filename(&spec, stem, ext, &digest);
        let dest = output::output_path(out_dir, &spec, &filename);
        output::write_output(&dest, &transformed)?;
        tracing::debug!(class = class.label(), file = %dest.display(), "emitted");

        if matches!(class, AssetClass::Script) {
            let rel = path.strip_prefix(src_dir).unwrap_or(path);
            if rel == config.build.main_entry
                || config.build.extra_entry.as_deref() == Some(rel)
            {
                entry_scripts.push((rel.to_path_buf(), filename.clone()));
            }
        }
        report.emitted.push(dest);
    }

    // Post step: copy static files.
    report.emitted.extend(output::copy_static(&config.build.static_files, out_dir)?);

    // Post step: extract the stylesheet bundle.
    if !style_bundle.is_empty() {
        let spec = rules::output_spec(mode, rules::AssetClass::Stylesheet(rules::StyleDialect::Plain));
        let digest = output::content_hash(&style_bundle, config.build.hash_len);
        let filename = output::output_filename(&spec, "bundle", "css", &digest);
        let dest = output::output_path(out_dir, &spec, &filename);
        output::write_output(&dest, &style_bundle)?;
        report.emitted.push(dest);
        report.stylesheet = Some(filename);
    }

    // Post step: write the HTML shell. Main entry first, then the secondary.
    entry_scripts.sort_by_key(|(rel, _)| *rel != config.build.main_entry);
    report.scripts = entry_scripts.into_iter().map(|(_, name)| name).collect();
    if template_path.exists() {
        let template = std::fs::read_to_string(&template_path)
            .with_context(|| format!("Failed to read HTML template: {}", template_path.display()))?;
        let html = output::render_html_shell(&template, &report.scripts, report.stylesheet.as_deref());
        let dest = out_dir.join("index.html");
        output::write_output(&dest, html.as_bytes())?;
        report.emitted.push(dest);
    }

    tracing::info!(
        emitted = report.emitted.len(),
        lint = report.lint_findings,
        "build done"
    );
    Ok(report)
}

/// Relative path of an emitted file for display.
pub fn display_rel(path: &Path, out_dir: &Path) -> String {
    path.strip_prefix(out_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
