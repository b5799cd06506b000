use super::rules::OutputSpec;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Truncated hex digest of a file's contents, embedded in output filenames
/// for cache busting.
pub fn content_hash(bytes: &[u8], len: usize) -> String {
    let digest = Sha256::digest(bytes);
    let mut hx = hex::encode(digest);
    hx.truncate(len);
    hx
}

/// Output filename for one emitted asset: `[name].[hash].[ext]` when the rule
/// hashes in this mode, `[name].[ext]` otherwise.
pub fn output_filename(spec: &OutputSpec, stem: &str, ext: &str, digest: &str) -> String {
    let ext = spec.rewrite_ext.unwrap_or(ext);
    if spec.hashed {
        format!("{}.{}.{}", stem, digest, ext)
    } else {
        format!("{}.{}", stem, ext)
    }
}

/// Full output path: subdirectory per the rule table, then the filename.
pub fn output_path(out_dir: &Path, spec: &OutputSpec, filename: &str) -> PathBuf {
    match spec.subdir {
        Some(sub) => out_dir.join(sub).join(filename),
        None => out_dir.join(filename),
    }
}

/// Remove the previous build output, if any, and recreate the directory.
pub fn clean_output(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir)
            .with_context(|| format!("Failed to clean output dir: {}", out_dir.display()))?;
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output dir: {}", out_dir.display()))?;
    Ok(())
}

/// Copy configured static files into the output dir unchanged.
pub fn copy_static(files: &[PathBuf], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for file in files {
        let name = file
            .file_name()
            .with_context(|| format!("Static file has no name: {}", file.display()))?;
        let dest = out_dir.join(name);
        std::fs::copy(file, &dest)
            .with_context(|| format!("Failed to copy static file: {}", file.display()))?;
        copied.push(dest);
    }
    Ok(copied)
}

/// Write emitted bytes, creating parent directories as needed.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir: {}", parent.display()))?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write output: {}", path.display()))?;
    Ok(())
}

/// Render the HTML shell from the source template, injecting the emitted
/// script bundles and the extracted stylesheet bundle before `</head>` /
/// `</body>`.
pub fn render_html_shell(template: &str, scripts: &[String], stylesheet: Option<&str>) -> String {
    let mut html = template.to_string();

    if let Some(css) = stylesheet {
        let link = format!("  <link rel=\"stylesheet\" href=\"{}\">\n", css);
        match html.find("</head>") {
            Some(i) => html.insert_str(i, &link),
            None => html.insert_str(0, &link),
        }
    }

    let mut tags = String::new();
    for script in scripts {
        tags.push_str(&format!("  <script src=\"{}\"></script>\n", script));
    }
    match html.find("</body>") {
        Some(i) => html.insert_str(i, &tags),
        None => html.push_str(&tags),
    }
    html
}
