use super::rules::{StyleDialect, TransformStep};
use anyhow::{bail, Result};

/// Apply an ordered transform chain to one input file's bytes.
pub fn apply_chain(steps: &[TransformStep], input: Vec<u8>) -> Result<Vec<u8>> {
    let mut bytes = input;
    for step in steps {
        bytes = apply_step(*step, bytes)?;
    }
    Ok(bytes)
}

fn apply_step(step: TransformStep, bytes: Vec<u8>) -> Result<Vec<u8>> {
    match step {
        TransformStep::EmitVerbatim => Ok(bytes),
        TransformStep::CompileStyle(dialect) => {
            let src = as_text(bytes, "stylesheet")?;
            Ok(compile_style(dialect, &src).into_bytes())
        }
        TransformStep::DownlevelScript => {
            let src = as_text(bytes, "script")?;
            Ok(downlevel_script(&src).into_bytes())
        }
        TransformStep::MinifyStyle | TransformStep::MinifyScript => {
            let src = as_text(bytes, "minify input")?;
            Ok(minify(&src).into_bytes())
        }
    }
}

fn as_text(bytes: Vec<u8>, what: &str) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(_) => bail!("{} is not valid UTF-8", what),
    }
}

/// Normalize a stylesheet dialect down to plain CSS.
///
/// The real preprocessors are external tools; this pass only strips the
/// dialect's comment forms so the emitted bundle is valid CSS. Rule bodies
/// pass through untouched.
pub fn compile_style(dialect: StyleDialect, src: &str) -> String {
    let stripped = strip_block_comments(src);
    match dialect {
        // Plain CSS has no line comments.
        StyleDialect::Plain => stripped,
        StyleDialect::Less | StyleDialect::Scss | StyleDialect::Sass => {
            strip_line_comments(&stripped)
        }
    }
}

/// Stand-in for the downlevel compiler: comment stripping, source otherwise
/// untouched.
pub fn downlevel_script(src: &str) -> String {
    strip_line_comments(&strip_block_comments(src))
}

/// Whitespace-collapse minifier shared by the style and script steps.
pub fn minify(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut pending_space = false;
    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if pending_space {
            out.push(' ');
        }
        out.push_str(trimmed);
        pending_space = true;
    }
    out
}

fn strip_block_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out, // unterminated comment swallows the tail
        }
    }
    out.push_str(rest);
    out
}

fn strip_line_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for line in src.lines() {
        // Naive scan; a `//` inside a string or url() is rare enough in the
        // demo sources that we accept the false positive on protocol-relative
        // URLs by requiring no preceding ':'.
        let cut = line
            .find("//")
            .filter(|&i| !line[..i].ends_with(':'))
            .map_or(line, |i| line[..i].trim_end());
        out.push_str(cut);
        out.push('\n');
    }
    out
}
