use anyhow::{bail, Context, Result};
use std::path::Path;

/// The three immutable demo fixtures, loaded once at bootstrap and only ever
/// displayed or logged.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub json: serde_json::Value,
    pub xml: XmlNode,
    pub csv: CsvTable,
}

impl FixtureSet {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            json: load_json(&dir.join("data.json"))?,
            xml: load_xml(&dir.join("data.xml"))?,
            csv: load_csv(&dir.join("data.csv"))?,
        })
    }
}

pub fn load_json(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON fixture: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON fixture: {}", path.display()))
}

/// One XML element: tag, text content, children. Attributes are not needed
/// by the demo fixtures and are skipped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub tag: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

/// Compact one-line rendering of the document, used when the fixture value
/// is logged at bootstrap.
impl std::fmt::Display for XmlNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.tag)?;
        if !self.text.is_empty() {
            write!(f, "{}", self.text)?;
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

pub fn load_xml(path: &Path) -> Result<XmlNode> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read XML fixture: {}", path.display()))?;
    parse_xml(&content).with_context(|| format!("Failed to parse XML fixture: {}", path.display()))
}

/// Minimal well-formed-XML parser, enough for the flat demo fixtures.
/// Comments, processing instructions, and attributes are skipped.
pub fn parse_xml(src: &str) -> Result<XmlNode> {
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut rest = src;

    while let Some(open) = rest.find('<') {
        let text = rest[..open].trim();
        if !text.is_empty() {
            if let Some(top) = stack.last_mut() {
                if !top.text.is_empty() {
                    top.text.push(' ');
                }
                top.text.push_str(text);
            }
        }
        let close = match rest[open..].find('>') {
            Some(i) => open + i,
            None => bail!("unterminated tag"),
        };
        let inner = &rest[open + 1..close];
        rest = &rest[close + 1..];

        if inner.starts_with('?') || inner.starts_with('!') {
            continue;
        }
        if let Some(name) = inner.strip_prefix('/') {
            let node = match stack.pop() {
                Some(node) => node,
                None => bail!("closing tag without opener: </{}>", name),
            };
            if node.tag != name.trim() {
                bail!("mismatched closing tag: expected </{}>, got </{}>", node.tag, name.trim());
            }
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => {
                    root = Some(node);
                    break;
                }
            }
            continue;
        }

        let self_closing = inner.ends_with('/');
        let name = inner
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        if name.is_empty() {
            bail!("empty tag name");
        }
        let node = XmlNode {
            tag: name,
            text: String::new(),
            children: Vec::new(),
        };
        if self_closing {
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => {
                    root = Some(node);
                    break;
                }
            }
        } else {
            stack.push(node);
        }
    }

    match root {
        Some(node) if stack.is_empty() => Ok(node),
        _ => bail!("document has no single root element"),
    }
}

/// Parsed CSV fixture: header row plus data rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One-line rendering: header first, then each row, pipe-separated.
impl std::fmt::Display for CsvTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header.join(","))?;
        for row in &self.rows {
            write!(f, " | {}", row.join(","))?;
        }
        Ok(())
    }
}

pub fn load_csv(path: &Path) -> Result<CsvTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV fixture: {}", path.display()))?;
    parse_csv(&content)
}

/// Comma-split CSV with optional double-quoted fields.
pub fn parse_csv(src: &str) -> Result<CsvTable> {
    let mut lines = src.lines().filter(|l| !l.trim().is_empty());
    let header = match lines.next() {
        Some(line) => split_csv_line(line),
        None => bail!("CSV fixture is empty"),
    };
    let mut rows = Vec::new();
    for line in lines {
        let row = split_csv_line(line);
        if row.len() != header.len() {
            bail!(
                "CSV row has {} fields, header has {}",
                row.len(),
                header.len()
            );
        }
        rows.push(row);
    }
    Ok(CsvTable { header, rows })
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field = String::new();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
