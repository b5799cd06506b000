use crate::config::BuildMode;

/// Stylesheet dialect, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleDialect {
    Plain,
    Less,
    Scss,
    Sass,
}

impl StyleDialect {
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "css",
            Self::Less => "less",
            Self::Scss => "scss",
            Self::Sass => "sass",
        }
    }
}

/// What kind of input a source file is, decided purely by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Script,
    Stylesheet(StyleDialect),
    Image,
    Font,
    Xml,
    Csv,
    Json,
    Html,
    Other,
}

impl AssetClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Stylesheet(_) => "stylesheet",
            Self::Image => "image",
            Self::Font => "font",
            Self::Xml => "xml",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
            Self::Other => "other",
        }
    }
}

/// One source-to-source (or passthrough) step in a transform chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStep {
    CompileStyle(StyleDialect),
    DownlevelScript,
    MinifyStyle,
    MinifyScript,
    EmitVerbatim,
}

/// Where an emitted file lands and how it is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSpec {
    /// Subdirectory under the output dir, if any.
    pub subdir: Option<&'static str>,
    /// Whether the filename carries a content hash in this mode.
    pub hashed: bool,
    /// Output extension, when the transform changes it.
    pub rewrite_ext: Option<&'static str>,
}

/// Classify a file extension. Total: unknown extensions map to `Other`.
pub fn classify(ext: &str) -> AssetClass {
    match ext.to_ascii_lowercase().as_str() {
        "js" | "mjs" | "ts" | "jsx" | "tsx" => AssetClass::Script,
        "css" => AssetClass::Stylesheet(StyleDialect::Plain),
        "less" => AssetClass::Stylesheet(StyleDialect::Less),
        "scss" => AssetClass::Stylesheet(StyleDialect::Scss),
        "sass" => AssetClass::Stylesheet(StyleDialect::Sass),
        "png" | "jpg" | "jpeg" | "svg" | "gif" | "webp" => AssetClass::Image,
        "woff" | "woff2" | "ttf" | "eot" => AssetClass::Font,
        "xml" => AssetClass::Xml,
        "csv" => AssetClass::Csv,
        "json" => AssetClass::Json,
        "html" => AssetClass::Html,
        _ => AssetClass::Other,
    }
}

/// The declarative rule table: a total function from (mode, class) to the
/// ordered transform chain for that class.
pub fn transform_chain(mode: BuildMode, class: AssetClass) -> Vec<TransformStep> {
    match class {
        AssetClass::Script => {
            let mut chain = vec![TransformStep::DownlevelScript];
            if mode.is_production() {
                chain.push(TransformStep::MinifyScript);
            }
            chain
        }
        AssetClass::Stylesheet(dialect) => {
            let mut chain = vec![TransformStep::CompileStyle(dialect)];
            if mode.is_production() {
                chain.push(TransformStep::MinifyStyle);
            }
            chain
        }
        AssetClass::Image
        | AssetClass::Font
        | AssetClass::Xml
        | AssetClass::Csv
        | AssetClass::Json
        | AssetClass::Html
        | AssetClass::Other => vec![TransformStep::EmitVerbatim],
    }
}

/// Output placement rules. Images and fonts are content-addressed in both
/// modes; scripts and stylesheets only in production.
pub fn output_spec(mode: BuildMode, class: AssetClass) -> OutputSpec {
    match class {
        AssetClass::Image => OutputSpec {
            subdir: Some("assets/images"),
            hashed: true,
            rewrite_ext: None,
        },
        AssetClass::Font => OutputSpec {
            subdir: Some("assets/fonts"),
            hashed: true,
            rewrite_ext: None,
        },
        AssetClass::Script => OutputSpec {
            subdir: None,
            hashed: mode.is_production(),
            rewrite_ext: Some("js"),
        },
        AssetClass::Stylesheet(_) => OutputSpec {
            subdir: None,
            hashed: mode.is_production(),
            rewrite_ext: Some("css"),
        },
        AssetClass::Xml | AssetClass::Csv | AssetClass::Json => OutputSpec {
            subdir: Some("assets/data"),
            hashed: false,
            rewrite_ext: None,
        },
        AssetClass::Html | AssetClass::Other => OutputSpec {
            subdir: None,
            hashed: false,
            rewrite_ext: None,
        },
    }
}
