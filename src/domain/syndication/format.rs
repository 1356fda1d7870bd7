/// Wire formats a feed can be rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Rss2,
    Atom1,
    Json1,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Rss2, OutputFormat::Atom1, OutputFormat::Json1];

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Rss2 => "application/rss+xml",
            OutputFormat::Atom1 => "application/atom+xml",
            OutputFormat::Json1 => "application/json",
        }
    }

    /// Path suffix of the self link advertised for this format.
    ///
    /// The mapping is exhaustive on purpose: a new format cannot be added
    /// without the compiler pointing here.
    pub fn self_link_suffix(self) -> &'static str {
        match self {
            OutputFormat::Rss2 => "videos.xml",
            OutputFormat::Atom1 => "videos.atom",
            OutputFormat::Json1 => "videos.json",
        }
    }
}

/// Values accepted for the `format` query parameter.
pub const FORMAT_TOKENS: [&str; 6] = ["atom", "atom1", "json", "json1", "rss", "rss2"];

/// Pick the output format from the request path and the `format` query
/// parameter. Total function: anything unrecognized falls back to RSS 2.0.
///
/// The path extension wins whenever it names a format unambiguously. The
/// `.xml` extension serves both RSS and Atom, so only in that case (or when
/// the path carries no extension at all) does the query parameter break the
/// tie.
pub fn resolve(path: &str, query_format: Option<&str>) -> OutputFormat {
    if ends_with_any(path, &[".atom", ".atom1"]) {
        return OutputFormat::Atom1;
    }
    if ends_with_any(path, &[".json", ".json1"]) {
        return OutputFormat::Json1;
    }
    if ends_with_any(path, &[".rss", ".rss2"]) {
        return OutputFormat::Rss2;
    }

    match query_format {
        Some("atom") | Some("atom1") => OutputFormat::Atom1,
        Some("json") | Some("json1") => OutputFormat::Json1,
        _ => OutputFormat::Rss2,
    }
}

fn ends_with_any(path: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| path.ends_with(suffix))
}
