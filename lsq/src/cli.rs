use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[clap(about = "Parse imeji search queries and print them back")]
pub struct Cli {
    /// Query to parse. Reads one query per line from stdin when omitted.
    pub query: Option<String>,
    #[clap(long, value_enum, default_value = "canonical")]
    pub format: Format,
    /// Input is a percent-encoded URL parameter.
    #[clap(long, default_value = "false")]
    pub decode: bool,
    /// Free text becomes `all=text` instead of `(all=text OR fulltext=text)`.
    #[clap(long, default_value = "false")]
    pub no_fulltext: bool,
    #[clap(long)]
    pub max_depth: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    /// Canonical query text.
    Canonical,
    /// Canonical text, form-encoded for a URL.
    Url,
    /// Canonical text without escaping backslashes.
    Pretty,
    /// Indented element tree.
    Tree,
    Json,
}
