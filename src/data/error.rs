use thiserror::Error;

/// Errors produced by the data layer.
///
/// Load-time errors are fatal: the caller should surface one diagnostic and
/// stop. A filter that matches nothing is *not* an error anywhere in this
/// crate; it produces an empty view.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read input file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("malformed CSV input: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("required column '{0}' not found in header")]
    MissingColumn(String),

    /// Only raised under [`DateParsePolicy::Strict`]; the lenient policy
    /// drops and counts the row instead.
    ///
    /// [`DateParsePolicy::Strict`]: super::loader::DateParsePolicy
    #[error("line {line}: cannot parse '{value}' as a day-first date")]
    DateParse { line: usize, value: String },

    #[error("line {line}: cannot parse '{value}' as a number for '{column}'")]
    NumberParse {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// A programmatically supplied filter bound was not a usable number.
    /// An *inverted* range is not an error; it just matches nothing.
    #[error("invalid sales range: {low} .. {high} (bounds must be finite)")]
    InvalidRange { low: f64, high: f64 },
}
