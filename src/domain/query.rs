//! Building database query text from search strings.

/// How a list of search strings is joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Any of the strings may match: `("a"OR"b")`.
    Or,
    /// None of the strings may match: `NOT"a"NOT"b"`.
    Not,
}

/// Combine a list of search strings into a single query fragment.
///
/// Every string is quoted for exact matching.
///
/// ```
/// use litmine::domain::query::{Join, combine};
///
/// assert_eq!(combine(["a", "b"], Join::Or), r#"("a"OR"b")"#);
/// assert_eq!(combine(["a", "b"], Join::Not), r#"NOT"a"NOT"b""#);
/// ```
pub fn combine<I, S>(strings: I, join: Join) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<String> = strings
        .into_iter()
        .map(|s| format!("\"{}\"", s.as_ref()))
        .collect();

    match join {
        Join::Or => format!("({})", quoted.join("OR")),
        Join::Not => format!("NOT{}", quoted.join("NOT")),
    }
}
