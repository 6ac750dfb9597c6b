//! Quoting helpers for generated SQL.
//!
//! Table and column names are generated by the catalog, never taken from a
//! request, but they are still quoted. Request values are bound as
//! parameters; [`quote_literal`] covers the few places a literal is written
//! into the statement text.

/// Quote an identifier: `report_x` → `"report_x"`, doubling inner quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a string literal: `it's` → `'it''s'`.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Escape character used with [`escape_like`].
pub const LIKE_ESCAPE: char = '\\';

/// Escape `%`, `_` and the escape character so they match literally in a
/// `LIKE ... ESCAPE '\'` pattern.
#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Case-insensitive substring pattern for `term`.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("report_setter_totals", "\"report_setter_totals\"")]
    #[case("odd\"name", "\"odd\"\"name\"")]
    fn quotes_identifiers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(quote_ident(input), expected);
    }

    #[rstest]
    #[case("plain", "'plain'")]
    #[case("O'Brien", "'O''Brien'")]
    #[case("\\", "'\\'")]
    fn quotes_literals(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(quote_literal(input), expected);
    }

    #[rstest]
    #[case("100%", "100\\%")]
    #[case("a_b", "a\\_b")]
    #[case("back\\slash", "back\\\\slash")]
    #[case("it's", "it's")]
    fn escapes_like_wildcards(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }

    #[test]
    fn contains_pattern_wraps_term() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
    }
}
