//! MySQL identifier quoting.

/// Quote an identifier with backticks, doubling any backtick inside it.
///
/// `quote("")` yields two backticks.
pub fn quote(s: &str) -> String {
    // Most identifiers contain no backticks, so this is usually exact.
    let mut buf = String::with_capacity(s.len() + 2);

    buf.push('`');
    for c in s.chars() {
        if c == '`' {
            buf.push('`');
        }
        buf.push(c);
    }
    buf.push('`');
    buf
}

/// Reverse [`quote`].
///
/// Returns `None` unless `s` is a complete backtick-quoted identifier whose
/// inner backticks are all doubled.
pub fn unquote(s: &str) -> Option<String> {
    let inner = s.strip_prefix('`')?.strip_suffix('`')?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '`' && chars.next() != Some('`') {
            return None;
        }
        out.push(c);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("users"), "`users`");
    }

    #[test]
    fn test_quote_doubles_backticks() {
        assert_eq!(quote("a`b"), "`a``b`");
        assert_eq!(quote("`"), "````");
    }

    #[test]
    fn test_quote_empty() {
        assert_eq!(quote(""), "``");
        assert_eq!(unquote("``"), Some(String::new()));
    }

    #[test]
    fn test_quote_multibyte() {
        assert_eq!(quote("ユーザー"), "`ユーザー`");
        assert_eq!(quote("é`è"), "`é``è`");
    }

    #[test]
    fn test_unquote_rejects_malformed() {
        assert_eq!(unquote("users"), None);
        assert_eq!(unquote("`"), None);
        assert_eq!(unquote("`a`b`"), None);
        assert_eq!(unquote("`users"), None);
    }

    #[test]
    fn test_round_trip() {
        for s in ["", "id", "a`b", "``", "`leading", "trailing`", "名前", "x y;z"] {
            assert_eq!(unquote(&quote(s)).as_deref(), Some(s), "input: {s:?}");
        }
    }
}
