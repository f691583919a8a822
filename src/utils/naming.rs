// Tue Jan 22 2026 - Alex

use ahash::AHashSet;
use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_$]").unwrap());

static RESERVED: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
        "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
        "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long", "native",
        "new", "package", "private", "protected", "public", "return", "short", "static", "strictfp",
        "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try", "void",
        "volatile", "while", "true", "false", "null", "var", "record", "yield",
    ]
    .into_iter()
    .collect()
});

/// Turns a native member name into a usable identifier in generated source.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident = INVALID_CHARS.replace_all(name, "_").into_owned();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(ident.as_str()) {
        ident.push('_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("cbSize"), "cbSize");
        assert_eq!(sanitize_identifier("class"), "class_");
        assert_eq!(sanitize_identifier("8bit"), "_8bit");
        assert_eq!(sanitize_identifier("a-b"), "a_b");
        assert_eq!(sanitize_identifier(""), "_");
        assert_eq!(sanitize_identifier("new"), "new_");
    }
}
