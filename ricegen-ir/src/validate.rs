//! Validation utilities for C++ identifiers

use miette::SourceSpan;

/// C++ keywords that cannot name a declaration.
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

pub(crate) fn is_cpp_keyword(name: &str) -> bool {
    CPP_KEYWORDS.contains(&name)
}

/// Validate that a name can be spelled as a C++ identifier.
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name contains invalid characters");
    }

    None
}

/// Validate a name that is declared in C++ as written.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_declared_name(name: &str) -> Option<&'static str> {
    if is_cpp_keyword(name) {
        return Some("name is a C++ reserved keyword");
    }
    validate_identifier(name)
}

/// Find the span of a name in the TOML source, looking for the quoted
/// string first.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{name}\"");
    if let Some(pos) = src.find(&quoted) {
        return Some(SourceSpan::from((pos, quoted.len())));
    }

    if name.is_empty() {
        return None;
    }
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert_eq!(validate_identifier("shapes"), None);
        assert_eq!(validate_identifier("_private"), None);
        assert_eq!(validate_identifier("Shape2D"), None);
        assert_eq!(validate_identifier("get_area"), None);
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(validate_identifier(""), Some("name cannot be empty"));
        assert_eq!(
            validate_identifier("2d"),
            Some("name must start with a letter or underscore")
        );
        assert_eq!(
            validate_identifier("my-ext"),
            Some("name contains invalid characters")
        );
        assert_eq!(
            validate_identifier("geo::Shape"),
            Some("name contains invalid characters")
        );
    }

    #[test]
    fn test_keywords_are_rejected_for_declared_names() {
        assert_eq!(
            validate_declared_name("class"),
            Some("name is a C++ reserved keyword")
        );
        assert_eq!(validate_identifier("class"), None);
        assert_eq!(validate_declared_name("klass"), None);
    }

    #[test]
    fn test_find_name_span() {
        let src = "name = \"my-ext\"";
        assert_eq!(find_name_span(src, "my-ext"), Some(SourceSpan::from((7, 8))));

        let src = "name = \"\"";
        assert_eq!(find_name_span(src, ""), Some(SourceSpan::from((7, 2))));

        assert_eq!(find_name_span("name = 1", "other"), None);
    }
}
