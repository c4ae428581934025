//! Identifier utilities shared by the node kinds.

/// Turn a qualified C++ name into a string usable as a C++ variable name.
///
/// `MyClass::MyEnum` becomes `MyClass_MyEnum`, template brackets become `_`
/// and pointer markers become `_ptr_`. Adjacent substitutions share their
/// separator, so `Foo::Bar<Baz>*` becomes `Foo_Bar_Baz_ptr_`.
pub fn as_variable(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 8);
    let mut after_substitution = false;
    let mut rest = name;

    while let Some(c) = rest.chars().next() {
        let (replacement, consumed) = if rest.starts_with("::") {
            (Some("_"), 2)
        } else {
            match c {
                '<' | '>' => (Some("_"), 1),
                '*' => (Some("_ptr_"), 1),
                _ => (None, c.len_utf8()),
            }
        };

        match replacement {
            Some(replacement) => {
                let replacement = if after_substitution {
                    replacement.strip_prefix('_').unwrap_or(replacement)
                } else {
                    replacement
                };
                result.push_str(replacement);
                after_substitution = true;
            }
            None => {
                result.push(c);
                after_substitution = false;
            }
        }
        rest = &rest[consumed..];
    }

    result
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "getArea" -> "get_area")
///
/// Runs of capitals are kept together, so "toHTML" becomes "to_html".
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_variable() {
        assert_eq!(as_variable("Foo::Bar<Baz>*"), "Foo_Bar_Baz_ptr_");
        assert_eq!(as_variable("MyClass::MyEnum"), "MyClass_MyEnum");
        assert_eq!(as_variable("std::vector<int>"), "std_vector_int_");
        assert_eq!(as_variable("plain"), "plain");
        assert_eq!(as_variable(""), "");
    }

    #[test]
    fn test_as_variable_shares_separators() {
        assert_eq!(as_variable("std::vector<std::vector<int>>"), "std_vector_std_vector_int_");
        assert_eq!(as_variable("char**"), "char_ptr_ptr_");
        assert_eq!(as_variable("Map<Key*>"), "Map_Key_ptr_");
        // underscores written in the name are kept
        assert_eq!(as_variable("my_type_*"), "my_type__ptr_");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("Shape"), "Shape");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Hello"), "hello");
        assert_eq!(to_snake_case("getArea"), "get_area");
        assert_eq!(to_snake_case("HelloWorld"), "hello_world");
        assert_eq!(to_snake_case("toHTML"), "to_html");
        assert_eq!(to_snake_case("HTMLParser"), "html_parser");
        assert_eq!(to_snake_case("area2D"), "area2_d");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case(""), "");
    }
}
