//! Helpers for dot-terminated domain names as carried through the resolver.

/// Appends the trailing root dot when missing. The empty name is the root.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." {
        return ".".to_string();
    }
    if trimmed.ends_with('.') {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}

/// Progressively shorter suffixes of `name`, most specific first, root excluded.
///
/// `a.b.c.` yields `a.b.c.`, `b.c.`, `c.`.
pub fn suffixes(name: &str) -> Vec<String> {
    let name = normalize(name);
    if name == "." {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut rest = name.as_str();
    while !rest.is_empty() {
        result.push(rest.to_string());
        match rest.find('.') {
            Some(dot) => rest = &rest[dot + 1..],
            None => break,
        }
    }
    result
}

pub fn names_equal(a: &str, b: &str) -> bool {
    normalize(a).eq_ignore_ascii_case(&normalize(b))
}
