/// separator substituted for punctuation inside an Onestop ID name component.
pub const NAME_DELIMITER: char = '~';

/// separates a parent station name from a platform suffix, as in `station<platform`.
pub const PLATFORM_DELIMITER: char = '<';

/// normalizes a free-text name into an Onestop ID name component.
///
/// names are lowercased, alphanumerics are kept, common separators
/// (`-`, `:`, `&`, `@`, `/`, `~`) become a single [`NAME_DELIMITER`], and
/// everything else (including whitespace) is dropped. the platform delimiter
/// is preserved so child stop names can be normalized without losing their suffix.
pub fn parameterize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == PLATFORM_DELIMITER {
            result.push(c);
        } else if matches!(c, '-' | ':' | '&' | '@' | '/' | NAME_DELIMITER)
            && !result.is_empty()
            && !result.ends_with(NAME_DELIMITER)
        {
            result.push(NAME_DELIMITER);
        }
    }
    while result.ends_with(NAME_DELIMITER) {
        result.pop();
    }
    result
}
