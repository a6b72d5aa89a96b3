//! String helpers shared by the line-oriented codecs.

use crate::error::DomainError;

/// Separator between fields on a record line.
pub const FIELD_SEPARATOR: char = ',';

/// Separator between the halves of a compound field such as `level:experience`.
pub const COMPOUND_SEPARATOR: char = ':';

/// Converts an empty string to `None`, otherwise returns `Some(value)`.
///
/// # Examples
///
/// ```
/// use charsheet_domain::common::none_if_empty;
///
/// assert_eq!(none_if_empty("hello"), Some("hello"));
/// assert_eq!(none_if_empty(""), None);
/// assert_eq!(none_if_empty(" "), Some(" ")); // Whitespace is not empty
/// ```
pub fn none_if_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Splits a list-valued line into its non-empty segments.
///
/// An empty line yields nothing, so categories a character has not filled in
/// yet decode to empty sets.
///
/// # Examples
///
/// ```
/// use charsheet_domain::common::split_list;
///
/// assert_eq!(split_list("Elvish,Common").collect::<Vec<_>>(), vec!["Elvish", "Common"]);
/// assert_eq!(split_list("").count(), 0);
/// assert_eq!(split_list("a,,b").collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
pub fn split_list(line: &str) -> impl Iterator<Item = &str> {
    line.split(FIELD_SEPARATOR).filter_map(none_if_empty)
}

/// Joins values with the field separator, without a trailing comma.
pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Rejects values that would corrupt a line-oriented record.
///
/// Field and compound separators and line breaks cannot be escaped in the
/// character file, so they are refused at write time.
pub fn ensure_plain_field(label: &str, value: &str) -> Result<(), DomainError> {
    if value
        .chars()
        .any(|c| c == FIELD_SEPARATOR || c == COMPOUND_SEPARATOR || c == '\n' || c == '\r')
    {
        return Err(DomainError::validation(format!(
            "{label} '{value}' cannot contain ',', ':' or line breaks"
        )));
    }
    Ok(())
}

/// Parses a `0`/`1` flag column.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Encodes a boolean as a `0`/`1` flag column.
pub fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_empty_whitespace_is_not_empty() {
        assert_eq!(none_if_empty(" "), Some(" "));
        assert_eq!(none_if_empty("\t"), Some("\t"));
    }

    #[test]
    fn test_join_list_has_no_trailing_separator() {
        assert_eq!(join_list(["a", "b", "c"]), "a,b,c");
        assert_eq!(join_list(Vec::<String>::new()), "");
        assert_eq!(join_list(["solo"]), "solo");
    }

    #[test]
    fn test_ensure_plain_field() {
        assert!(ensure_plain_field("Feat", "Alert").is_ok());
        assert!(ensure_plain_field("Feat", "War Caster").is_ok());
        assert!(ensure_plain_field("Feat", "Alert, Lucky").is_err());
        assert!(ensure_plain_field("Feat", "a:b").is_err());
        assert!(ensure_plain_field("Feat", "line\nbreak").is_err());
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(flag(true), "1");
        assert_eq!(flag(false), "0");
    }
}
