//! Subject name normalization.

/// Capitalize the first letter of each word and lowercase the rest.
///
/// Words are split on single spaces and joined back with single spaces, so
/// runs of spaces are preserved exactly.
///
/// ```
/// use quiz_store::format_subject;
/// assert_eq!(format_subject("data STRUCTURES"), "Data Structures");
/// ```
pub fn format_subject(subject: &str) -> String {
    subject
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
