use crate::labels::Labels;

/// File name a guide for `property_name` is saved under: whitespace runs become
/// a single underscore, characters that aren't allowed in file names become
/// `-`, and the language's suffix is appended.
pub fn guide_filename(property_name: &str, labels: &Labels) -> String {
    let stem = property_name
        .split_whitespace()
        .map(|word| word.chars().map(file_safe).collect::<String>())
        .collect::<Vec<_>>()
        .join("_");
    format!("{stem}{}", labels.guide_suffix)
}

fn file_safe(ch: char) -> char {
    match ch {
        '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
        c if c.is_control() => '-',
        c => c,
    }
}
