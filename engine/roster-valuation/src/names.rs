/// Suffixes dropped from the end of a lowercased name, first match only
const NAME_SUFFIXES: [&str; 6] = [" jr", " sr", " ii", " iii", " iv", " v"];

/// Normalize a player display name into the key used by value feeds
///
/// "Kenneth Walker III" and "kenneth walker" map to the same key, as do
/// "D.J. Moore" and "DJ Moore".
pub fn normalize_name(name: &str) -> String {
    let mut name = name.to_lowercase().replace(['.', ','], "");

    for suffix in NAME_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
            break;
        }
    }

    let filtered: String = name
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
