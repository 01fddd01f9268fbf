/// Split a free-text tag field into tags
///
/// Whitespace is removed before splitting on commas, and empty fragments are
/// dropped, so `"a, b,c"` gives `["a", "b", "c"]` and `""` gives `[]`.
pub fn parse_tags(input: Option<&str>) -> Vec<String> {
    let Some(input) = input else {
        return Vec::new();
    };

    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
