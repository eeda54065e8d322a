//! Struct tag parsing.
//!
//! Tags follow the conventional `key:"value" key2:"value2"` layout, where a
//! value is a comma-separated list whose first element is the wire key and
//! the rest are options.

/// Annotations read from a field tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagInfo {
    /// Key name given in the tag, if any.
    pub key: Option<String>,
    /// The omit-empty option is present.
    pub omit_empty: bool,
}

/// Read the annotations stored under `tag_name` in a raw tag.
pub fn parse_tag(raw: &str, tag_name: &str) -> TagInfo {
    let Some(value) = lookup(raw, tag_name) else {
        return TagInfo::default();
    };

    let mut parts = value.split(',');
    let key = parts
        .next()
        .map(str::trim)
        .filter(|key| !key.is_empty() && *key != "-")
        .map(str::to_string);
    let omit_empty = parts.any(|option| option.trim().eq_ignore_ascii_case("omitempty"));

    TagInfo { key, omit_empty }
}

/// Find the quoted value for `name`, unescaping `\"` and `\\`.
fn lookup(raw: &str, name: &str) -> Option<String> {
    let mut rest = raw.trim_start();
    while !rest.is_empty() {
        let colon = rest.find(':')?;
        let key = &rest[..colon];
        let after = rest[colon + 1..].strip_prefix('"')?;

        let mut value = String::new();
        let mut chars = after.char_indices();
        let mut end = None;
        while let Some((pos, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        value.push(escaped);
                    }
                }
                '"' => {
                    end = Some(pos);
                    break;
                }
                c => value.push(c),
            }
        }
        let end = end?;

        if key == name {
            return Some(value);
        }
        rest = after[end + 1..].trim_start();
    }
    None
}
