use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes left as-is in a key: ASCII alphanumerics and `_ . -`
const KEY_SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-');

/// Derive the storage key of a word.
///
/// Lowercases, maps `/` and space to `_`, then percent-encodes everything
/// outside [`KEY_SAFE`]. Escape triplets already in the input are kept
/// verbatim so that `normalize(normalize(w)) == normalize(w)`.
pub fn normalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut rest = word;

    while let Some(start) = next_escape(rest) {
        let (plain, tail) = rest.split_at(start);
        push_encoded(&mut out, plain);
        out.push_str(&tail[..3]);
        rest = &tail[3..];
    }
    push_encoded(&mut out, rest);

    out
}

fn push_encoded(out: &mut String, plain: &str) {
    if plain.is_empty() {
        return;
    }
    let mapped = plain.to_lowercase().replace(['/', ' '], "_");
    out.extend(utf8_percent_encode(&mapped, KEY_SAFE));
}

/// Byte offset of the next `%HH` triplet
fn next_escape(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (0..bytes.len().saturating_sub(2)).find(|&i| {
        bytes[i] == b'%' && bytes[i + 1].is_ascii_hexdigit() && bytes[i + 2].is_ascii_hexdigit()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_delimiters_to_underscore() {
        assert_eq!(normalize("Apple/Pie Tree"), "apple_pie_tree");
        assert_eq!(normalize("Run"), "run");
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(normalize("C++ & Co?"), "c%2B%2B_%26_co%3F");
        assert_eq!(normalize("naïve"), "na%C3%AFve");
        assert_eq!(normalize("o'clock"), "o%27clock");
        assert_eq!(normalize("a~b"), "a%7Eb");
        assert_eq!(normalize("well-known_fact.txt"), "well-known_fact.txt");
    }

    #[test]
    fn is_idempotent() {
        for word in [
            "Apple/Pie Tree",
            "C++ & Co?",
            "naïve",
            "100%",
            "50% off",
            "%",
            "ends with %4",
            "",
        ] {
            let once = normalize(word);
            assert_eq!(normalize(&once), once, "input {word:?}");
        }
    }

    #[test]
    fn lone_percent_is_encoded() {
        assert_eq!(normalize("100%"), "100%25");
        assert_eq!(normalize("%4"), "%254");
    }
}
