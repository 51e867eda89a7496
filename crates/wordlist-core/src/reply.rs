use std::borrow::Cow;

use crate::types::{Reply, WordRecord};

/// Reply whose speech is the text itself
pub fn simple(text: &str) -> Reply {
    Reply {
        speech: format!("<speak>{}</speak>", ssml_escape(text)),
        text: text.to_string(),
        context: Vec::new(),
    }
}

/// "<word>, <definition>", with the archived pronunciation embedded in the
/// speech when `audio_url` is known
pub fn definition(record: &WordRecord, audio_url: Option<&str>) -> Reply {
    let display = record.display();
    let tag = match audio_url {
        Some(url) => format!(
            r#"<audio src="{}">{}</audio>"#,
            ssml_escape(url),
            ssml_escape(display)
        ),
        None => ssml_escape(display).into_owned(),
    };

    Reply {
        speech: format!("<speak>{}, {}</speak>", tag, ssml_escape(&record.definition)),
        text: format!("{}, {}", display, record.definition),
        context: Vec::new(),
    }
}

fn ssml_escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
