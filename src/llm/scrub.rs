use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

/// Prefixes and markers after which a credential value may follow.
const SECRET_MARKERS: [&str; 6] = [
    "AIza",
    "ya29.",
    "key=",
    "x-goog-api-key: ",
    "\"api_key\":\"",
    "Authorization: Bearer ",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn scrub_after_marker(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = scrubbed[content_start..]
            .char_indices()
            .find(|&(_, c)| !is_secret_char(c))
            .map_or(scrubbed.len(), |(i, _)| content_start + i);

        // Bare markers without a value stay as they are.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        scrubbed.replace_range(start..end, "[REDACTED]");
        search_from = start + "[REDACTED]".len();
    }
}

/// Redact credential-looking tokens from provider error text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|marker| input.contains(marker)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        scrub_after_marker(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    match scrubbed.char_indices().nth(MAX_API_ERROR_CHARS) {
        Some((idx, _)) => format!("{}...", &scrubbed[..idx]),
        None => scrubbed.into_owned(),
    }
}
