/// Characters that can start a set. A leading zero never starts a set.
const SET_START_CHARS: &str = "123456789~";
const SET_CHARS: &str = "0123456789~@,.+x ";

/// Splits the sets part of a log line into a sets string and free-text comments.
///
/// ```
/// use liftlog_domain::sanitize_sets;
///
/// assert_eq!(
///     sanitize_sets(" 12 at 60, 2x9 at 70, felt strong<br></li>"),
///     ("12@60,2x9@70".to_string(), "felt strong".to_string())
/// );
/// ```
///
/// Drop sets are not supported, lines mentioning them yield two empty strings.
#[must_use]
pub fn sanitize_sets(raw: &str) -> (String, String) {
    if raw.contains("drop") {
        return (String::new(), String::new());
    }

    let (body, trailing) = split_markup(raw);
    let body = body.replace(';', ",");

    let mut parts = vec![];
    let mut comments = vec![];

    for part in body.split(',') {
        let part = part.trim();
        let Some(first) = part.chars().next() else {
            continue;
        };

        if !SET_START_CHARS.contains(first) {
            comments.push(part.to_string());
            continue;
        }

        let part = replace_word_at(part);
        match part.char_indices().find(|(_, c)| !SET_CHARS.contains(*c)) {
            Some((idx, _)) => {
                comments.push(part[idx..].trim().to_string());
                parts.push(part[..idx].to_string());
            }
            None => parts.push(part),
        }
    }

    let trailing = trailing.trim().trim_start_matches('/').trim();
    if !trailing.is_empty() {
        comments.push(trailing.to_string());
    }

    let mut sets_string = parts.join(",").replace(' ', "");
    for (from, to) in [(",,", ","), (",@", "@"), ("@,", "@"), ("+@", "@")] {
        sets_string = sets_string.replace(from, to);
    }

    (sets_string.trim().to_string(), comments.join(" ").trim().to_string())
}

/// Returns the text before the first tag and any free text after the last tag.
fn split_markup(raw: &str) -> (&str, &str) {
    match raw.find('<') {
        Some(idx) => {
            let markup = &raw[idx..];
            let trailing = markup.rfind('>').map_or("", |end| &markup[end + 1..]);
            (&raw[..idx], trailing)
        }
        None => (raw, ""),
    }
}

/// Replaces the standalone word "at" by "@", so "12 at 60" becomes "12 @ 60" but "flat" is kept.
fn replace_word_at(part: &str) -> String {
    let mut result = String::with_capacity(part.len());
    let mut previous: Option<char> = None;
    let mut chars = part.chars().peekable();

    while let Some(c) = chars.next() {
        if c == 'a' && !previous.is_some_and(char::is_alphabetic) {
            let mut lookahead = chars.clone();
            if lookahead.next() == Some('t') && !lookahead.peek().is_some_and(|n| n.is_alphabetic())
            {
                chars.next();
                result.push('@');
                previous = Some('@');
                continue;
            }
        }
        result.push(c);
        previous = Some(c);
    }

    result
}
