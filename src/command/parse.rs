//! Argument parsing shared by the commands.

/// Split off the first whitespace-delimited word; the rest is trimmed.
pub fn split_word(args: &str) -> (&str, &str) {
    let args = args.trim();
    match args.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (args, ""),
    }
}

/// `"<position> <name>"` or `"<name>"`.
///
/// A leading number is a queue position (0 is the token holder, N is Nth in
/// line) and the next word is the name. Anything else is taken as the name.
pub fn parse_position(args: &str) -> (Option<usize>, &str) {
    let (first, rest) = split_word(args);
    match first.parse::<usize>() {
        Ok(position) => (Some(position), split_word(rest).0),
        Err(_) => (None, first),
    }
}

/// Case-insensitive `starts_with`; an empty prefix matches everything.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}
