use std::sync::LazyLock;

use regex::Regex;

static ELAPSED_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches: (0ms) or (1234ms)
    Regex::new(r"\(\d+ms\)").unwrap()
});

pub fn sanitize_elapsed(input: &str) -> String {
    ELAPSED_RE.replace_all(input, "(Xms)").to_string()
}
