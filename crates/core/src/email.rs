use regex::Regex;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"[\w.-]+@[\w.-]+";

fn email_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// First `local@domain` looking substring, scanning left to right.
pub fn find_email(text: &str) -> Option<&str> {
    email_regex().find(text).map(|found| found.as_str())
}
