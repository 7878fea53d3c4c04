//! Masking of emails and bearer material before it reaches the logs.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

// Literal patterns; a compile failure disables that pass rather than panicking.
static JWT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").ok()
});
static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").ok()
});
static OPAQUE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_]{32,}={0,2}").ok());

fn replace<'a>(
    re: &LazyLock<Option<Regex>>,
    input: Cow<'a, str>,
    with: impl Fn(&Captures<'_>) -> String,
) -> Cow<'a, str> {
    match re.as_ref() {
        Some(re) if re.is_match(&input) => Cow::Owned(re.replace_all(&input, with).into_owned()),
        _ => input,
    }
}

/// Mask signed tokens, emails and long opaque strings.
///
/// JWTs go first so their segments are not half-matched as opaque tokens.
/// Emails keep the first character of the local part and the full domain.
pub fn redact(input: &str) -> String {
    let out = replace(&JWT, Cow::Borrowed(input), |_| "[REDACTED_JWT]".to_string());
    let out = replace(&EMAIL, out, |caps| mask_email(&caps[0]));
    let out = replace(&OPAQUE, out, |_| "[REDACTED_TOKEN]".to_string());
    out.into_owned()
}

fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("@{domain}"),
        },
        None => email.to_string(),
    }
}

/// Display wrapper that redacts when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
