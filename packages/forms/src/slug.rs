use std::sync::OnceLock;

use regex::Regex;

const FALLBACK_SLUG: &str = "form";

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"))
}

/// Lowercase `title`, collapse every run of non-alphanumerics into `-` and trim dashes
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    separators()
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug for `title` that `taken` does not contain, suffixed `-1`, `-2`, … as needed.
///
/// Titles with no usable characters fall back to `form`.
pub fn unique_slug(title: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut base = slugify(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }

    let mut slug = base.clone();
    let mut counter = 1;
    while taken(&slug) {
        slug = format!("{}-{}", base, counter);
        counter += 1;
    }
    slug
}
