/// Canonical form of a URL slug: surrounding whitespace and slashes removed,
/// lowercased. Department keys, taxonomy slugs and route segments all compare
/// in this form.
pub fn normalize_slug(raw: &str) -> String {
    raw.trim().trim_matches('/').to_lowercase()
}
