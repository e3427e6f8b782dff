//! Product identifier normalization.
//!
//! Users paste either a bare slug or a full catalog URL; everything downstream
//! works with the bare slug.

use url::Url;

/// Identifier used when the input is empty.
pub const DEFAULT_IDENTIFIER: &str = "demodazzle";

/// Host fragment identifying catalog URLs.
const CATALOG_HOST: &str = "producthunt.com";

/// First path segments under which the second segment is the slug.
const CATALOG_COLLECTIONS: [&str; 2] = ["posts", "products"];

/// Reduces user input to a bare product slug.
///
/// # Rules
///
/// 1. Input is trimmed; empty input yields [`DEFAULT_IDENTIFIER`]
/// 2. Input without `/` and `.` is already a slug
/// 3. A catalog URL (`/posts/<slug>` or `/products/<slug>`) yields its second path segment
/// 4. Anything else containing `/` yields its last segment, ignoring one trailing slash
/// 5. Otherwise the trimmed input is returned unchanged
///
/// Never fails: unresolvable input is passed through rather than rejected.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_identifier("https://www.producthunt.com/products/voltops/"),
///     "voltops"
/// );
/// assert_eq!(normalize_identifier("random/path/fragment"), "fragment");
/// assert_eq!(normalize_identifier(""), DEFAULT_IDENTIFIER);
/// ```
pub fn normalize_identifier(input: &str) -> String {
    let input = input.trim();

    if input.is_empty() {
        return DEFAULT_IDENTIFIER.to_string();
    }

    if !input.contains('/') && !input.contains('.') {
        return input.to_string();
    }

    if let Some(slug) = catalog_slug(input) {
        return slug;
    }

    if input.contains('/') {
        let path = input.strip_suffix('/').unwrap_or(input);
        return path.rsplit('/').next().unwrap_or(path).to_string();
    }

    input.to_string()
}

/// Extracts the slug from a recognized catalog URL.
fn catalog_slug(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;

    if !url.host_str()?.contains(CATALOG_HOST) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let collection = segments.next()?;
    let slug = segments.next()?;

    CATALOG_COLLECTIONS
        .contains(&collection)
        .then(|| slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_slug_unchanged() {
        assert_eq!(
            normalize_identifier("voltops-llm-observability-platform"),
            "voltops-llm-observability-platform"
        );
    }

    #[test]
    fn test_products_url_with_trailing_slash() {
        assert_eq!(
            normalize_identifier(
                "https://www.producthunt.com/products/voltops-llm-observability-platform/"
            ),
            "voltops-llm-observability-platform"
        );
    }

    #[test]
    fn test_posts_url() {
        assert_eq!(
            normalize_identifier("https://www.producthunt.com/posts/some-product"),
            "some-product"
        );
    }

    #[test]
    fn test_catalog_url_ignores_query_and_deeper_segments() {
        assert_eq!(
            normalize_identifier("https://producthunt.com/products/voltops/reviews?ref=home"),
            "voltops"
        );
    }

    #[test]
    fn test_relative_path_falls_back_to_last_segment() {
        assert_eq!(normalize_identifier("random/path/fragment"), "fragment");
        assert_eq!(normalize_identifier("random/path/fragment/"), "fragment");
    }

    #[test]
    fn test_foreign_host_falls_back_to_last_segment() {
        assert_eq!(
            normalize_identifier("https://example.com/products/other/"),
            "other"
        );
    }

    #[test]
    fn test_unrecognized_collection_falls_back_to_last_segment() {
        assert_eq!(
            normalize_identifier("https://www.producthunt.com/topics/developer-tools"),
            "developer-tools"
        );
    }

    #[test]
    fn test_dotted_input_without_slash_passes_through() {
        assert_eq!(normalize_identifier("voltops.dev"), "voltops.dev");
    }

    #[test]
    fn test_empty_input_uses_default() {
        assert_eq!(normalize_identifier(""), DEFAULT_IDENTIFIER);
        assert_eq!(normalize_identifier("   "), DEFAULT_IDENTIFIER);
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(normalize_identifier("  voltops \n"), "voltops");
    }
}
