//! URL builders for site links.

/// Public folder holding badge images.
pub const DEFAULT_BADGE_ROOT: &str = "/content/badges";

/// RSS feed URL for a category.
///
/// ```
/// assert_eq!(agora_site::category_rss_url("cat", "general"), "/cat/rss/general");
/// ```
pub fn category_rss_url(category_identifier: &str, slug: &str) -> String {
    format!("/{category_identifier}/rss/{slug}")
}

/// URL of a badge image under `badge_root`.
pub fn badge_url(badge_root: &str, badge_file: &str) -> String {
    format!("{}/{badge_file}", badge_root.trim_end_matches('/'))
}
