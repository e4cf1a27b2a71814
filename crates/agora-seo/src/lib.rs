//! Pagination-aware SEO link tags and page titles for Agora forum pages.
//!
//! A paged listing (topics in a category, posts in a topic, search results)
//! exposes the same content under many `?p=N` variants. Search engines are
//! told which variant is authoritative with a `rel="canonical"` link and how
//! the pages chain together with `rel="next"` / `rel="prev"` links.
//!
//! - [`build_link_tags`] computes a [`LinkTagSet`] from a [`PageContext`]
//! - [`PageUrlFormat`] decides how a page number is appended to a URL
//! - [`HasDisplayName`] provides page titles for titled entities
//!
//! # Example
//!
//! ```
//! use agora_seo::{PageContext, QueryParamFormat, build_link_tags};
//!
//! let ctx = PageContext::new(95, 10, "/cat/general").with_page(5);
//! let tags = build_link_tags(&ctx, &QueryParamFormat::default()).unwrap();
//!
//! assert_eq!(tags.canonical, "/cat/general?p=5");
//! assert_eq!(tags.next.as_deref(), Some("/cat/general?p=6"));
//! assert_eq!(tags.prev.as_deref(), Some("/cat/general?p=4"));
//! ```

mod format;
mod links;
mod title;

pub use format::{DEFAULT_PAGE_PARAM, PageUrlFormat, QueryParamFormat, TemplateFormat};
pub use links::{LinkTagSet, PageContext, build_link_tags, parse_page, query_param};
pub use title::{Category, HasDisplayName, Topic, meta_description, page_title};

/// SEO helper error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeoError {
    /// Caller passed an unusable argument (zero page size, malformed page number).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Escape text for use inside an HTML attribute value.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
