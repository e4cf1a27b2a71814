//! Canonical / next / prev link tags for paged listings.

use crate::SeoError;
use crate::escape_html;
use crate::format::PageUrlFormat;

/// Paging state of the listing being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Items per page. Zero is rejected by [`build_link_tags`].
    pub page_size: u32,
    /// One-based current page.
    pub current_page: u32,
    /// Listing URL without the page-number parameter.
    pub base_url: String,
}

impl PageContext {
    /// Create a context for the first page of a listing.
    #[must_use]
    pub fn new(total_items: u64, page_size: u32, base_url: impl Into<String>) -> Self {
        Self {
            total_items,
            page_size,
            current_page: 1,
            base_url: base_url.into(),
        }
    }

    /// Set the current page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.current_page = page;
        self
    }

    /// Create a context from the raw page indicator of the request.
    ///
    /// `page` is the value of the page-number query parameter, `None` when the
    /// parameter was not sent.
    ///
    /// # Errors
    ///
    /// Returns [`SeoError::InvalidArgument`] if `page` is not a number.
    pub fn from_query(
        total_items: u64,
        page_size: u32,
        base_url: impl Into<String>,
        page: Option<&str>,
    ) -> Result<Self, SeoError> {
        Ok(Self::new(total_items, page_size, base_url).with_page(parse_page(page)?))
    }

    /// Number of pages, at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`SeoError::InvalidArgument`] if `page_size` is zero.
    pub fn page_count(&self) -> Result<u32, SeoError> {
        if self.page_size == 0 {
            return Err(SeoError::InvalidArgument(
                "page size must be greater than 0".to_owned(),
            ));
        }
        let pages = self.total_items.div_ceil(u64::from(self.page_size)).max(1);
        Ok(u32::try_from(pages).unwrap_or(u32::MAX))
    }
}

/// Parse the page indicator sent by the client.
///
/// A missing indicator means page 1. Anything present must be a
/// non-negative integer; it is never silently replaced by a default.
/// Negative numbers such as `-2` are rejected too, even though older forum
/// engines parsed them and fell back to the first page.
///
/// # Errors
///
/// Returns [`SeoError::InvalidArgument`] for empty, negative or non-numeric values.
pub fn parse_page(value: Option<&str>) -> Result<u32, SeoError> {
    let Some(raw) = value else {
        return Ok(1);
    };
    raw.trim().parse::<u32>().map_err(|_| {
        SeoError::InvalidArgument(format!("page indicator {raw:?} is not a valid page number"))
    })
}

/// Look up `name` in a raw query string (without the leading `?`).
///
/// Returns the first value for `name`; a parameter without `=` has an empty value.
///
/// ```
/// use agora_seo::query_param;
///
/// assert_eq!(query_param("sort=new&p=3", "p"), Some("3"));
/// assert_eq!(query_param("sort=new", "p"), None);
/// ```
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// SEO link URLs for one listing page.
///
/// `next` is `None` on and after the last page, `prev` is `None` on the
/// first page, and both are `None` for single-page listings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinkTagSet {
    /// Authoritative URL of the current page.
    pub canonical: String,
    /// URL of the following page.
    pub next: Option<String>,
    /// URL of the preceding page.
    pub prev: Option<String>,
}

impl LinkTagSet {
    /// `<link rel="canonical">` tag.
    pub fn canonical_tag(&self) -> String {
        link_tag(&self.canonical, "canonical")
    }

    /// `<link rel="next">` tag, or an empty string.
    pub fn next_tag(&self) -> String {
        self.next
            .as_deref()
            .map(|url| link_tag(url, "next"))
            .unwrap_or_default()
    }

    /// `<link rel="prev">` tag, or an empty string.
    pub fn prev_tag(&self) -> String {
        self.prev
            .as_deref()
            .map(|url| link_tag(url, "prev"))
            .unwrap_or_default()
    }

    /// Canonical, next and prev tags, one per line.
    ///
    /// Always three lines: an absent tag is an empty line, so templates that
    /// index the lines keep working on first and last pages.
    pub fn to_html(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.canonical_tag(),
            self.next_tag(),
            self.prev_tag()
        )
    }
}

fn link_tag(url: &str, rel: &str) -> String {
    format!(r#"<link href="{}" rel="{rel}" />"#, escape_html(url))
}

/// Build the canonical / next / prev links for the page described by `ctx`.
///
/// # Errors
///
/// Returns [`SeoError::InvalidArgument`] if the page size is zero.
pub fn build_link_tags<F>(ctx: &PageContext, format: &F) -> Result<LinkTagSet, SeoError>
where
    F: PageUrlFormat + ?Sized,
{
    let page_count = ctx.page_count()?;
    let page = ctx.current_page;
    let url = ctx.base_url.as_str();

    tracing::debug!(
        total_items = ctx.total_items,
        page_size = ctx.page_size,
        page,
        page_count,
        "Building paging link tags"
    );

    let canonical = if page <= 1 || page_count <= 1 {
        url.to_owned()
    } else {
        format.page_url(url, page)
    };

    let (next, prev) = if page_count <= 1 {
        (None, None)
    } else if page <= 1 {
        // First page
        (Some(format.page_url(url, 2)), None)
    } else if page < page_count {
        (
            Some(format.page_url(url, page + 1)),
            Some(format.page_url(url, page - 1)),
        )
    } else if page == page_count {
        // Last page
        (None, Some(format.page_url(url, page - 1)))
    } else {
        // Beyond the last page: nothing to chain to.
        (None, None)
    };

    Ok(LinkTagSet {
        canonical,
        next,
        prev,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::format::{QueryParamFormat, TemplateFormat};

    fn tags(total: u64, size: u32, page: u32) -> LinkTagSet {
        let ctx = PageContext::new(total, size, "/cat/general").with_page(page);
        build_link_tags(&ctx, &QueryParamFormat::default()).unwrap()
    }

    #[test]
    fn test_middle_page() {
        let result = tags(95, 10, 5);

        assert_eq!(
            result,
            LinkTagSet {
                canonical: "/cat/general?p=5".to_owned(),
                next: Some("/cat/general?p=6".to_owned()),
                prev: Some("/cat/general?p=4".to_owned()),
            }
        );
    }

    #[test]
    fn test_single_page() {
        let result = tags(5, 10, 1);

        assert_eq!(result.canonical, "/cat/general");
        assert_eq!(result.next, None);
        assert_eq!(result.prev, None);
    }

    #[test]
    fn test_empty_listing_is_single_page() {
        let ctx = PageContext::new(0, 10, "/x");

        assert_eq!(ctx.page_count().unwrap(), 1);
        assert_eq!(tags(0, 10, 1).next, None);
    }

    #[test]
    fn test_single_page_never_chains() {
        for page in 0..4 {
            let result = tags(10, 10, page);
            assert_eq!(result.next, None, "page {page}");
            assert_eq!(result.prev, None, "page {page}");
        }
        assert_eq!(tags(10, 10, 1).canonical, "/cat/general");
        assert_eq!(tags(10, 10, 0).canonical, "/cat/general");
    }

    #[test]
    fn test_single_page_canonical_is_base_url() {
        for page in [2, 3] {
            assert_eq!(tags(5, 10, page).canonical, "/cat/general", "page {page}");
        }
    }

    #[test]
    fn test_first_page_next_only() {
        let result = tags(30, 10, 1);

        assert_eq!(result.canonical, "/cat/general");
        assert_eq!(result.next.as_deref(), Some("/cat/general?p=2"));
        assert_eq!(result.prev, None);
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let result = tags(30, 10, 0);

        assert_eq!(result.canonical, "/cat/general");
        assert_eq!(result.next.as_deref(), Some("/cat/general?p=2"));
        assert_eq!(result.prev, None);
    }

    #[test]
    fn test_last_page_prev_only() {
        let result = tags(30, 10, 3);

        assert_eq!(result.canonical, "/cat/general?p=3");
        assert_eq!(result.next, None);
        assert_eq!(result.prev.as_deref(), Some("/cat/general?p=2"));
    }

    #[test]
    fn test_beyond_last_page() {
        let result = tags(30, 10, 7);

        assert_eq!(result.canonical, "/cat/general?p=7");
        assert_eq!(result.next, None);
        assert_eq!(result.prev, None);
    }

    #[test]
    fn test_interior_pages_reference_neighbours() {
        let page_count = 12;
        for page in 2..page_count {
            let result = tags(120, 10, page);
            assert_eq!(
                result.next,
                Some(format!("/cat/general?p={}", page + 1)),
                "page {page}"
            );
            assert_eq!(
                result.prev,
                Some(format!("/cat/general?p={}", page - 1)),
                "page {page}"
            );
        }
    }

    #[test]
    fn test_partial_last_page_rounds_up() {
        let ctx = PageContext::new(95, 10, "/x");

        assert_eq!(ctx.page_count().unwrap(), 10);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let ctx = PageContext::new(95, 0, "/x");

        let err = build_link_tags(&ctx, &QueryParamFormat::default()).unwrap_err();

        assert!(matches!(err, SeoError::InvalidArgument(_)));
    }

    #[test]
    fn test_custom_format() {
        let ctx = PageContext::new(50, 10, "/topics").with_page(2);
        let format = TemplateFormat::new("{url}/page/{page}").unwrap();

        let result = build_link_tags(&ctx, &format).unwrap();

        assert_eq!(result.canonical, "/topics/page/2");
        assert_eq!(result.next.as_deref(), Some("/topics/page/3"));
        assert_eq!(result.prev.as_deref(), Some("/topics/page/1"));
    }

    #[test]
    fn test_dyn_format() {
        let ctx = PageContext::new(50, 10, "/t").with_page(5);
        let format: Box<dyn PageUrlFormat> = Box::new(QueryParamFormat::new("page"));

        let result = build_link_tags(&ctx, &*format).unwrap();

        assert_eq!(result.prev.as_deref(), Some("/t?page=4"));
    }

    #[test]
    fn test_to_html_always_three_lines() {
        let html = tags(5, 10, 1).to_html();

        assert_eq!(html, "<link href=\"/cat/general\" rel=\"canonical\" />\n\n");
        assert_eq!(html.split('\n').count(), 3);
    }

    #[test]
    fn test_to_html_order() {
        let html = tags(95, 10, 5).to_html();
        let lines: Vec<&str> = html.split('\n').collect();

        assert_eq!(
            lines,
            vec![
                r#"<link href="/cat/general?p=5" rel="canonical" />"#,
                r#"<link href="/cat/general?p=6" rel="next" />"#,
                r#"<link href="/cat/general?p=4" rel="prev" />"#,
            ]
        );
    }

    #[test]
    fn test_href_is_escaped() {
        let ctx = PageContext::new(30, 10, "/search?q=a&sort=new");
        let result = build_link_tags(&ctx, &QueryParamFormat::default()).unwrap();

        assert_eq!(
            result.next_tag(),
            r#"<link href="/search?q=a&amp;sort=new&amp;p=2" rel="next" />"#
        );
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), Ok(1));
        assert_eq!(parse_page(Some("4")), Ok(4));
        assert_eq!(parse_page(Some(" 4 ")), Ok(4));
        assert!(parse_page(Some("")).is_err());
        assert!(parse_page(Some("abc")).is_err());
        assert!(parse_page(Some("-2")).is_err());
    }

    #[test]
    fn test_from_query() {
        let ctx = PageContext::from_query(95, 10, "/x", Some("5")).unwrap();
        assert_eq!(ctx.current_page, 5);

        let ctx = PageContext::from_query(95, 10, "/x", None).unwrap();
        assert_eq!(ctx.current_page, 1);

        let err = PageContext::from_query(95, 10, "/x", Some("five")).unwrap_err();
        assert!(err.to_string().contains("five"));
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("?p=2", "p"), Some("2"));
        assert_eq!(query_param("a=1&p=9&p=3", "p"), Some("9"));
        assert_eq!(query_param("page=2", "p"), None);
        assert_eq!(query_param("p", "p"), Some(""));
        assert_eq!(query_param("", "p"), None);
    }
}
