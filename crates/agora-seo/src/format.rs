//! Page-number URL formats.

use crate::SeoError;

/// Default name of the page-number query parameter.
pub const DEFAULT_PAGE_PARAM: &str = "p";

/// Appends a page number to a listing URL.
///
/// Implemented for closures so routing schemes other than query strings
/// (e.g. `/topics/page/3`) can be plugged in without a new type.
pub trait PageUrlFormat {
    /// URL of page `page` of the listing at `base_url`.
    fn page_url(&self, base_url: &str, page: u32) -> String;
}

impl<F> PageUrlFormat for F
where
    F: Fn(&str, u32) -> String,
{
    fn page_url(&self, base_url: &str, page: u32) -> String {
        self(base_url, page)
    }
}

/// Query-string format: `{base}?p={page}`, or `{base}&p={page}` when the
/// base URL already carries a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParamFormat {
    param: String,
}

impl Default for QueryParamFormat {
    fn default() -> Self {
        Self {
            param: DEFAULT_PAGE_PARAM.to_owned(),
        }
    }
}

impl QueryParamFormat {
    /// Use `param` as the page-number parameter name.
    #[must_use]
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }

    /// Parameter name.
    pub fn param(&self) -> &str {
        &self.param
    }
}

impl PageUrlFormat for QueryParamFormat {
    fn page_url(&self, base_url: &str, page: u32) -> String {
        let sep = if base_url.contains('?') { '&' } else { '?' };
        format!("{base_url}{sep}{}={page}", self.param)
    }
}

/// Template format with `{url}` and `{page}` placeholders.
///
/// ```
/// use agora_seo::{PageUrlFormat, TemplateFormat};
///
/// let format = TemplateFormat::new("{url}/page/{page}").unwrap();
/// assert_eq!(format.page_url("/topics", 3), "/topics/page/3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFormat {
    template: String,
}

impl TemplateFormat {
    /// Create a template format.
    ///
    /// # Errors
    ///
    /// Returns [`SeoError::InvalidArgument`] unless the template contains both
    /// `{url}` and `{page}`.
    pub fn new(template: impl Into<String>) -> Result<Self, SeoError> {
        let template = template.into();
        if !template.contains("{url}") || !template.contains("{page}") {
            return Err(SeoError::InvalidArgument(format!(
                "paging URL template {template:?} must contain {{url}} and {{page}}"
            )));
        }
        Ok(Self { template })
    }
}

impl Default for TemplateFormat {
    fn default() -> Self {
        Self {
            template: "{url}?p={page}".to_owned(),
        }
    }
}

impl PageUrlFormat for TemplateFormat {
    fn page_url(&self, base_url: &str, page: u32) -> String {
        // Page first: a base URL containing "{page}" must stay literal.
        self.template
            .replace("{page}", &page.to_string())
            .replace("{url}", base_url)
    }
}
