//! `agora links` command implementation.

use std::path::Path;

use agora_config::{Config, SeoConfig};
use agora_seo::{
    PageContext, PageUrlFormat, QueryParamFormat, TemplateFormat, build_link_tags, query_param,
};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    /// Total number of items in the listing.
    #[arg(long)]
    total: u64,

    /// Items per page.
    #[arg(long)]
    page_size: u32,

    /// Current page (default: read from the URL, else 1).
    #[arg(long)]
    page: Option<String>,

    /// URL of the listing as requested.
    #[arg(long)]
    url: String,

    /// Print the link URLs as JSON instead of HTML tags.
    #[arg(long)]
    json: bool,
}

impl LinksArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, None)?;

        let (base_url, url_page) = split_page_param(&self.url, &config.seo.page_param);
        let page = self.page.as_deref().or(url_page.as_deref());
        let ctx = PageContext::from_query(self.total, self.page_size, base_url, page)?;

        let format = page_format(&config.seo)?;
        let tags = build_link_tags(&ctx, &*format)?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&tags)?);
        } else {
            output.result(&tags.to_html());
        }
        Ok(())
    }
}

/// URL format for page links.
///
/// A template of the form `{url}?<param>={page}` is served by
/// [`QueryParamFormat`] so base URLs that already carry a query string
/// stay well-formed.
fn page_format(seo: &SeoConfig) -> Result<Box<dyn PageUrlFormat>, CliError> {
    let template = seo.paging_url_format();
    if template == format!("{{url}}?{}={{page}}", seo.page_param) {
        return Ok(Box::new(QueryParamFormat::new(seo.page_param.as_str())));
    }
    Ok(Box::new(TemplateFormat::new(template)?))
}

/// Split the page parameter off a requested URL.
///
/// Returns the URL without `param` and the page value it carried, if any.
fn split_page_param(url: &str, param: &str) -> (String, Option<String>) {
    let Some((path, query)) = url.split_once('?') else {
        return (url.to_owned(), None);
    };

    let page = query_param(query, param).map(str::to_owned);
    let rest: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split_once('=').map_or(*pair, |(key, _)| key) != param)
        .collect();

    if rest.is_empty() {
        (path.to_owned(), page)
    } else {
        (format!("{path}?{}", rest.join("&")), page)
    }
}
