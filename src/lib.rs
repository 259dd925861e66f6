pub mod config;
pub mod corpus;
pub mod grouper;
pub mod mark_stripper;
pub mod ordering;
pub mod page;
pub mod reference;
pub mod site_output;
pub mod utility;

use anyhow::{Context, Result};

use crate::{
    config::SiteConfig,
    corpus::ExtractedCorpus,
    grouper::group_by_reference,
    ordering::order_books,
    page::{render_site, ReaderSite},
};

/// Everything after extraction: grouping, ordering and page rendering.
pub fn build_site_from_corpus(corpus: &ExtractedCorpus, site: &SiteConfig) -> Result<ReaderSite> {
    let grouped = group_by_reference(&corpus.words)?;
    let books = order_books(grouped).context("Failed to order chapters and verses")?;

    Ok(render_site(&books, site))
}
