use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{corpus::ExtractionReport, page::ReaderSite};

pub enum SiteOutput {
    /// Dry run: pages are rendered but never written.
    Null,
    Directory { root: PathBuf },
}

impl SiteOutput {
    pub fn init_directory(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create output directory: {}", root.display()))?;

        Ok(Self::Directory {
            root: root.to_owned(),
        })
    }

    // Book pages first, index last; stops at the first failed write
    pub fn save_site(&self, site: &ReaderSite) -> Result<()> {
        if let SiteOutput::Directory { root } = &self {
            for page in site.pages() {
                let path = root.join(&page.file_name);
                fs::write(&path, &page.html)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::debug!("Wrote {}", path.display());
            }

            tracing::info!("Wrote {} pages to {}", site.book_pages.len() + 1, root.display());
        }

        Ok(())
    }
}

pub fn save_report(path: &Path, report: &ExtractionReport) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(report)?)
        .with_context(|| format!("Failed to write report {}", path.display()))
}
