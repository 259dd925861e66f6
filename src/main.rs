use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::{env, path::PathBuf, process};
use tracing_subscriber::EnvFilter;

use hebrew_reader::{
    build_site_from_corpus,
    config::ReaderConfig,
    corpus::{corpus_files, extract_corpus},
    site_output::{save_report, SiteOutput},
};

fn get_args() -> Result<ReaderConfig> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = getopts::Options::new();
    opts.optflag("n", "dry-run", "render every page without writing anything");
    opts.optopt("", "report", "write the extraction report as JSON", "FILE");
    opts.optopt("", "title", "heading of the index page", "TEXT");
    opts.optopt("", "page-prefix", "file name prefix of book pages", "TEXT");
    opts.optopt("", "suffix", "suffix of corpus files (default .xml)", "TEXT");
    opts.optflag("h", "help", "print this help");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("h") {
        let brief = "Usage: hebrew-reader [options] <corpus-dir> [<output-dir>]";
        print!("{}", opts.usage(brief));
        process::exit(0);
    }

    let corpus_path = matches
        .free
        .get(0)
        .context("path to the corpus directory is required")?;

    let mut config = ReaderConfig::new(corpus_path);

    if let Some(output_path) = matches.free.get(1) {
        config.output_path = Some(PathBuf::from(output_path));
    }
    if matches.opt_present("n") {
        config.output_path = None;
    }

    config.report_path = matches.opt_str("report").map(PathBuf::from);

    if let Some(title) = matches.opt_str("title") {
        config.site.index_title = title;
    }
    if let Some(prefix) = matches.opt_str("page-prefix") {
        config.site.page_prefix = prefix;
    }
    if let Some(suffix) = matches.opt_str("suffix") {
        config.extractor.file_suffix = suffix;
    }

    Ok(config)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = get_args()?;

    ensure!(
        config.corpus_path.is_dir(),
        "Directory not found: {}",
        config.corpus_path.display()
    );

    let out = match &config.output_path {
        Some(output_path) => SiteOutput::init_directory(output_path)?,
        None => SiteOutput::Null,
    };

    tracing::info!("Processing {}...", config.corpus_path.display());

    let corpus = {
        let paths = corpus_files(&config.corpus_path, &config.extractor)?;
        let pb = create_progress_bar(paths.len() as u64);

        extract_corpus(paths.into_iter().progress_with(pb), &config.extractor)
    };

    if let Some(report_path) = &config.report_path {
        save_report(report_path, &corpus.report)?;
    }

    let site = build_site_from_corpus(&corpus, &config.site)?;

    out.save_site(&site)?;

    tracing::info!("Finished: {} books.", site.book_pages.len());

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )
        .unwrap()
        .progress_chars("#-"),
    );
    pb
}
