use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

/// Where words live in the corpus files and what they are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub file_suffix: String,
    pub word_tag: String,
    pub gloss_attribute: String,
    pub lemma_attribute: String,
    pub morph_attribute: String,
    pub reference_attribute: String,
}

impl Default for ExtractorConfig {
    // macula-hebrew "lowfat" trees
    fn default() -> Self {
        ExtractorConfig {
            file_suffix: ".xml".to_owned(),
            word_tag: "w".to_owned(),
            gloss_attribute: "english".to_owned(),
            lemma_attribute: "stronglemma".to_owned(),
            morph_attribute: "morph".to_owned(),
            reference_attribute: "ref".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub index_title: String,
    pub page_prefix: String,
    pub index_file_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            index_title: "Hebrew Bible reader without vowels".to_owned(),
            page_prefix: "Hebrew-reader-".to_owned(),
            index_file_name: "index.html".to_owned(),
        }
    }
}

impl SiteConfig {
    // Book names come straight from the corpus; separators and characters
    // invalid in file names become '_' so every page stays in the output root
    pub fn book_file_name(&self, book: &str) -> String {
        static REGEX_UNSAFE_FILE_CHAR: Lazy<Regex> =
            Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap());

        let book = REGEX_UNSAFE_FILE_CHAR.replace_all(book, "_");
        format!("{}{}.html", self.page_prefix, book)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    pub corpus_path: PathBuf,
    /// `None` runs everything without writing pages.
    pub output_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub extractor: ExtractorConfig,
    pub site: SiteConfig,
}

impl ReaderConfig {
    pub fn new(corpus_path: impl Into<PathBuf>) -> Self {
        ReaderConfig {
            corpus_path: corpus_path.into(),
            output_path: Some(PathBuf::from("docs")),
            report_path: None,
            extractor: ExtractorConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_file_name_uses_prefix() {
        let config = SiteConfig::default();
        assert_eq!(config.book_file_name("Gen"), "Hebrew-reader-Gen.html");
        assert_eq!(config.book_file_name("1Sam"), "Hebrew-reader-1Sam.html");
    }

    #[test]
    fn book_file_name_never_leaves_output_root() {
        let config = SiteConfig {
            page_prefix: String::new(),
            ..SiteConfig::default()
        };

        for book in ["../x", "a/b", "a\\b", "/etc/passwd", "c:x"] {
            let name = config.book_file_name(book);
            assert!(!name.contains(['/', '\\', ':']), "{}", name);
        }
        assert_eq!(config.book_file_name("../x"), ".._x.html");
    }
}
