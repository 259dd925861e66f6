use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, ensure, Context, Result};
use indexmap::IndexMap;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use serde::Serialize;

use crate::config::ExtractorConfig;

/// One `<w>` element of a corpus file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedWord {
    pub gloss: String,
    pub lemma: String,
    pub morph: String,
    pub reference: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "status")]
pub enum FileOutcome {
    #[serde(rename_all = "camelCase")]
    Parsed { path: PathBuf, word_count: usize },
    Failed { path: PathBuf, reason: String },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Parsed { path, .. } | FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub files: Vec<FileOutcome>,
    pub word_count: usize,
}

impl ExtractionReport {
    pub fn parsed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| !f.is_failed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.is_failed())
    }
}

#[derive(Debug)]
pub struct ExtractedCorpus {
    /// Raw reference string -> words carrying it, both in encounter order.
    pub words: IndexMap<String, Vec<TaggedWord>>,
    pub report: ExtractionReport,
}

// Non-recursive; sorted by file name so that words sharing a reference across
// files always merge in the same order
pub fn corpus_files(dir: &Path, config: &ExtractorConfig) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read corpus directory: {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        let is_corpus_file = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(&config.file_suffix))
            .unwrap_or(false);
        if is_corpus_file && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths)
}

pub struct CorpusBuilder<'a> {
    config: &'a ExtractorConfig,
    words: IndexMap<String, Vec<TaggedWord>>,
    report: ExtractionReport,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(config: &'a ExtractorConfig) -> Self {
        CorpusBuilder {
            config,
            words: IndexMap::new(),
            report: ExtractionReport::default(),
        }
    }

    // A file that cannot be read or parsed is recorded and skipped as a whole
    pub fn add_file(&mut self, path: &Path) {
        let parsed = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .and_then(|xml| parse_words_xml(&xml, self.config));

        let outcome = match parsed {
            Ok(words) => {
                tracing::debug!("{}: {} words", path.display(), words.len());
                let word_count = words.len();
                self.add_words(words);
                FileOutcome::Parsed {
                    path: path.to_owned(),
                    word_count,
                }
            }
            Err(err) => {
                tracing::warn!("Error processing {}: {:#}", path.display(), err);
                FileOutcome::Failed {
                    path: path.to_owned(),
                    reason: format!("{:#}", err),
                }
            }
        };

        self.report.files.push(outcome);
    }

    pub fn add_words(&mut self, words: Vec<TaggedWord>) {
        for word in words {
            if word.reference.is_empty() {
                continue;
            }

            self.report.word_count += 1;
            self.words
                .entry(word.reference.clone())
                .or_insert_with(Vec::new)
                .push(word);
        }
    }

    pub fn finish(self) -> ExtractedCorpus {
        ExtractedCorpus {
            words: self.words,
            report: self.report,
        }
    }
}

/// Extracts the given corpus files in order, usually those of [`corpus_files`].
///
/// Never fails as a whole: unreadable or malformed files end up in the report.
pub fn extract_corpus<I>(paths: I, config: &ExtractorConfig) -> ExtractedCorpus
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut builder = CorpusBuilder::new(config);
    for path in paths {
        builder.add_file(&path);
    }

    let corpus = builder.finish();
    tracing::info!(
        "Extracted {} words under {} references from {} files ({} failed)",
        corpus.report.word_count,
        corpus.words.len(),
        corpus.report.files.len(),
        corpus.report.failed().count()
    );

    corpus
}

// Open element; `word` points into the collected words while the element is a word tag
struct Frame {
    name: String,
    word: Option<usize>,
    before_first_child: bool,
}

/// Collects every word element below the root, in document order.
///
/// Only the text ahead of a word's first child element counts as its text,
/// and whitespace-only text is dropped. Words without a reference are skipped.
pub fn parse_words_xml(xml: &str, config: &ExtractorConfig) -> Result<Vec<TaggedWord>> {
    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));

    let mut words = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut seen_root = false;

    let mut buf = Vec::new();
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .with_context(|| format!("XML error at byte {}", reader.buffer_position()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if frames.is_empty() {
                    ensure!(!seen_root, "Content after the root element");
                    seen_root = true;
                }

                let word = if !frames.is_empty() && e.name().as_ref() == config.word_tag.as_bytes()
                {
                    words.push(read_word_attributes(e, config)?);
                    Some(words.len() - 1)
                } else {
                    None
                };

                if let Some(parent) = frames.last_mut() {
                    parent.before_first_child = false;
                }

                if matches!(event, Event::Start(_)) {
                    frames.push(Frame {
                        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        word,
                        before_first_child: true,
                    });
                }
            }

            Event::End(_) => {
                frames.pop();
            }

            Event::Text(ref e) => {
                let text = e.unescape().context("Invalid text content")?;
                match frames.last() {
                    Some(Frame {
                        word: Some(i),
                        before_first_child: true,
                        ..
                    }) => words[*i].text.push_str(&text),
                    Some(_) => {}
                    None => {
                        ensure!(
                            text.trim().is_empty(),
                            "Text outside the root element: {:?}",
                            text.trim()
                        );
                    }
                }
            }

            Event::CData(ref e) => {
                if let Some(Frame {
                    word: Some(i),
                    before_first_child: true,
                    ..
                }) = frames.last()
                {
                    let text = std::str::from_utf8(e).context("Invalid CDATA content")?;
                    words[*i].text.push_str(text);
                }
            }

            Event::Eof => break,

            _ => {}
        }

        buf.clear();
    }

    if let Some(frame) = frames.last() {
        bail!("Unclosed element <{}>", frame.name);
    }
    ensure!(seen_root, "No root element");

    Ok(words
        .into_iter()
        .filter(|w| !w.reference.is_empty())
        .map(|mut w| {
            if w.text.trim().is_empty() {
                w.text.clear();
            }
            w
        })
        .collect())
}

fn read_word_attributes(element: &BytesStart, config: &ExtractorConfig) -> Result<TaggedWord> {
    let mut word = TaggedWord::default();

    for attribute in element.attributes() {
        let attribute = attribute.context("Invalid attribute")?;
        let key = attribute.key.as_ref();

        let field = if key == config.gloss_attribute.as_bytes() {
            &mut word.gloss
        } else if key == config.lemma_attribute.as_bytes() {
            &mut word.lemma
        } else if key == config.morph_attribute.as_bytes() {
            &mut word.morph
        } else if key == config.reference_attribute.as_bytes() {
            &mut word.reference
        } else {
            continue;
        };

        *field = attribute
            .unescape_value()
            .context("Invalid attribute value")?
            .into_owned();
    }

    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<Vec<TaggedWord>> {
        parse_words_xml(xml, &ExtractorConfig::default())
    }

    #[test]
    fn reads_attributes_and_text() {
        let words = parse(
            r#"<book><sentence>
                <w ref="GEN 1:1!1" english="in" stronglemma="H9003" morph="HR">בְּ</w>
                <w ref="GEN 1:1!2" english="beginning" morph="HNcfsa">רֵאשִׁ֖ית</w>
            </sentence></book>"#,
        )
        .unwrap();

        assert_eq!(
            words,
            vec![
                TaggedWord {
                    gloss: "in".to_owned(),
                    lemma: "H9003".to_owned(),
                    morph: "HR".to_owned(),
                    reference: "GEN 1:1!1".to_owned(),
                    text: "בְּ".to_owned(),
                },
                TaggedWord {
                    gloss: "beginning".to_owned(),
                    lemma: "".to_owned(),
                    morph: "HNcfsa".to_owned(),
                    reference: "GEN 1:1!2".to_owned(),
                    text: "רֵאשִׁ֖ית".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn skips_words_without_reference() {
        let words = parse(r#"<book><w ref="Gen 1:1">א</w><w>ב</w><w ref="">ג</w></book>"#).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "א");
    }

    #[test]
    fn text_is_only_leading_direct_text() {
        let words = parse(
            r#"<book><w ref="Gen 1:1">a&amp;b<x>inner</x>tail</w><w ref="Gen 1:2">
                </w><w ref="Gen 1:3"/></book>"#,
        )
        .unwrap();

        assert_eq!(words[0].text, "a&b");
        assert_eq!(words[1].text, "");
        assert_eq!(words[2].text, "");
    }

    #[test]
    fn nested_words_are_all_collected() {
        let words =
            parse(r#"<book><w ref="Gen 1:1">a<w ref="Gen 1:2">b</w></w></book>"#).unwrap();
        let refs: Vec<_> = words.iter().map(|w| w.reference.as_str()).collect();
        assert_eq!(refs, vec!["Gen 1:1", "Gen 1:2"]);
        assert_eq!(words[0].text, "a");
        assert_eq!(words[1].text, "b");
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(parse(r#"<book><w ref="Gen 1:1">a</book>"#).is_err());
        assert!(parse(r#"<book><w ref="Gen 1:1">a</w>"#).is_err());
        assert!(parse("").is_err());
        assert!(parse("<a/><b/>").is_err());
        assert!(parse("<a/>junk").is_err());
    }
}
