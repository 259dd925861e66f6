use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{corpus::TaggedWord, mark_stripper::strip_hebrew_marks, reference::Reference};

/// All tagged words sharing one reference, merged into a single displayed word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedWord {
    pub vowelless_text: String,
    pub full_text: String,
    pub lemma: String,
    pub gloss: String,
    pub morph: String,
}

impl MergedWord {
    pub fn merge(parts: &[TaggedWord]) -> MergedWord {
        let full_text: String = parts.iter().map(|p| p.text.as_str()).collect();

        MergedWord {
            vowelless_text: strip_hebrew_marks(&full_text),
            lemma: join_annotations(parts.iter().map(|p| p.lemma.as_str())),
            gloss: join_annotations(parts.iter().map(|p| p.gloss.as_str())),
            morph: join_annotations(parts.iter().map(|p| p.morph.as_str())),
            full_text,
        }
    }
}

// "in the" + "beginning" -> "in+the+beginning"
fn join_annotations<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .replace(' ', "+")
}

pub type VerseGroups = IndexMap<String, Vec<MergedWord>>;
pub type ChapterGroups = IndexMap<String, VerseGroups>;

/// book -> chapter -> verse -> words, every level in first-encounter order.
pub type GroupedBooks = IndexMap<String, ChapterGroups>;

pub fn group_by_reference(words: &IndexMap<String, Vec<TaggedWord>>) -> Result<GroupedBooks> {
    let mut books = GroupedBooks::new();

    for (reference, parts) in words {
        let Reference {
            book,
            chapter,
            verse,
        } = Reference::parse(reference).context("Failed to group corpus words")?;

        // Each level is created on first sight of its key and reused afterwards
        books
            .entry(book)
            .or_insert_with(ChapterGroups::new)
            .entry(chapter)
            .or_insert_with(VerseGroups::new)
            .entry(verse)
            .or_insert_with(Vec::new)
            .push(MergedWord::merge(parts));
    }

    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, reference: &str) -> TaggedWord {
        TaggedWord {
            text: text.to_owned(),
            reference: reference.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn joins_annotations_with_plus() {
        let parts = vec![
            TaggedWord {
                gloss: " in the ".to_owned(),
                lemma: "H9003".to_owned(),
                ..word("בְּ", "Gen 1:1")
            },
            TaggedWord {
                gloss: "beginning".to_owned(),
                morph: "HNcfsa".to_owned(),
                ..word("רֵאשִׁית", "Gen 1:1")
            },
        ];

        let merged = MergedWord::merge(&parts);
        assert_eq!(merged.full_text, "בְּרֵאשִׁית");
        assert_eq!(merged.vowelless_text, "בראשית");
        assert_eq!(merged.gloss, "in+the++beginning");
        assert_eq!(merged.lemma, "H9003");
        assert_eq!(merged.morph, "HNcfsa");
    }

    #[test]
    fn groups_by_book_chapter_and_truncated_verse() {
        let mut words = IndexMap::new();
        for (reference, text) in [
            ("Gen 1:1!1", "בְּ"),
            ("Gen 1:1!2", "רֵאשִׁית"),
            ("Exod 1:1", "וְ"),
            ("Gen 1:2", "הָ"),
        ] {
            words
                .entry(reference.to_owned())
                .or_insert_with(Vec::new)
                .push(word(text, reference));
        }

        let books = group_by_reference(&words).unwrap();
        assert_eq!(books.keys().collect::<Vec<_>>(), vec!["Gen", "Exod"]);

        let genesis = &books["Gen"]["1"];
        assert_eq!(genesis.keys().collect::<Vec<_>>(), vec!["1", "2"]);
        let first_verse: Vec<_> = genesis["1"].iter().map(|w| w.vowelless_text.as_str()).collect();
        assert_eq!(first_verse, vec!["ב", "ראשית"]);
    }

    #[test]
    fn malformed_reference_fails() {
        let mut words = IndexMap::new();
        words.insert("Gen1".to_owned(), vec![word("א", "Gen1")]);
        assert!(group_by_reference(&words).is_err());
    }

    #[test]
    fn empty_annotations_stay_empty() {
        let merged = MergedWord::merge(&[word("א", "Gen 1:1"), word("ב", "Gen 1:1")]);
        assert_eq!(merged.gloss, "");
        assert_eq!(merged.lemma, "");
        assert_eq!(merged.morph, "");
    }
}
