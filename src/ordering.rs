use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    grouper::{GroupedBooks, MergedWord},
    utility::{parse_number, KeyNumber},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookIndex {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub key: String,
    pub number: KeyNumber,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    pub key: String,
    pub number: KeyNumber,
    pub words: Vec<MergedWord>,
}

// Books stay in encounter order. Chapters and verses are sorted by numeric key;
// the sort is stable, so keys with the same value ("1", "01") keep encounter order.
pub fn order_books(books: GroupedBooks) -> Result<Vec<BookIndex>> {
    let mut ordered = Vec::with_capacity(books.len());

    for (name, chapter_groups) in books {
        let mut chapters = Vec::with_capacity(chapter_groups.len());

        for (chapter_key, verse_groups) in chapter_groups {
            let number = parse_number(&chapter_key)
                .with_context(|| format!("Invalid chapter in {}: {:?}", name, chapter_key))?;

            let mut verses = Vec::with_capacity(verse_groups.len());
            for (verse_key, words) in verse_groups {
                let verse_number = parse_number(&verse_key).with_context(|| {
                    format!(
                        "Invalid verse in {} {}: {:?}",
                        name, chapter_key, verse_key
                    )
                })?;

                verses.push(Verse {
                    key: verse_key,
                    number: verse_number,
                    words,
                });
            }
            verses.sort_by(|a, b| a.number.cmp(&b.number));

            chapters.push(Chapter {
                key: chapter_key,
                number,
                verses,
            });
        }
        chapters.sort_by(|a, b| a.number.cmp(&b.number));

        ordered.push(BookIndex { name, chapters });
    }

    Ok(ordered)
}
