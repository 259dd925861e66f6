use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    config::SiteConfig,
    grouper::MergedWord,
    ordering::{BookIndex, Chapter, Verse},
};

// Shared stylesheet and hover / tap script; every page fills the single `$body$` slot
static READER_TEMPLATE: &str = include_str!("assets/reader.html");
const BODY_PLACEHOLDER: &str = "$body$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderPage {
    pub file_name: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderSite {
    /// One page per book, in book order.
    pub book_pages: Vec<ReaderPage>,
    pub index_page: ReaderPage,
}

impl ReaderSite {
    pub fn pages(&self) -> impl Iterator<Item = &ReaderPage> {
        self.book_pages.iter().chain(std::iter::once(&self.index_page))
    }
}

pub fn render_site(books: &[BookIndex], config: &SiteConfig) -> ReaderSite {
    let book_pages = books
        .iter()
        .map(|book| ReaderPage {
            file_name: config.book_file_name(&book.name),
            html: fill_template(&render_book(book)),
        })
        .collect();

    let index_page = ReaderPage {
        file_name: config.index_file_name.clone(),
        html: fill_template(&render_index(books, config)),
    };

    ReaderSite {
        book_pages,
        index_page,
    }
}

pub fn fill_template(body: &str) -> String {
    READER_TEMPLATE.replace(BODY_PLACEHOLDER, body)
}

pub fn render_book(book: &BookIndex) -> String {
    let chapters: Vec<String> = book
        .chapters
        .iter()
        .map(|chapter| render_chapter(&book.name, chapter))
        .collect();

    format!("<h1>{}</h1>\n{}", encode_text(&book.name), chapters.join("\n"))
}

fn render_chapter(book_name: &str, chapter: &Chapter) -> String {
    let verses: Vec<String> = chapter.verses.iter().map(render_verse).collect();

    format!(
        "<h1>{} {}</h1>\n{}",
        encode_text(book_name),
        encode_text(&chapter.key),
        verses.join("\n")
    )
}

fn render_verse(verse: &Verse) -> String {
    let words: Vec<String> = verse.words.iter().map(render_word).collect();

    format!(
        "<div><span class=\"vnum\">{}</span>{}</div>",
        encode_text(&verse.key),
        words.join("\n")
    )
}

pub fn render_word(word: &MergedWord) -> String {
    format!(
        r#"
    <div class="word-container">
        <span class="word">{}</span>
        <div class="data"><p>{}</p><p>{}</p><p>{}</p><p>{}</p></div>
    </div>
"#,
        encode_text(&word.vowelless_text),
        encode_text(&word.full_text),
        encode_text(&word.gloss),
        encode_text(&word.lemma),
        encode_text(&word.morph),
    )
}

pub fn render_index(books: &[BookIndex], config: &SiteConfig) -> String {
    let links: Vec<String> = books
        .iter()
        .map(|book| {
            format!(
                "<li><a href=\"{}\">{}</a></li>",
                encode_double_quoted_attribute(&config.book_file_name(&book.name)),
                encode_text(&book.name)
            )
        })
        .collect();

    format!(
        "<h1>{}</h1>\n<div><ul>{}</ul></div>",
        encode_text(&config.index_title),
        links.join("\n")
    )
}
