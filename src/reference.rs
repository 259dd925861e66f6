use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Location of a word, parsed from `"<book> <chapter>:<verse>[!<sub-marker>]"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub chapter: String,
    /// Verse with any `!` sub-marker cut off.
    pub verse: String,
}

impl Reference {
    // Book is everything before the first space, chapter runs up to the first
    // colon after it. Only the format is checked here; numeric keys are
    // enforced when ordering.
    pub fn parse(reference: &str) -> Result<Reference> {
        static REGEX_REFERENCE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?s)^([^ ]*) ([^:]*):([^!]*)(?:!.*)?$").unwrap());

        let captures = REGEX_REFERENCE
            .captures(reference)
            .with_context(|| format!("Invalid reference: {:?}", reference))?;

        Ok(Reference {
            book: captures[1].to_owned(),
            chapter: captures[2].to_owned(),
            verse: captures[3].to_owned(),
        })
    }
}
