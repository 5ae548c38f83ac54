use chantons_model::Attribution;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

use crate::markup::{Extract, Field};

static HEADING: LazyLock<Field> = LazyLock::new(|| Field::new("h1", Extract::Text));
static BLOCKS: LazyLock<Field> = LazyLock::new(|| Field::new("div", Extract::Text));
static LYRICS: LazyLock<Field> = LazyLock::new(|| Field::new("p.py-4", Extract::Lines));

// Letter prefix, optional space or hyphen, then a digit-led body with
// optional hyphenated parts: "E9", "K 180", "A 12-34", "AL-20-11".
static CODE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+-\s+[A-Z]{1,3}[ -]?\d[\dA-Z]*(?:-[\dA-Z]+)*$").expect("valid regex")
});

const AUTHOR_LABEL: &str = "Auteur :";
const COMPOSER_LABEL: &str = "Compositeur :";
const EDITOR_LABEL: &str = "Editeur :";
const CLASS_LABEL: &str = "Cote Secli :";

/// What a song detail page yields before lyric segmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPage {
    pub name: String,
    pub attribution: Attribution,
    /// Lyric paragraph with `<br>` turned into newlines.
    pub lyrics_text: String,
}

/// Parse a song detail page. Missing pieces come back empty.
pub fn extract_detail(html: &str) -> DetailPage {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let name = HEADING
        .first(root)
        .map(|h| strip_code_suffix(&h).to_string())
        .unwrap_or_default();

    let attribution = Attribution {
        author: labelled_value(root, AUTHOR_LABEL),
        composer: labelled_value(root, COMPOSER_LABEL),
        editor: labelled_value(root, EDITOR_LABEL),
        catalogue_class: labelled_value(root, CLASS_LABEL),
    };

    let lyrics_text = LYRICS.first(root).unwrap_or_default();

    tracing::debug!(
        name = %name,
        lyric_bytes = lyrics_text.len(),
        "Parsed detail page"
    );

    DetailPage {
        name,
        attribution,
        lyrics_text,
    }
}

/// Remove a trailing " - CODE" catalogue suffix from a title.
pub fn strip_code_suffix(title: &str) -> &str {
    match CODE_SUFFIX.find(title) {
        Some(m) => title[..m.start()].trim_end(),
        None => title,
    }
}

/// Find the block whose text starts with `label` and return what follows.
///
/// Nested blocks all start with the same text, so the shortest (innermost)
/// match wins.
fn labelled_value(root: ElementRef<'_>, label: &str) -> String {
    BLOCKS
        .all(root)
        .into_iter()
        .filter(|text| text.starts_with(label))
        .min_by_key(|text| text.len())
        .map(|text| text[label.len()..].trim().to_string())
        .unwrap_or_default()
}
