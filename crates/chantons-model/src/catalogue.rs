use serde::{Deserialize, Serialize};

use crate::lyrics::Lyrics;

/// One row of a catalogue search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Numeric catalogue identifier, taken from the row's `#detail-<n>` toggle.
    pub id: String,
    pub title: String,
    /// Inline details line (typically author and composer).
    pub details: String,
    /// Catalogue classification code (e.g., "A 12-34").
    pub code: String,
}

/// Attribution metadata printed on a song's detail page.
///
/// Every field is optional on the catalogue side; absent labels yield
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(rename = "auteur")]
    pub author: String,
    #[serde(rename = "compositeur")]
    pub composer: String,
    #[serde(rename = "editeur")]
    pub editor: String,
    /// SECLI classification ("Cote Secli").
    #[serde(rename = "cote")]
    pub catalogue_class: String,
}

/// A song as returned by `GET /chant/:id`.
///
/// Serializes to `{id, nom, refrain, couplet, auteur, compositeur, editeur, cote}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    pub id: String,
    /// Song title with any trailing " - CODE" suffix removed.
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(flatten)]
    pub lyrics: Lyrics,
    #[serde(flatten)]
    pub attribution: Attribution,
}
