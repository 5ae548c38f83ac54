// Line classification for lyric text.
//
// Each line gets exactly one tag, decided by the first matching rule:
// metadata, refrain marker, verse marker, then plain content. The
// function looks at one line only; ordering context lives in `segment`.

use regex::Regex;
use std::sync::LazyLock;

/// Classification tag for a single lyric line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Attribution or footer line (credits, catalogue reference, publisher).
    Metadata,
    /// "R." or "REFRAIN" marker; `rest` is the text following the marker.
    RefrainMarker { rest: &'a str },
    /// Verse number ("3" or "3."); `rest` is the text following "3.".
    CoupletMarker { rest: &'a str },
    /// Sung text.
    Content,
}

// A refrain number is only consumed when a separator or the end of the
// line follows it; "R. 3 fois Alléluia" keeps its lyric.
static REFRAIN_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:r\.|refrain\b)\s*(?:\d+\s*(?:[.:\-–]|$))?\s*[.:\-–]?\s*(.*)$")
        .expect("valid regex")
});

static COUPLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\s*(.*))?$").expect("valid regex"));

static CATALOGUE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bn[o°]\s*\.?\s*\d+\s*-\s*\d+").expect("valid regex"));

static CREDIT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:paroles|texte|musique|auteur|compositeur|[eé]diteur|traduction|harmonisation)\s*:",
    )
    .expect("valid regex")
});

/// Lowercase fragments identifying publisher and rights footers.
const PUBLISHERS: &[&str] = &[
    "paroles et musique",
    "studio sm",
    "adf-musique",
    "adf musique",
    "bayard liturgie",
    "éditions de l'emmanuel",
    "editions de l'emmanuel",
    "éditions de l’emmanuel",
    "fleurus",
    "secli",
    "droits réservés",
];

/// Classify one trimmed lyric line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if is_metadata(line) {
        return LineKind::Metadata;
    }

    if let Some(caps) = REFRAIN_MARKER.captures(line) {
        let rest = caps.get(1).map_or("", |m| m.as_str().trim());
        return LineKind::RefrainMarker { rest };
    }

    if let Some(caps) = COUPLET_MARKER.captures(line) {
        let rest = caps.get(1).map_or("", |m| m.as_str().trim());
        return LineKind::CoupletMarker { rest };
    }

    LineKind::Content
}

fn is_metadata(line: &str) -> bool {
    if CATALOGUE_REFERENCE.is_match(line) || CREDIT_LABEL.is_match(line) {
        return true;
    }

    let lower = line.to_lowercase();
    PUBLISHERS.iter().any(|p| lower.contains(p))
}
