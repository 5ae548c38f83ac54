use chantons_model::SearchResult;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::markup::{Extract, Field};

static ROW: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".d-flex.justify-content-between.align-items-center.py-2.border-top")
        .expect("valid selector")
});
static TITLE: LazyLock<Field> =
    LazyLock::new(|| Field::new(".flex-grow-1 .d-flex > div", Extract::OwnText));
static DETAILS: LazyLock<Field> = LazyLock::new(|| Field::new(".small.d-inline", Extract::Text));
static CODE: LazyLock<Field> = LazyLock::new(|| Field::new("strong", Extract::Text));
static DETAIL_TOGGLE: LazyLock<Field> =
    LazyLock::new(|| Field::new("button[data-bs-target]", Extract::Attr("data-bs-target")));

static DETAIL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#detail-(\d+)").expect("valid regex"));

/// Parse a search results page into result rows, in page order.
///
/// Rows without a `#detail-<n>` toggle (section headers, decorative rows)
/// are skipped.
pub fn extract_results(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut results = Vec::new();
    for (index, row) in root.select(&ROW).enumerate() {
        let Some(id) = DETAIL_TOGGLE
            .first(row)
            .and_then(|target| parse_detail_id(&target))
        else {
            tracing::debug!(row = index, "Skipping row without detail reference");
            continue;
        };

        results.push(SearchResult {
            id,
            title: TITLE.first(row).unwrap_or_default(),
            details: DETAILS.joined(row),
            code: CODE.joined(row),
        });
    }

    results
}

fn parse_detail_id(target: &str) -> Option<String> {
    DETAIL_ID.captures(target).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r##"
    <html><body>
    <div class="results">
      <div class="d-flex justify-content-between align-items-center py-2 border-top">
        <div class="flex-grow-1">
          <div class="d-flex">
            <div>Peuple de Dieu, marche joyeux
              <span class="badge bg-secondary">MP3</span>
            </div>
          </div>
          <div class="small d-inline">Jean Servel / Jean-Paul Lécot</div>
          <strong>K 180</strong>
        </div>
        <button type="button" data-bs-toggle="collapse" data-bs-target="#detail-4512">+</button>
      </div>
      <div class="d-flex justify-content-between align-items-center py-2 border-top">
        <div class="flex-grow-1">
          <div class="d-flex"><div>Chants de l'Avent</div></div>
        </div>
      </div>
      <div class="d-flex justify-content-between align-items-center py-2 border-top">
        <div class="flex-grow-1">
          <div class="d-flex"><div>Venez, divin Messie</div></div>
          <div class="small d-inline">Abbé Pellegrin</div>
          <strong>E 9</strong>
        </div>
        <button data-bs-target="#detail-88">+</button>
      </div>
    </div>
    </body></html>
    "##;

    #[test]
    fn test_extract_results() {
        let results = extract_results(RESULTS_PAGE);
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].id, "4512");
        assert_eq!(results[0].title, "Peuple de Dieu, marche joyeux");
        assert_eq!(results[0].details, "Jean Servel / Jean-Paul Lécot");
        assert_eq!(results[0].code, "K 180");

        assert_eq!(results[1].id, "88");
        assert_eq!(results[1].title, "Venez, divin Messie");
    }

    #[test]
    fn test_row_without_reference_skipped() {
        let html = r##"
        <div class="d-flex justify-content-between align-items-center py-2 border-top">
          <div class="flex-grow-1"><div class="d-flex"><div>Avec</div></div></div>
          <button data-bs-target="#detail-7">+</button>
        </div>
        <div class="d-flex justify-content-between align-items-center py-2 border-top">
          <div class="flex-grow-1"><div class="d-flex"><div>Sans</div></div></div>
          <button data-bs-target="#collapse-menu">+</button>
        </div>
        "##;

        let results = extract_results(html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "7");
        assert_eq!(results[0].title, "Avec");
        assert_eq!(results[0].details, "");
        assert_eq!(results[0].code, "");
    }

    #[test]
    fn test_empty_page() {
        assert!(extract_results("").is_empty());
        assert!(extract_results("<html><body><p>Aucun résultat</p></body></html>").is_empty());
    }

    #[test]
    fn test_parse_detail_id() {
        assert_eq!(parse_detail_id("#detail-123").as_deref(), Some("123"));
        assert_eq!(parse_detail_id("#detail-"), None);
        assert_eq!(parse_detail_id("#other-123"), None);
    }
}
