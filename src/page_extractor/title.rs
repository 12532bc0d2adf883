//! Title extraction from raw HTML

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::utils::NO_TITLE;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("TITLE_SELECTOR: hardcoded selector is valid")
});

/// Text of the first `<title>` element, trimmed.
///
/// Falls back to `"No Title"` when the page has no title or only whitespace in it.
#[must_use]
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}
