use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

// Selectors are compile-time constants; Selector::parse only fails on
// malformed CSS, so unwrap here is safe.
static INFOBOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.infobox").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mw-parser-output > p").unwrap());
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mw-parser-output > ul li").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// One infobox row: header-cell text (lowercased for keyword matching)
/// paired with the data-cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: String,
    pub value: String,
}

/// A link found in the main content list of a page, as (href, item text).
pub type ListLink = (String, String);

/// Read-only parsed view over one article. Built once per page load and never
/// mutated; every query degrades to empty/None when the expected structure is
/// missing.
pub struct ArticleDoc {
    html: Html,
}

impl ArticleDoc {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Header/value pairs of the infobox, in document order. `None` when the
    /// page has no infobox at all (a disambiguation page, or a stub).
    pub fn infobox_rows(&self) -> Option<Vec<TableRow>> {
        let table = self.html.select(&INFOBOX).next()?;
        let mut rows = Vec::new();
        for tr in table.select(&ROW) {
            let th = tr.select(&HEADER_CELL).next();
            let td = tr.select(&DATA_CELL).next();
            if let (Some(th), Some(td)) = (th, td) {
                rows.push(TableRow {
                    label: element_text(th).to_lowercase(),
                    value: element_text(td),
                });
            }
        }
        Some(rows)
    }

    /// Text of the top-level paragraphs of the article body, in order.
    pub fn paragraphs(&self) -> Vec<String> {
        self.html.select(&PARAGRAPH).map(element_text).collect()
    }

    pub fn full_text(&self) -> String {
        element_text(self.html.root_element())
    }

    /// Links from the main content list, skipping items whose first hyperlink
    /// is an in-page fragment and items with no hyperlink at all.
    pub fn list_links(&self) -> Vec<ListLink> {
        self.html
            .select(&LIST_ITEM)
            .filter_map(|item| {
                let a = item.select(&LINK).next()?;
                let href = a.value().attr("href")?;
                if href.starts_with('#') {
                    return None;
                }
                Some((href.to_string(), element_text(item)))
            })
            .collect()
    }
}

/// Concatenated text content with runs of whitespace collapsed to single
/// spaces, matching how the wiki markup reads when rendered.
fn element_text(el: ElementRef<'_>) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
