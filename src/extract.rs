use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").unwrap());
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

/// The six HTML heading levels. H1 is the most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Map a tag name ("h1".."h6") to its level.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            "h5" => Some(HeadingLevel::H5),
            "h6" => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
}

/// Extract a page's title and its headings in document order.
///
/// The heading sequence is exactly the order the elements appear in the
/// markup, interleaved across levels; it is never regrouped by level.
/// Headings whose text is empty after trimming are dropped.
pub fn extract_page(html: &str) -> (String, Vec<Heading>) {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    // select() walks the tree depth-first pre-order, i.e. document order.
    let headings = doc
        .select(&HEADING_SELECTOR)
        .filter_map(|el| {
            let level = HeadingLevel::from_tag(el.value().name())?;
            let text = collapse_text(el);
            if text.is_empty() {
                return None;
            }
            Some(Heading { level, text })
        })
        .collect();

    (title, headings)
}

/// All descendant text of an element, trimmed, with internal runs of
/// whitespace collapsed to single spaces.
fn collapse_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ──
