use scraper::{ElementRef, Html, Selector};

// Markup-shape assumptions about the platform's post pages are confined to
// these selectors.
const TITLE: &str = "h1.post-title";
const SUBTITLE: &str = "h3.subtitle";
const PAYWALL_MARKER: &str = "h2.paywall-title";
const MAIN_CONTENT: &str = "div.available-content";
const LIKE_LABEL: &str = "a.post-ufi-button .label";
const PUBLISH_DATE: &str = "div.pencraft.pc-display-flex.pc-gap-4.pc-reset";

/// Typed view over one parsed post page.
pub struct PostDocument {
    doc: Html,
}

impl PostDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// The platform renders a dedicated notice heading for gated posts.
    pub fn has_paywall_marker(&self) -> bool {
        self.select_first(PAYWALL_MARKER).is_some()
    }

    pub fn find_title(&self) -> Option<String> {
        self.text_of(TITLE)
    }

    pub fn find_subtitle(&self) -> Option<String> {
        self.text_of(SUBTITLE)
    }

    /// Engagement counter, rendered as a label like "1,234".
    pub fn find_like_count(&self) -> Option<u32> {
        self.text_of(LIKE_LABEL)
            .and_then(|label| label.replace(',', "").parse().ok())
    }

    pub fn find_publish_date(&self) -> Option<String> {
        self.text_of(PUBLISH_DATE)
    }

    /// Inner HTML of the main content region, when present.
    pub fn find_main_content(&self) -> Option<String> {
        self.select_first(MAIN_CONTENT)
            .map(|node| node.inner_html())
    }

    fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let sel = Selector::parse(selector).ok()?;
        self.doc.select(&sel).next()
    }

    fn text_of(&self, selector: &str) -> Option<String> {
        self.select_first(selector)
            .map(|node| node.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }
}
