//! Parsed-document capability contract
//!
//! Extractors never see a concrete HTML library. They query whatever implements
//! [`ParsedDocument`]; the `scraper` adapter below is the one shipped here.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractError, ExtractResult};

/// One element of a parsed document.
pub trait DocumentNode: Sized {
    /// Concatenated text of all descendants, unmodified.
    fn text_content(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Next following sibling element with the given tag name, skipping text
    /// nodes and other elements in between.
    fn next_sibling_tagged(&self, tag: &str) -> Option<Self>;

    /// The immediately following sibling, if it is a text node.
    fn next_text(&self) -> Option<String>;
}

/// Read-only tree queried by CSS selector.
pub trait ParsedDocument {
    type Node<'a>: DocumentNode
    where
        Self: 'a;

    /// All matches in document order.
    fn query<'a>(&'a self, selector: &str) -> ExtractResult<Vec<Self::Node<'a>>>;

    fn first<'a>(&'a self, field: &str, selector: &str) -> ExtractResult<Self::Node<'a>> {
        self.nth(field, selector, 0)
    }

    fn nth<'a>(
        &'a self,
        field: &str,
        selector: &str,
        index: usize,
    ) -> ExtractResult<Self::Node<'a>> {
        self.query(selector)?
            .into_iter()
            .nth(index)
            .ok_or_else(|| ExtractError::shape_mismatch(field, selector))
    }

    fn count(&self, selector: &str) -> ExtractResult<usize> {
        Ok(self.query(selector)?.len())
    }

    fn exists(&self, selector: &str) -> ExtractResult<bool> {
        Ok(!self.query(selector)?.is_empty())
    }

    /// First match whose text contains `needle`. CSS has no `:contains`, so the
    /// filter runs over the selector's matches.
    fn first_containing<'a>(
        &'a self,
        field: &str,
        selector: &str,
        needle: &str,
    ) -> ExtractResult<Self::Node<'a>> {
        self.query(selector)?
            .into_iter()
            .find(|node| node.text_content().contains(needle))
            .ok_or_else(|| {
                ExtractError::shape_mismatch(field, &format!("{selector}:contains('{needle}')"))
            })
    }
}

impl DocumentNode for ElementRef<'_> {
    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(String::from)
    }

    fn next_sibling_tagged(&self, tag: &str) -> Option<Self> {
        self.next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == tag)
    }

    fn next_text(&self) -> Option<String> {
        let sibling = self.next_sibling()?;
        sibling.value().as_text().map(|text| String::from(&**text))
    }
}

impl ParsedDocument for Html {
    type Node<'a> = ElementRef<'a>;

    fn query<'a>(&'a self, selector: &str) -> ExtractResult<Vec<ElementRef<'a>>> {
        let compiled = Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Html::select(self, &compiled).collect())
    }
}

/// Parse a full HTML page with the bundled adapter.
pub fn parse_html(html: &str) -> Html {
    Html::parse_document(html)
}
