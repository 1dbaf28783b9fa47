// ABOUTME: Document-query abstraction the field extractor reads listings through.
// ABOUTME: Implemented for scraper::Html; tests can substitute a fake document.

//! Document-query abstraction.
//!
//! The field extractor never touches an HTML tree directly. It asks a
//! [`ListingDocument`] for the handful of lookups a listing page needs:
//! selector text, selector attributes, multi-node selection and the
//! label-then-value traversal used for the attribute list.
//!
//! Every method is absence-tolerant. Invalid selectors behave like
//! selectors that match nothing.

use scraper::{ElementRef, Html, Selector};

use crate::extractors::compiled::get_or_compile;

/// Query capability over a parsed listing page.
pub trait ListingDocument {
    /// Trimmed text of the first element matching `selector`.
    fn first_text(&self, selector: &str) -> Option<String>;

    /// Attribute lookup on the first element matching `selector`.
    ///
    /// Returns `None` when no element matches, `Some(None)` when the
    /// element exists but lacks `attr`.
    fn first_attr(&self, selector: &str, attr: &str) -> Option<Option<String>>;

    /// Trimmed text of every element matching `selector`, in document order.
    fn all_texts(&self, selector: &str) -> Vec<String>;

    /// Finds the innermost `item_tag` element whose text contains `label`, then
    /// returns the trimmed text of the first `value_tag` element after it in
    /// document order (its own descendants come first).
    fn text_after_label(&self, item_tag: &str, label: &str, value_tag: &str) -> Option<String>;
}

/// Concatenated text of an element, trimmed at both ends.
fn trimmed_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn contains_label(el: &ElementRef<'_>, label: &str) -> bool {
    el.text().collect::<String>().contains(label)
}

/// True when a nested item below `el` also carries `label`; the nested one
/// is the real anchor.
fn has_inner_labeled_item(el: &ElementRef<'_>, items: &Selector, label: &str) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|inner| items.matches(&inner) && contains_label(&inner, label))
}

impl ListingDocument for Html {
    fn first_text(&self, selector: &str) -> Option<String> {
        let sel = get_or_compile(selector)?;
        self.select(&sel).next().map(|el| trimmed_text(&el))
    }

    fn first_attr(&self, selector: &str, attr: &str) -> Option<Option<String>> {
        let sel = get_or_compile(selector)?;
        let el = self.select(&sel).next()?;
        Some(el.value().attr(attr).map(str::to_string))
    }

    fn all_texts(&self, selector: &str) -> Vec<String> {
        match get_or_compile(selector) {
            Some(sel) => self.select(&sel).map(|el| trimmed_text(&el)).collect(),
            None => vec![],
        }
    }

    fn text_after_label(&self, item_tag: &str, label: &str, value_tag: &str) -> Option<String> {
        let items = get_or_compile(item_tag)?;
        let anchor = self.select(&items).find(|el| {
            contains_label(el, label) && !has_inner_labeled_item(el, &items, label)
        })?;

        // Pre-order traversal is document order, so everything after the
        // anchor is its subtree followed by the rest of the page.
        let anchor_id = anchor.id();
        let value = self
            .root_element()
            .descendants()
            .skip_while(|node| node.id() != anchor_id)
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == value_tag)?;

        Some(trimmed_text(&value))
    }
}
