//! XML result artifacts and `XPath` selectors
//!
//! [`XmlDocument`] owns a parsed artifact; [`XmlDocument::selector`] hands out an
//! [`XPathSelector`] implementing [`Selector`](crate::evaluation::Selector) on top of it.

mod xml_document;
mod xpath_selector;

pub use xml_document::XmlDocument;
pub use xpath_selector::XPathSelector;
