//! Lianmai HTML Parser
//!
//! HTML5 parsing built on html5ever. Markup is parsed into html5ever's
//! `RcDom` and then copied into the arena-based [`lm_dom::Document`].

mod parser;

pub use lm_dom::Document;
pub use parser::HtmlParser;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string, recording the URL it was loaded from
pub fn parse_with_url(html: &str, url: &str) -> Document {
    HtmlParser::new().parse_with_url(html, url)
}
