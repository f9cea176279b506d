//! Artist biography cleanup.
//!
//! Biographies come from Last.fm as HTML and usually end in an attribution
//! link. The markup is third-party content, so it goes through an allow-list
//! sanitizer before anything else looks at it, and surviving links are forced
//! onto http(s) and opened in a new, unlinked browsing context.

use std::collections::HashSet;

use ammonia::{Builder, UrlRelative};
use scraper::{ElementRef, Html, Node};

const ALLOWED_TAGS: [&str; 8] = ["a", "b", "strong", "i", "em", "u", "span", "br"];
const ALLOWED_ATTRIBUTES: [&str; 4] = ["href", "title", "rel", "target"];
const LINK_SCHEMES: [&str; 2] = ["http", "https"];
const LINK_REL: &str = "noopener noreferrer";
// Raw-text and embedded-content elements: dropped along with everything inside.
const DROPPED_WITH_CONTENT: [&str; 14] = [
    "script", "style", "iframe", "noscript", "noembed", "noframes", "xmp", "title", "template",
    "svg", "math", "audio", "video", "head",
];

fn sanitizer() -> Builder<'static> {
    let mut builder = Builder::empty();
    builder
        .tags(HashSet::from(ALLOWED_TAGS))
        .generic_attributes(HashSet::from(ALLOWED_ATTRIBUTES))
        .clean_content_tags(HashSet::from(DROPPED_WITH_CONTENT))
        .url_schemes(HashSet::from(LINK_SCHEMES))
        .url_relative(UrlRelative::Deny)
        .link_rel(None)
        .strip_comments(true);
    builder
}

// rel and target are set by the builder here, so they must not also be
// allowed through from the input.
fn link_hardener() -> Builder<'static> {
    let mut builder = Builder::empty();
    builder
        .tags(HashSet::from(ALLOWED_TAGS))
        .generic_attributes(HashSet::from(["href", "title"]))
        .url_schemes(HashSet::from(LINK_SCHEMES))
        .url_relative(UrlRelative::Deny)
        .link_rel(Some(LINK_REL))
        .set_tag_attribute_value("a", "target", "_blank");
    builder
}

/// A sanitized biography split into readable text and leftover markup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Biography {
    /// Top-level text, whitespace collapsed and trimmed.
    pub plain_text: String,
    /// Top-level elements (links, emphasis...) serialized back to HTML.
    pub markup: String,
}

/// A link pulled out of sanitized markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Anchor text, whitespace collapsed.
    pub text: String,
    /// Target, if it survived hardening.
    pub href: Option<String>,
}

/// Strip everything outside the allow-list.
pub fn sanitize(raw_html: &str) -> String {
    sanitizer().clean(raw_html).to_string()
}

/// Sanitize a biography and separate its text from its elements.
pub fn format_biography(raw_html: &str) -> Biography {
    let clean = sanitize(raw_html);
    let fragment = Html::parse_fragment(&clean);

    let mut texts: Vec<&str> = Vec::new();
    let mut elements: Vec<String> = Vec::new();
    for node in fragment.root_element().children() {
        match node.value() {
            Node::Text(text) if !text.trim().is_empty() => texts.push(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    elements.push(element.html());
                }
            }
            _ => {}
        }
    }

    Biography {
        plain_text: collapse_whitespace(&texts.join(" ")),
        markup: elements.join(" "),
    }
}

/// Rewrite sanitized markup so every anchor is safe to show: `href` kept only
/// for http(s) targets, `rel="noopener noreferrer"` and `target="_blank"` forced.
pub fn harden_links(markup: &str) -> String {
    link_hardener().clean(markup).to_string()
}

/// List the anchors in a piece of markup, in document order.
pub fn links(markup: &str) -> Vec<Link> {
    let fragment = Html::parse_fragment(markup);
    fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .map(|anchor| Link {
            text: collapse_whitespace(&anchor.text().collect::<String>()),
            href: anchor.value().attr("href").map(str::to_string),
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
