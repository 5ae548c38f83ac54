// Declarative field extraction over parsed HTML.
//
// A `Field` pairs a CSS selector with the way a value is read from each
// match. Extraction is pure and never fails: missing elements simply
// yield `None` or an empty collection.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node, Selector};

/// How a value is read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// All descendant text, whitespace squashed.
    Text,
    /// Only the element's direct text children, so nested buttons and
    /// badges are left out.
    OwnText,
    /// Value of the named attribute.
    Attr(&'static str),
    /// Descendant text with each `<br>` turned into a newline.
    Lines,
}

/// A selector plus an extraction rule.
#[derive(Debug)]
pub struct Field {
    selector: Selector,
    extract: Extract,
}

impl Field {
    /// Build a field from a static CSS selector.
    pub fn new(css: &str, extract: Extract) -> Self {
        Self {
            selector: Selector::parse(css).expect("valid selector"),
            extract,
        }
    }

    /// Value of the first match under `scope`.
    pub fn first(&self, scope: ElementRef<'_>) -> Option<String> {
        scope
            .select(&self.selector)
            .find_map(|el| read(el, self.extract))
    }

    /// Values of every match under `scope`, in document order.
    pub fn all(&self, scope: ElementRef<'_>) -> Vec<String> {
        scope
            .select(&self.selector)
            .filter_map(|el| read(el, self.extract))
            .collect()
    }

    /// Every match's value concatenated, then trimmed.
    pub fn joined(&self, scope: ElementRef<'_>) -> String {
        squash_whitespace(&self.all(scope).join(" "))
    }
}

fn read(el: ElementRef<'_>, extract: Extract) -> Option<String> {
    match extract {
        Extract::Text => Some(element_text(el)),
        Extract::OwnText => Some(own_text(el)),
        Extract::Attr(name) => el.value().attr(name).map(str::to_string),
        Extract::Lines => Some(text_lines(el)),
    }
}

/// Descendant text with whitespace runs squashed to single spaces.
pub fn element_text(el: ElementRef<'_>) -> String {
    squash_whitespace(&el.text().collect::<String>())
}

/// Text of the element's direct text children only.
pub fn own_text(el: ElementRef<'_>) -> String {
    let text: String = el
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(t) => Some(&**t),
            _ => None,
        })
        .collect();
    squash_whitespace(&text)
}

/// Flatten an element to text where only `<br>` produces line breaks.
///
/// Source whitespace (including newlines in the HTML) collapses to single
/// spaces; each resulting line is trimmed.
pub fn text_lines(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_lines(*el, &mut raw);

    raw.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn collect_lines(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(t) => {
                for c in t.chars() {
                    if !c.is_whitespace() {
                        out.push(c);
                    } else if !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
            }
            Node::Element(elem) => match elem.name() {
                "br" => out.push('\n'),
                "script" | "style" => {}
                _ => collect_lines(child, out),
            },
            _ => {}
        }
    }
}

/// Collapse whitespace runs into single spaces and trim.
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
