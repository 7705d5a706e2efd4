// ABOUTME: Markup parsing into the trellis node model for HTML documents, HTML fragments, and XML.
// ABOUTME: HTML goes through scraper/html5ever; XML through quick-xml with entity resolution.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use scraper::Html;
use trellis_tree::{Element, Node, DOCUMENT_NAME};

use crate::decode::decode;
use crate::error::MarkupError;
use crate::options::Dialect;

/// Parse `raw` into a `#document` element.
///
/// Comments, doctypes, processing instructions and declarations are not
/// part of the node model and are dropped. Adjacent text is merged.
pub fn parse(raw: &str, dialect: Dialect) -> Result<Node, MarkupError> {
    match dialect {
        Dialect::Html => Ok(parse_html_document(raw)),
        Dialect::HtmlFragment => Ok(parse_html_fragment(raw)),
        Dialect::Xml => parse_xml(raw),
    }
}

/// Decode raw bytes (see [`decode`]) and parse them.
pub fn parse_bytes(bytes: &[u8], dialect: Dialect) -> Result<Node, MarkupError> {
    parse(&decode(bytes)?, dialect)
}

fn parse_html_document(raw: &str) -> Node {
    let document = Html::parse_document(raw);
    let mut root = Element::new(DOCUMENT_NAME);
    for child in document.tree.root().children() {
        convert_html(child, &mut root);
    }
    Node::Element(root)
}

fn parse_html_fragment(raw: &str) -> Node {
    // html5ever hangs fragment content off a synthetic <html> element
    let fragment = Html::parse_fragment(raw);
    let mut root = Element::new(DOCUMENT_NAME);
    for child in fragment.root_element().children() {
        convert_html(child, &mut root);
    }
    Node::Element(root)
}

fn convert_html(node: ego_tree::NodeRef<scraper::Node>, parent: &mut Element) {
    match node.value() {
        scraper::Node::Text(text) => push_text(parent, &**text),
        scraper::Node::Element(el) => {
            let mut elm = Element::new(el.name());
            for (key, value) in el.attrs() {
                elm.set_attr(key, value);
            }
            for child in node.children() {
                convert_html(child, &mut elm);
            }
            parent.push(elm);
        }
        _ => {}
    }
}

/// Append text, merging it into a trailing text child.
fn push_text(parent: &mut Element, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = parent.children_mut().last_mut() {
        last.push_str(text);
        return;
    }
    parent.push(Node::text(text));
}

fn parse_xml(raw: &str) -> Result<Node, MarkupError> {
    let mut reader = Reader::from_str(raw);
    let mut stack = vec![Element::new(DOCUMENT_NAME)];

    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match event {
            Event::Start(ref e) => stack.push(xml_element(e)?),
            Event::Empty(ref e) => {
                let elm = xml_element(e)?;
                current(&mut stack).push(elm);
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if stack.len() < 2 {
                    return Err(MarkupError::malformed(format!(
                        "unexpected closing tag </{}>",
                        name
                    )));
                }
                if let Some(elm) = stack.pop() {
                    if elm.name != name {
                        return Err(MarkupError::malformed(format!(
                            "expected </{}>, found </{}>",
                            elm.name, name
                        )));
                    }
                    current(&mut stack).push(elm);
                }
            }
            Event::Text(ref e) => {
                let text = e.decode().map_err(MarkupError::xml)?;
                push_xml_text(&mut stack, &text);
            }
            Event::GeneralRef(ref e) => {
                let name = e.decode().map_err(MarkupError::xml)?;
                let text = resolve_entity(&name).unwrap_or_else(|| format!("&{};", name));
                push_xml_text(&mut stack, &text);
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e).to_string();
                push_xml_text(&mut stack, &text);
            }
            Event::Eof => break,
            // comments, declarations, doctypes and processing instructions
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open: Vec<String> = stack[1..].iter().map(|e| format!("<{}>", e.name)).collect();
        return Err(MarkupError::malformed(format!(
            "unclosed element(s) {}",
            open.join(", ")
        )));
    }
    match stack.pop() {
        Some(root) => Ok(Node::Element(root)),
        None => Err(MarkupError::malformed("empty element stack")),
    }
}

fn current(stack: &mut [Element]) -> &mut Element {
    let last = stack.len() - 1;
    &mut stack[last]
}

/// Text between top-level XML nodes is formatting; only keep it inside elements.
fn push_xml_text(stack: &mut [Element], text: &str) {
    if stack.len() == 1 && text.trim().is_empty() {
        return;
    }
    push_text(current(stack), text);
}

fn xml_element(e: &BytesStart) -> Result<Element, MarkupError> {
    let mut elm = Element::new(String::from_utf8_lossy(e.name().as_ref()).to_string());
    for attr in e.attributes() {
        let attr = attr.map_err(MarkupError::xml)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = unescape(&String::from_utf8_lossy(&attr.value));
        elm.set_attr(key, value);
    }
    Ok(elm)
}

fn xml_error(err: quick_xml::Error) -> MarkupError {
    match err {
        quick_xml::Error::IllFormed(inner) => MarkupError::malformed(inner.to_string()),
        other => MarkupError::xml(other),
    }
}

/// Resolve a predefined or numeric character reference, given without `&` and `;`.
fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = match name.strip_prefix('#') {
                Some(hex) if hex.starts_with('x') || hex.starts_with('X') => {
                    u32::from_str_radix(&hex[1..], 16).ok()?
                }
                Some(dec) => dec.parse::<u32>().ok()?,
                None => return None,
            };
            char::from_u32(code)?
        }
    };
    Some(resolved.to_string())
}

/// Replace entity references in an attribute value; unknown ones stay literal.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find(';') {
            Some(end) => match resolve_entity(&after[..end]) {
                Some(text) => {
                    out.push_str(&text);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = after;
                }
            },
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
