// ABOUTME: Serialization of trellis node trees back to HTML or XML text.
// ABOUTME: Compact output mirrors the tree exactly; pretty output puts one node per indented line.

use trellis_tree::{Element, Node};

use crate::options::{Dialect, SerializeOptions};

const HTML_DOCTYPE: &str = "<!DOCTYPE html>";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

// Children of these are emitted without escaping in HTML
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Render a node as markup.
///
/// A `#document` node renders its children, preceded by `<!DOCTYPE html>`
/// for an HTML document rooted at `html` or by an XML declaration.
pub fn serialize(node: &Node, opts: &SerializeOptions) -> String {
    let mut out = String::new();
    let separator = if opts.pretty { "\n" } else { "" };

    if let Some(prologue) = prologue(node, opts.dialect) {
        out.push_str(prologue);
        out.push_str(separator);
    }

    let top_level: &[Node] = if node.is_document() {
        node.children()
    } else {
        std::slice::from_ref(node)
    };
    for child in top_level {
        if opts.pretty {
            write_pretty(child, opts.dialect, 0, &mut out);
        } else {
            write_compact(child, opts.dialect, false, &mut out);
        }
    }
    out
}

fn prologue(node: &Node, dialect: Dialect) -> Option<&'static str> {
    if !node.is_document() {
        return None;
    }
    match dialect {
        Dialect::Xml => Some(XML_DECLARATION),
        Dialect::Html => {
            let first = node.children().iter().find(|c| c.is_element())?;
            first
                .name()
                .is_some_and(|n| n.eq_ignore_ascii_case("html"))
                .then_some(HTML_DOCTYPE)
        }
        Dialect::HtmlFragment => None,
    }
}

fn write_compact(node: &Node, dialect: Dialect, raw_text: bool, out: &mut String) {
    match node {
        Node::Text(text) if raw_text => out.push_str(text),
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(elm) => {
            write_open_tag(elm, out);
            if self_closes(elm, dialect) {
                out.push_str("/>");
                return;
            }
            out.push('>');
            let raw = holds_raw_text(elm, dialect);
            for child in elm.children() {
                write_compact(child, dialect, raw, out);
            }
            write_close_tag(elm, out);
        }
    }
}

fn write_pretty(node: &Node, dialect: Dialect, depth: usize, out: &mut String) {
    let indent = " ".repeat(depth);
    match node {
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push_str(&indent);
                out.push_str(&escape_text(trimmed));
                out.push('\n');
            }
        }
        Node::Element(elm) => {
            out.push_str(&indent);
            write_open_tag(elm, out);
            if self_closes(elm, dialect) {
                out.push_str("/>\n");
                return;
            }
            out.push('>');
            if elm.children().is_empty() {
                write_close_tag(elm, out);
                out.push('\n');
                return;
            }
            out.push('\n');

            if holds_raw_text(elm, dialect) {
                let content = elm.children().iter().filter_map(Node::as_text).collect::<String>();
                for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    out.push_str(&indent);
                    out.push(' ');
                    out.push_str(line);
                    out.push('\n');
                }
            } else {
                for child in elm.children() {
                    write_pretty(child, dialect, depth + 1, out);
                }
            }

            out.push_str(&indent);
            write_close_tag(elm, out);
            out.push('\n');
        }
    }
}

fn write_open_tag(elm: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&elm.name);
    for (key, value) in elm.attrs.iter() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
}

fn write_close_tag(elm: &Element, out: &mut String) {
    out.push_str("</");
    out.push_str(&elm.name);
    out.push('>');
}

fn self_closes(elm: &Element, dialect: Dialect) -> bool {
    if !elm.children().is_empty() {
        return false;
    }
    match dialect {
        Dialect::Xml => true,
        Dialect::Html | Dialect::HtmlFragment => is_void_element(&elm.name),
    }
}

fn holds_raw_text(elm: &Element, dialect: Dialect) -> bool {
    dialect.is_html() && RAW_TEXT_ELEMENTS.iter().any(|name| elm.is_named(name))
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// HTML elements that never have content or a closing tag.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trellis_tree::DOCUMENT_NAME;

    fn compact(dialect: Dialect) -> SerializeOptions {
        SerializeOptions::builder().dialect(dialect).build()
    }

    fn pretty(dialect: Dialect) -> SerializeOptions {
        SerializeOptions::builder()
            .dialect(dialect)
            .pretty(true)
            .build()
    }

    #[test]
    fn test_compact_escapes_text_and_attributes() {
        let node = Node::from(
            Element::new("a")
                .with_attr("title", r#"say "hi" & <go>"#)
                .with_text("1 < 2 & 3 > 2"),
        );
        assert_eq!(
            serialize(&node, &compact(Dialect::HtmlFragment)),
            r#"<a title="say &quot;hi&quot; &amp; &lt;go&gt;">1 &lt; 2 &amp; 3 &gt; 2</a>"#
        );
    }

    #[test]
    fn test_void_and_empty_elements() {
        let node = Node::from(
            Element::new("p")
                .with_child(Node::element("br"))
                .with_child(Node::element("span")),
        );
        assert_eq!(
            serialize(&node, &compact(Dialect::HtmlFragment)),
            "<p><br/><span></span></p>"
        );
        assert_eq!(
            serialize(&node, &compact(Dialect::Xml)),
            "<p><br/><span/></p>"
        );
    }

    #[test]
    fn test_script_text_is_raw_in_html() {
        let node = Node::from(Element::new("script").with_text("if (a < b && c) {}"));
        assert_eq!(
            serialize(&node, &compact(Dialect::Html)),
            "<script>if (a < b && c) {}</script>"
        );
        assert_eq!(
            serialize(&node, &compact(Dialect::Xml)),
            "<script>if (a &lt; b &amp;&amp; c) {}</script>"
        );
    }

    #[test]
    fn test_html_document_gets_doctype() {
        let doc = Node::from(
            Element::new(DOCUMENT_NAME)
                .with_child(Element::new("html").with_child(Element::new("body").with_text("x"))),
        );
        assert_eq!(
            serialize(&doc, &compact(Dialect::Html)),
            "<!DOCTYPE html><html><body>x</body></html>"
        );
        assert_eq!(
            serialize(&doc, &compact(Dialect::HtmlFragment)),
            "<html><body>x</body></html>"
        );
    }

    #[test]
    fn test_xml_document_gets_declaration() {
        let doc = Node::from(Element::new(DOCUMENT_NAME).with_child(Element::new("root")));
        assert_eq!(
            serialize(&doc, &compact(Dialect::Xml)),
            r#"<?xml version="1.0" encoding="utf-8"?><root/>"#
        );
    }

    #[test]
    fn test_pretty_output() {
        let doc = Node::from(
            Element::new(DOCUMENT_NAME).with_child(
                Element::new("html").with_child(
                    Element::new("body")
                        .with_text("\n  ")
                        .with_child(
                            Element::new("p")
                                .with_attr("id", "1")
                                .with_text("  hello ")
                                .with_child(Element::new("b").with_text("world")),
                        )
                        .with_child(Node::element("br"))
                        .with_child(Node::element("div")),
                ),
            ),
        );
        let expected = "\
<!DOCTYPE html>
<html>
 <body>
  <p id=\"1\">
   hello
   <b>
    world
   </b>
  </p>
  <br/>
  <div></div>
 </body>
</html>
";
        assert_eq!(serialize(&doc, &pretty(Dialect::Html)), expected);
    }

    #[test]
    fn test_is_void_element() {
        assert!(is_void_element("br"));
        assert!(is_void_element("IMG"));
        assert!(!is_void_element("p"));
    }
}
