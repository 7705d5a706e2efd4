// ABOUTME: Integration tests for parsing and serializing markup through the trellis node model.
// ABOUTME: Covers HTML documents and fragments, XML entities and CDATA, malformed input and stability.

use pretty_assertions::assert_eq;
use trellis_markup::{parse, serialize, Dialect, MarkupError, SerializeOptions};
use trellis_tree::{Element, Node, DOCUMENT_NAME};

fn compact(dialect: Dialect) -> SerializeOptions {
    SerializeOptions::builder().dialect(dialect).build()
}

#[test]
fn test_html_document_implies_structure() {
    let doc = parse("<p>hello <b>world</b></p>", Dialect::Html).unwrap();
    assert!(doc.is_document());

    let html = &doc.children()[0];
    assert_eq!(html.name(), Some("html"));
    let names: Vec<_> = html.children().iter().filter_map(Node::name).collect();
    assert_eq!(names, vec!["head", "body"]);

    let body = &html.children()[1];
    let expected = Node::from(
        Element::new("body").with_child(
            Element::new("p")
                .with_text("hello ")
                .with_child(Element::new("b").with_text("world")),
        ),
    );
    assert_eq!(body, &expected);
}

#[test]
fn test_html_fragment_has_no_implied_structure() {
    let doc = parse("<div><font>x</font></div><!-- gone -->tail", Dialect::HtmlFragment).unwrap();
    let expected = Node::from(
        Element::new(DOCUMENT_NAME)
            .with_child(Element::new("div").with_child(Element::new("font").with_text("x")))
            .with_text("tail"),
    );
    assert_eq!(doc, expected);
}

#[test]
fn test_html_entities_are_decoded() {
    let doc = parse("<p>fish &amp; chips&nbsp;&lt;3</p>", Dialect::HtmlFragment).unwrap();
    assert_eq!(doc.text_content(), "fish & chips\u{a0}<3");
}

#[test]
fn test_xml_entities_and_cdata() {
    let raw = r#"<?xml version="1.0"?>
<!-- comment -->
<root a="x &amp; y">1 &lt; 2 &#65;&#x42;<![CDATA[<raw>]]><empty/></root>
"#;
    let doc = parse(raw, Dialect::Xml).unwrap();
    let expected = Node::from(
        Element::new(DOCUMENT_NAME).with_child(
            Element::new("root")
                .with_attr("a", "x & y")
                .with_text("1 < 2 AB<raw>")
                .with_child(Node::element("empty")),
        ),
    );
    assert_eq!(doc, expected);
}

#[test]
fn test_xml_entities_round_trip() {
    let raw = r#"<?xml version="1.0" encoding="utf-8"?><root a="&quot;q&quot;">a &amp; b &lt;c&gt;</root>"#;
    let doc = parse(raw, Dialect::Xml).unwrap();
    assert_eq!(serialize(&doc, &compact(Dialect::Xml)), raw);
}

#[test]
fn test_xml_mismatched_tags_are_malformed() {
    let result = parse("<a><b></a></b>", Dialect::Xml);
    assert!(matches!(result, Err(MarkupError::Malformed(_))));
}

#[test]
fn test_xml_unclosed_element_is_an_error() {
    let result = parse("<a><b>text</b>", Dialect::Xml);
    assert!(result.is_err());
}

#[test]
fn test_parse_serialize_is_stable() {
    let raw = "<html><head><title>t</title></head><body><div id=\"d\"><p>a<br>b</p>\
               <img src=\"x.png\"></div></body></html>";
    let opts = compact(Dialect::Html);

    let once = serialize(&parse(raw, Dialect::Html).unwrap(), &opts);
    let twice = serialize(&parse(&once, Dialect::Html).unwrap(), &opts);

    assert_eq!(once, twice);
    assert_eq!(
        once,
        "<!DOCTYPE html><html><head><title>t</title></head><body><div id=\"d\"><p>a<br/>b</p>\
         <img src=\"x.png\"/></div></body></html>"
    );
}

#[test]
fn test_pretty_xml() {
    let doc = parse("<r><a>x</a><b/></r>", Dialect::Xml).unwrap();
    let opts = SerializeOptions::builder()
        .dialect(Dialect::Xml)
        .pretty(true)
        .build();
    assert_eq!(
        serialize(&doc, &opts),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<r>\n <a>\n  x\n </a>\n <b/>\n</r>\n"
    );
}
