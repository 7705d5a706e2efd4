// ABOUTME: Structural comparison of two trees, reporting the first difference with its path.
// ABOUTME: Text is whitespace-normalized and whitespace-only text children are ignored.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Element, Node};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn normalize_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Compare two trees; `None` when they match, otherwise a message naming the
/// first difference and where it sits, e.g. `html->[0]body->[1]p#intro`.
///
/// Attribute order does not matter. Whitespace-only text children are
/// skipped before children are paired up.
pub fn compare(left: &Node, right: &Node) -> Option<String> {
    compare_at(left, right, String::new())
}

fn path_segment(node: &Node) -> String {
    match node {
        Node::Text(_) => "#text".to_string(),
        Node::Element(elm) => match (elm.attr("id"), elm.attr("class")) {
            (Some(id), _) => format!("{}#{}", elm.name, id),
            (None, Some(class)) => format!("{}<{}>", elm.name, class),
            (None, None) => elm.name.clone(),
        },
    }
}

fn compare_at(left: &Node, right: &Node, context: String) -> Option<String> {
    let context = context + &path_segment(left);

    match (left, right) {
        (Node::Text(l), Node::Text(r)) => {
            let (l, r) = (normalize_text(l), normalize_text(r));
            (l != r).then(|| format!("different text {:?} != {:?} at {}", l, r, context))
        }
        (Node::Text(l), Node::Element(r)) => Some(format!(
            "left is text {:?} while right is element <{}> at {}",
            l, r.name, context
        )),
        (Node::Element(l), Node::Text(r)) => Some(format!(
            "left is element <{}> while right is text {:?} at {}",
            l.name, r, context
        )),
        (Node::Element(l), Node::Element(r)) => compare_elements(l, r, context),
    }
}

fn compare_elements(left: &Element, right: &Element, context: String) -> Option<String> {
    if left.name != right.name {
        return Some(format!("different tag name at {}", context));
    }

    let left_attrs: HashMap<&str, &str> = left.attrs.iter().collect();
    let right_attrs: HashMap<&str, &str> = right.attrs.iter().collect();
    if left_attrs != right_attrs {
        return Some(format!("different attributes at {}", context));
    }

    let left_children: Vec<&Node> = left.children().iter().filter(|c| !is_blank_text(c)).collect();
    let right_children: Vec<&Node> = right.children().iter().filter(|c| !is_blank_text(c)).collect();
    if left_children.len() != right_children.len() {
        return Some(format!("different number of children at {}", context));
    }

    left_children
        .iter()
        .zip(&right_children)
        .enumerate()
        .find_map(|(idx, (l, r))| compare_at(l, r, format!("{}->[{}]", context, idx)))
}

fn is_blank_text(node: &Node) -> bool {
    node.is_text() && node.is_blank()
}
