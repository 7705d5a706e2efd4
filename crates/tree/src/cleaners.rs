// ABOUTME: Ready-made HTML cleaning: unwrap font tags, pop block elements out of inline parents.
// ABOUTME: Drops br and blank p/div, joins adjacent single-list paragraphs and numbers paragraphs.

use crate::error::RewriteError;
use crate::modify::{number_attribute, Counter};
use crate::node::{Element, Node, DOCUMENT_NAME};
use crate::pipeline::{
    filter_factory, flatten_factory, join_children_factory, local_modify_factory,
    local_modify_with_factory, unwrap_factory, Pipeline,
};
use crate::predicate::has_name;

// Removed wherever they appear
const UNCONDITIONALLY_REMOVE: &[&str] = &["br"];

// Removed once nothing but whitespace is left inside
const REMOVE_EMPTY_ELEMENTS: &[&str] = &["p", "div"];

const UNWRAP_ELEMENTS: &[&str] = &["font"];

// Never flattened, whatever they contain
const ELEMENTS_HOLDING_ALL_CHILDREN: &[&str] = &["html", "body", "header", "a", DOCUMENT_NAME];

// Elements that pop out of their parent when it is flattened
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "hr", "br",
];

/// Class marking an `a` that wraps block content.
pub const BLOCK_LINK_CLASS: &str = "block_a";

fn is_one_of(node: &Node, names: &[&str]) -> bool {
    node.as_element().is_some_and(|elm| is_element_one_of(elm, names))
}

fn is_element_one_of(elm: &Element, names: &[&str]) -> bool {
    names.iter().any(|name| elm.is_named(name))
}

pub fn should_unwrap_element(node: &Node) -> bool {
    is_one_of(node, UNWRAP_ELEMENTS)
}

/// `br` always; `p` and `div` once they hold only whitespace.
pub fn is_unwanted_element(node: &Node) -> bool {
    is_one_of(node, UNCONDITIONALLY_REMOVE)
        || (is_one_of(node, REMOVE_EMPTY_ELEMENTS) && node.is_blank())
}

pub fn should_flatten(node: &Node) -> bool {
    is_one_of(node, BLOCK_ELEMENTS) && !is_one_of(node, ELEMENTS_HOLDING_ALL_CHILDREN)
}

/// Whether a child stays grouped under its parent when the parent is flattened.
///
/// Text and inline elements stay; block elements and links marked with
/// [`BLOCK_LINK_CLASS`] pop out.
pub fn stays_inside_parent(node: &Node) -> bool {
    match node {
        Node::Text(_) => true,
        Node::Element(elm) => {
            !is_element_one_of(elm, BLOCK_ELEMENTS)
                && !(elm.is_named("a") && elm.classes().any(|c| c == BLOCK_LINK_CLASS))
        }
    }
}

fn contains_block_descendant(node: &Node) -> bool {
    node.children()
        .iter()
        .any(|child| is_one_of(child, BLOCK_ELEMENTS) || contains_block_descendant(child))
}

/// Add [`BLOCK_LINK_CLASS`] to an `a` that has a block element somewhere below it.
pub fn mark_block_links(node: &mut Node) {
    if !node.name().is_some_and(|n| n.eq_ignore_ascii_case("a")) || !contains_block_descendant(node)
    {
        return;
    }
    let Some(elm) = node.as_element_mut() else {
        return;
    };
    if elm.classes().any(|c| c == BLOCK_LINK_CLASS) {
        return;
    }
    let classes = match elm.attr("class") {
        Some(existing) if !existing.trim().is_empty() => {
            format!("{} {}", existing.trim(), BLOCK_LINK_CLASS)
        }
        _ => BLOCK_LINK_CLASS.to_string(),
    };
    elm.set_attr("class", classes);
}

/// Position of the only `ul` in a `p` whose other children are blank text.
fn sole_list_index(elm: &Element) -> Option<usize> {
    if !elm.is_named("p") {
        return None;
    }
    let mut found = None;
    for (idx, child) in elm.children().iter().enumerate() {
        match child {
            Node::Text(text) if text.trim().is_empty() => {}
            Node::Element(inner) if inner.is_named("ul") && found.is_none() => found = Some(idx),
            _ => return None,
        }
    }
    found
}

/// Merge two adjacent `<p><ul>..</ul></p>` paragraphs into the left one.
///
/// The left list receives the items of the right list. Anything else comes
/// back as the untouched pair.
pub fn join_p_with_ul_inside(left: Node, right: Node) -> Vec<Node> {
    let (mut left, mut right) = match (left, right) {
        (Node::Element(l), Node::Element(r)) => (l, r),
        (l, r) => return vec![l, r],
    };
    let (Some(left_idx), Some(right_idx)) = (sole_list_index(&left), sole_list_index(&right))
    else {
        return vec![Node::Element(left), Node::Element(right)];
    };

    let items = right.take_children().swap_remove(right_idx).into_children();
    if let Some(list) = left.children_mut()[left_idx].as_element_mut() {
        list.extend(items);
    }
    vec![Node::Element(left)]
}

/// The full cleaning pipeline.
///
/// Paragraph numbering starts again at 1 on every run.
pub fn clean_html_pipeline() -> Pipeline {
    Pipeline::new()
        .stage(unwrap_factory(should_unwrap_element))
        .stage(local_modify_factory(mark_block_links))
        .stage(flatten_factory(should_flatten, stays_inside_parent))
        .stage(filter_factory(is_unwanted_element))
        .stage(join_children_factory(join_p_with_ul_inside))
        .stage(local_modify_with_factory(
            Counter::new,
            number_attribute(has_name("p"), "id"),
        ))
}

/// Clean a single tree, requiring the pipeline to yield exactly one root.
pub fn clean_html(root: Node) -> Result<Node, RewriteError> {
    clean_html_pipeline().run_single(root)
}
