// ABOUTME: Structural rewrite primitives over the node model: filter, unwrap, flatten, join_children.
// ABOUTME: Also local_modify / local_modify_with for in-place mutation and lateral_effect for side effects.

//! Rewrite primitives.
//!
//! Every primitive maps one node to a sequence of replacement nodes and
//! recurses depth-first through element children. Text nodes are leaves:
//! they pass through every structural primitive unchanged.

use crate::node::{Element, Node};

/// Split a node into its element, or hand a text leaf straight back.
fn into_element(node: Node) -> Result<Element, Vec<Node>> {
    match node {
        Node::Element(elm) => Ok(elm),
        text => Err(vec![text]),
    }
}

/// Remove every element for which `should_remove` holds, together with its subtree.
///
/// Children are filtered first; the predicate then sees the node with its
/// already-filtered children, so "is now empty" checks work as expected.
/// Returns zero or one node.
pub fn filter<P>(should_remove: &P, node: Node) -> Vec<Node>
where
    P: Fn(&Node) -> bool + ?Sized,
{
    let mut elm = match into_element(node) {
        Ok(elm) => elm,
        Err(text) => return text,
    };
    let children = elm.process_children(|child| filter(should_remove, child));
    elm.extend(children);

    let node = Node::Element(elm);
    if should_remove(&node) {
        Vec::new()
    } else {
        vec![node]
    }
}

/// Drop every element for which `should_unwrap` holds, keeping its children in its place.
///
/// Nested matches are unwrapped independently, so a run of matching
/// wrappers collapses into their combined children. Returns 0..N nodes.
pub fn unwrap<P>(should_unwrap: &P, node: Node) -> Vec<Node>
where
    P: Fn(&Node) -> bool + ?Sized,
{
    let mut elm = match into_element(node) {
        Ok(elm) => elm,
        Err(text) => return text,
    };
    let children = elm.process_children(|child| unwrap(should_unwrap, child));
    elm.extend(children);

    let node = Node::Element(elm);
    if should_unwrap(&node) {
        node.into_children()
    } else {
        vec![node]
    }
}

/// Let the children of `node` escape to the parent level.
///
/// When `flatten_children(node)` holds, runs of consecutive internal
/// children (`is_internal`) stay grouped under a wrapper with the node's
/// name while every other child is emitted as a standalone sibling, in
/// the original order. The first wrapper is the node itself and is always
/// emitted, even if it ends up empty, so its attributes survive. Further
/// wrappers are bare shells created only when an internal child needs one.
pub fn flatten<F, I>(flatten_children: &F, is_internal: &I, node: Node) -> Vec<Node>
where
    F: Fn(&Node) -> bool + ?Sized,
    I: Fn(&Node) -> bool + ?Sized,
{
    let mut elm = match into_element(node) {
        Ok(elm) => elm,
        Err(text) => return text,
    };
    let children = elm.process_children(|child| flatten(flatten_children, is_internal, child));
    elm.extend(children);

    let node = Node::Element(elm);
    if !flatten_children(&node) {
        return vec![node];
    }
    let mut elm = match into_element(node) {
        Ok(elm) => elm,
        Err(text) => return text,
    };

    let shell = elm.clone_shell();
    let children = elm.take_children();
    let mut result = Vec::new();
    let mut wrapper = Some(elm);

    for child in children {
        if is_internal(&child) {
            wrapper.get_or_insert_with(|| shell.clone()).push(child);
        } else {
            if let Some(open) = wrapper.take() {
                result.push(Node::Element(open));
            }
            result.push(child);
        }
    }
    if let Some(open) = wrapper {
        result.push(Node::Element(open));
    }

    result
}

/// Merge adjacent children with `join_pair`, recursively, left to right.
///
/// `join_pair(last, next)` returns one node when the pair merged and both
/// nodes otherwise. The merged node stays "last", so it may absorb the
/// following child as well. Only neighbours are ever compared.
/// Always returns the node itself.
pub fn join_children<J>(join_pair: &J, node: Node) -> Vec<Node>
where
    J: Fn(Node, Node) -> Vec<Node> + ?Sized,
{
    let mut elm = match into_element(node) {
        Ok(elm) => elm,
        Err(text) => return text,
    };
    let children = elm.process_children(|child| join_children(join_pair, child));

    let mut joined: Vec<Node> = Vec::with_capacity(children.len());
    for child in children {
        match joined.pop() {
            Some(last) => joined.extend(join_pair(last, child)),
            None => joined.push(child),
        }
    }
    elm.extend(joined);

    vec![Node::Element(elm)]
}

/// Call `mutator` on the node and then on every descendant element, pre-order.
pub fn local_modify<M>(mutator: &mut M, mut node: Node) -> Vec<Node>
where
    M: FnMut(&mut Node) + ?Sized,
{
    modify_in_place(mutator, &mut node);
    vec![node]
}

fn modify_in_place<M>(mutator: &mut M, node: &mut Node)
where
    M: FnMut(&mut Node) + ?Sized,
{
    if !node.is_element() {
        return;
    }
    mutator(node);
    if let Node::Element(elm) = node {
        for child in elm.children_mut() {
            modify_in_place(mutator, child);
        }
    }
}

/// Like [`local_modify`], threading an explicit mutable context through every call.
pub fn local_modify_with<C, M>(context: &mut C, mutator: &mut M, mut node: Node) -> Vec<Node>
where
    M: FnMut(&mut C, &mut Node) + ?Sized,
{
    modify_in_place(&mut |n: &mut Node| mutator(context, n), &mut node);
    vec![node]
}

/// Run `effect` once and pass `nodes` through untouched.
pub fn lateral_effect<E>(effect: &mut E, nodes: Vec<Node>) -> Vec<Node>
where
    E: FnMut() + ?Sized,
{
    effect();
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(name: &'static str) -> impl Fn(&Node) -> bool {
        move |node: &Node| node.name() == Some(name)
    }

    #[test]
    fn test_filter_text_node_passes_through() {
        let result = filter(&|_: &Node| true, Node::text("x"));
        assert_eq!(result, vec![Node::text("x")]);
    }

    #[test]
    fn test_filter_root_can_disappear() {
        let root = Node::from(Element::new("span").with_text("x"));
        assert!(filter(&named("span"), root).is_empty());
    }

    #[test]
    fn test_filter_removes_nested_matches() {
        let root = Node::from(
            Element::new("div")
                .with_text("a")
                .with_child(Element::new("span").with_text("b"))
                .with_child(
                    Element::new("p").with_child(Element::new("span").with_text("c")),
                ),
        );
        let expected = Node::from(
            Element::new("div")
                .with_text("a")
                .with_child(Element::new("p")),
        );
        assert_eq!(filter(&named("span"), root), vec![expected]);
    }

    #[test]
    fn test_unwrap_root_returns_children() {
        let root = Node::from(
            Element::new("x")
                .with_text("hello ")
                .with_child(Element::new("a").with_text(" in a")),
        );
        let result = unwrap(&named("x"), root);
        assert_eq!(
            result,
            vec![
                Node::text("hello "),
                Node::from(Element::new("a").with_text(" in a")),
            ]
        );
    }

    #[test]
    fn test_unwrap_nested_matches() {
        // <root><x>hello <a> in a <x>in x2</x> after</a></x> 22 <b>in b</b> end</root>
        let root = Node::from(
            Element::new("root")
                .with_child(
                    Element::new("x").with_text("hello ").with_child(
                        Element::new("a")
                            .with_text(" in a ")
                            .with_child(Element::new("x").with_text("in x2"))
                            .with_text(" after"),
                    ),
                )
                .with_text(" 22 ")
                .with_child(Element::new("b").with_text("in b"))
                .with_text(" end"),
        );
        let expected = Node::from(
            Element::new("root")
                .with_text("hello ")
                .with_child(
                    Element::new("a")
                        .with_text(" in a ")
                        .with_text("in x2")
                        .with_text(" after"),
                )
                .with_text(" 22 ")
                .with_child(Element::new("b").with_text("in b"))
                .with_text(" end"),
        );
        assert_eq!(unwrap(&named("x"), root), vec![expected]);
    }

    #[test]
    fn test_flatten_not_flattenable_keeps_children() {
        let root = Node::from(
            Element::new("a")
                .with_text("x")
                .with_child(Node::element("br")),
        );
        let result = flatten(&|_: &Node| false, &|_: &Node| true, root.clone());
        assert_eq!(result, vec![root]);
    }

    #[test]
    fn test_flatten_leading_external_child_keeps_empty_original() {
        // <div id="1"><a class="block"><div>inside a</div></a></div>
        let root = Node::from(
            Element::new("div").with_attr("id", "1").with_child(
                Element::new("a")
                    .with_attr("class", "block")
                    .with_child(Element::new("div").with_text("inside a")),
            ),
        );
        let flatten_children = |n: &Node| n.name() == Some("div");
        let is_internal = |n: &Node| n.name() != Some("a");

        let result = flatten(&flatten_children, &is_internal, root);
        assert_eq!(
            result,
            vec![
                Node::from(Element::new("div").with_attr("id", "1")),
                Node::from(
                    Element::new("a")
                        .with_attr("class", "block")
                        .with_child(Element::new("div").with_text("inside a")),
                ),
            ]
        );
    }

    #[test]
    fn test_flatten_groups_internal_runs() {
        // <div id="1"><i>it</i><br id="2"><b></b></div>
        let root = Node::from(
            Element::new("div")
                .with_attr("id", "1")
                .with_child(Element::new("i").with_text("it"))
                .with_child(Element::new("br").with_attr("id", "2"))
                .with_child(Element::new("b")),
        );
        let flatten_children = |n: &Node| n.name() == Some("div");
        let is_internal = |n: &Node| n.name() != Some("br");

        let result = flatten(&flatten_children, &is_internal, root);
        assert_eq!(
            result,
            vec![
                Node::from(
                    Element::new("div")
                        .with_attr("id", "1")
                        .with_child(Element::new("i").with_text("it")),
                ),
                Node::from(Element::new("br").with_attr("id", "2")),
                Node::from(Element::new("div").with_child(Element::new("b"))),
            ]
        );
    }

    #[test]
    fn test_flatten_bubbles_through_levels() {
        // <div>a<span>b<p>c</p>d</span>e</div>, span and div flatten, p pops out
        let root = Node::from(
            Element::new("div")
                .with_text("a")
                .with_child(
                    Element::new("span")
                        .with_text("b")
                        .with_child(Element::new("p").with_text("c"))
                        .with_text("d"),
                )
                .with_text("e"),
        );
        let flatten_children = |n: &Node| matches!(n.name(), Some("div") | Some("span"));
        let is_internal = |n: &Node| n.name() != Some("p");

        let result = flatten(&flatten_children, &is_internal, root);
        assert_eq!(
            result,
            vec![
                Node::from(
                    Element::new("div")
                        .with_text("a")
                        .with_child(Element::new("span").with_text("b")),
                ),
                Node::from(Element::new("p").with_text("c")),
                Node::from(
                    Element::new("div")
                        .with_child(Element::new("span").with_text("d"))
                        .with_text("e"),
                ),
            ]
        );
    }

    #[test]
    fn test_join_children_recurses() {
        let merge_b = |left: Node, right: Node| -> Vec<Node> {
            match (left, right) {
                (Node::Element(mut l), Node::Element(r)) if l.name == "b" && r.name == "b" => {
                    l.extend(r.children().to_vec());
                    vec![Node::Element(l)]
                }
                (l, r) => vec![l, r],
            }
        };
        let root = Node::from(
            Element::new("div").with_child(
                Element::new("p")
                    .with_child(Element::new("b").with_text("1"))
                    .with_child(Element::new("b").with_text("2"))
                    .with_child(Element::new("b").with_text("3")),
            ),
        );
        let expected = Node::from(
            Element::new("div").with_child(
                Element::new("p").with_child(
                    Element::new("b")
                        .with_text("1")
                        .with_text("2")
                        .with_text("3"),
                ),
            ),
        );
        assert_eq!(join_children(&merge_b, root), vec![expected]);
    }

    #[test]
    fn test_rewritten_children_are_attached_once() {
        let original = Element::new("div")
            .with_text("a")
            .with_child(Element::new("span").with_text("b"));
        let mut result = unwrap(&named("font"), Node::from(original.clone()));
        assert_eq!(result.len(), 1);

        let Some(elm) = result[0].as_element_mut() else {
            panic!("expected an element");
        };
        assert_eq!(elm.children(), original.children());
        let same = elm.children().to_vec();
        assert!(!elm.replace_children(same));
        assert_eq!(elm.children(), original.children());
    }

    #[test]
    fn test_local_modify_is_preorder_over_elements() {
        let mut seen = Vec::new();
        let root = Node::from(
            Element::new("a")
                .with_text("t")
                .with_child(Element::new("b").with_child(Node::element("c")))
                .with_child(Node::element("d")),
        );
        local_modify(
            &mut |n: &mut Node| seen.push(n.name().unwrap_or("?").to_string()),
            root,
        );
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_local_modify_with_threads_context() {
        let mut count = 0usize;
        let root = Node::from(Element::new("a").with_child(Node::element("b")));
        let result = local_modify_with(
            &mut count,
            &mut |count: &mut usize, n: &mut Node| {
                *count += 1;
                if let Some(elm) = n.as_element_mut() {
                    elm.set_attr("n", count.to_string());
                }
            },
            root,
        );
        assert_eq!(count, 2);
        assert_eq!(
            result,
            vec![Node::from(
                Element::new("a")
                    .with_attr("n", "1")
                    .with_child(Element::new("b").with_attr("n", "2")),
            )]
        );
    }

    #[test]
    fn test_lateral_effect_runs_once() {
        let mut calls = 0;
        let nodes = vec![Node::text("a"), Node::text("b")];
        let result = lateral_effect(&mut || calls += 1, nodes.clone());
        assert_eq!(calls, 1);
        assert_eq!(result, nodes);
    }
}
