// ABOUTME: Ready-made mutators for local_modify: class toggling, tag renaming, numbering.
// ABOUTME: NameGen lets class and tag names be constants or computed per element.

use std::fmt;

use crate::node::{Element, Node};

/// Produces a class or tag name for an element.
pub enum NameGen {
    Constant(String),
    Computed(Box<dyn Fn(&Element) -> String + Send + Sync>),
}

impl NameGen {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Element) -> String + Send + Sync + 'static,
    {
        NameGen::Computed(Box::new(f))
    }

    pub fn generate(&self, elm: &Element) -> String {
        match self {
            NameGen::Constant(name) => name.clone(),
            NameGen::Computed(f) => f(elm),
        }
    }
}

impl fmt::Debug for NameGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameGen::Constant(name) => f.debug_tuple("Constant").field(name).finish(),
            NameGen::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for NameGen {
    fn from(name: &str) -> Self {
        NameGen::Constant(name.to_string())
    }
}

impl From<String> for NameGen {
    fn from(name: String) -> Self {
        NameGen::Constant(name)
    }
}

/// Apply `modifier` only to nodes accepted by `predicate`.
pub fn modify_if<M, P>(mut modifier: M, predicate: P) -> impl FnMut(&mut Node) + Send
where
    M: FnMut(&mut Node) + Send,
    P: Fn(&Node) -> bool + Send,
{
    move |node: &mut Node| {
        if predicate(&*node) {
            modifier(node);
        }
    }
}

fn class_list(elm: &Element) -> Option<Vec<String>> {
    elm.attr("class")
        .map(|_| elm.classes().map(str::to_string).collect())
}

fn set_class_list(elm: &mut Element, classes: Vec<String>) {
    elm.set_attr("class", classes.join(" "));
}

/// Add the class when missing, drop every occurrence when present.
///
/// Toggling the last class away leaves an empty `class` attribute.
pub fn toggle_class(class: impl Into<NameGen>) -> impl FnMut(&mut Node) + Send {
    let class = class.into();
    move |node: &mut Node| {
        let Some(elm) = node.as_element_mut() else {
            return;
        };
        let name = class.generate(elm);
        let classes = match class_list(elm) {
            None => vec![name],
            Some(mut classes) if !classes.contains(&name) => {
                classes.push(name);
                classes
            }
            Some(classes) => classes.into_iter().filter(|c| *c != name).collect(),
        };
        set_class_list(elm, classes);
    }
}

/// Drop every occurrence of the class. Elements without a `class` attribute are left alone.
pub fn remove_class(class: impl Into<NameGen>) -> impl FnMut(&mut Node) + Send {
    let class = class.into();
    move |node: &mut Node| {
        let Some(elm) = node.as_element_mut() else {
            return;
        };
        let name = class.generate(elm);
        if let Some(classes) = class_list(elm) {
            set_class_list(elm, classes.into_iter().filter(|c| *c != name).collect());
        }
    }
}

/// Add the class unless already present.
pub fn set_class(class: impl Into<NameGen>) -> impl FnMut(&mut Node) + Send {
    let class = class.into();
    move |node: &mut Node| {
        let Some(elm) = node.as_element_mut() else {
            return;
        };
        let name = class.generate(elm);
        let mut classes = class_list(elm).unwrap_or_default();
        if !classes.contains(&name) {
            classes.push(name);
            set_class_list(elm, classes);
        }
    }
}

/// Append the class, even if it is already there.
pub fn add_class(class: impl Into<NameGen>) -> impl FnMut(&mut Node) + Send {
    let class = class.into();
    move |node: &mut Node| {
        let Some(elm) = node.as_element_mut() else {
            return;
        };
        let name = class.generate(elm);
        let mut classes = class_list(elm).unwrap_or_default();
        classes.push(name);
        set_class_list(elm, classes);
    }
}

pub fn change_tag_name(tag: impl Into<NameGen>) -> impl FnMut(&mut Node) + Send {
    let tag = tag.into();
    move |node: &mut Node| {
        if let Some(elm) = node.as_element_mut() {
            elm.name = tag.generate(elm);
        }
    }
}

/// Running count handed out by [`number_attribute`]; the first value is 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: usize,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_value(&mut self) -> usize {
        self.count += 1;
        self.count
    }

    pub fn current(&self) -> usize {
        self.count
    }
}

/// Context-driven mutator writing 1, 2, 3, ... into `attr` of every matching element.
///
/// Pair with `local_modify_with_factory(Counter::new, ...)` to restart the
/// numbering on every run.
pub fn number_attribute<P>(
    predicate: P,
    attr: impl Into<String>,
) -> impl FnMut(&mut Counter, &mut Node) + Send
where
    P: Fn(&Node) -> bool + Send,
{
    let attr = attr.into();
    move |counter: &mut Counter, node: &mut Node| {
        if !predicate(&*node) {
            return;
        }
        if let Some(elm) = node.as_element_mut() {
            elm.set_attr(attr.clone(), counter.next_value().to_string());
        }
    }
}
