// ABOUTME: Predicate factories over nodes: name, attribute, class and descendant matchers plus combinators.
// ABOUTME: StringMatch normalizes literal, literal-set, and custom comparators once, case-insensitive by default.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use crate::node::Node;

/// A boxed node predicate.
pub type Predicate = Box<dyn Fn(&Node) -> bool + Send + Sync>;

/// A boxed string comparator used by [`StringMatch::Custom`].
pub type StringFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Box a closure as a [`Predicate`].
pub fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&Node) -> bool + Send + Sync + 'static,
{
    Box::new(f)
}

pub fn always() -> Predicate {
    Box::new(|_: &Node| true)
}

pub fn never() -> Predicate {
    Box::new(|_: &Node| false)
}

pub fn not(inner: Predicate) -> Predicate {
    Box::new(move |node: &Node| !inner(node))
}

/// True as soon as one predicate holds; false for an empty list.
pub fn any_of(predicates: Vec<Predicate>) -> Predicate {
    Box::new(move |node: &Node| predicates.iter().any(|p| p(node)))
}

/// False as soon as one predicate fails; true for an empty list.
pub fn all_of(predicates: Vec<Predicate>) -> Predicate {
    Box::new(move |node: &Node| predicates.iter().all(|p| p(node)))
}

pub fn is_element() -> Predicate {
    Box::new(Node::is_element)
}

pub fn is_text() -> Predicate {
    Box::new(Node::is_text)
}

pub fn is_document() -> Predicate {
    Box::new(Node::is_document)
}

/// What a string should be compared against.
pub enum StringMatch {
    Literal(String),
    LiteralSet(Vec<String>),
    Custom(StringFn),
}

impl StringMatch {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        StringMatch::Custom(Box::new(f))
    }
}

impl fmt::Debug for StringMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringMatch::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            StringMatch::LiteralSet(set) => f.debug_tuple("LiteralSet").field(set).finish(),
            StringMatch::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for StringMatch {
    fn from(s: &str) -> Self {
        StringMatch::Literal(s.to_string())
    }
}

impl From<String> for StringMatch {
    fn from(s: String) -> Self {
        StringMatch::Literal(s)
    }
}

impl<const N: usize> From<[&str; N]> for StringMatch {
    fn from(values: [&str; N]) -> Self {
        StringMatch::LiteralSet(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<&[&str]> for StringMatch {
    fn from(values: &[&str]) -> Self {
        StringMatch::LiteralSet(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<Vec<&str>> for StringMatch {
    fn from(values: Vec<&str>) -> Self {
        StringMatch::LiteralSet(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for StringMatch {
    fn from(values: Vec<String>) -> Self {
        StringMatch::LiteralSet(values)
    }
}

enum Comparator {
    Literal(String),
    Set(HashSet<String>),
    Custom(StringFn),
}

/// A [`StringMatch`] resolved into a single comparator.
///
/// With `ignore_case`, literals are lower-cased here and every candidate is
/// lower-cased before comparison, custom functions included.
pub struct StringMatcher {
    comparator: Comparator,
    ignore_case: bool,
}

impl StringMatcher {
    pub fn new(target: impl Into<StringMatch>, ignore_case: bool) -> Self {
        let fold = |s: String| if ignore_case { s.to_lowercase() } else { s };
        let comparator = match target.into() {
            StringMatch::Literal(s) => Comparator::Literal(fold(s)),
            StringMatch::LiteralSet(values) => {
                Comparator::Set(values.into_iter().map(fold).collect())
            }
            StringMatch::Custom(f) => Comparator::Custom(f),
        };
        Self {
            comparator,
            ignore_case,
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let candidate: Cow<'_, str> = if self.ignore_case {
            Cow::Owned(candidate.to_lowercase())
        } else {
            Cow::Borrowed(candidate)
        };
        match &self.comparator {
            Comparator::Literal(s) => s.as_str() == candidate.as_ref(),
            Comparator::Set(set) => set.contains(candidate.as_ref()),
            Comparator::Custom(f) => f(candidate.as_ref()),
        }
    }
}

/// Element whose name matches, ignoring case.
pub fn has_name(name: impl Into<StringMatch>) -> Predicate {
    has_name_case(name, true)
}

pub fn has_name_case(name: impl Into<StringMatch>, ignore_case: bool) -> Predicate {
    let matcher = StringMatcher::new(name, ignore_case);
    Box::new(move |node: &Node| node.name().is_some_and(|n| matcher.matches(n)))
}

/// Element carrying an attribute whose key matches (case-sensitive).
pub fn has_attribute(key: impl Into<StringMatch>) -> Predicate {
    let matcher = StringMatcher::new(key, false);
    Box::new(move |node: &Node| {
        node.as_element()
            .is_some_and(|elm| elm.attrs.keys().any(|k| matcher.matches(k)))
    })
}

/// Element carrying an attribute whose key and value both match.
pub fn has_attribute_value(
    key: impl Into<StringMatch>,
    value: impl Into<StringMatch>,
    ignore_case_value: bool,
) -> Predicate {
    let key = StringMatcher::new(key, false);
    let value = StringMatcher::new(value, ignore_case_value);
    Box::new(move |node: &Node| {
        node.as_element().is_some_and(|elm| {
            elm.attrs
                .iter()
                .any(|(k, v)| key.matches(k) && value.matches(v))
        })
    })
}

/// Element with at least one class that matches, ignoring case.
pub fn has_class(class: impl Into<StringMatch>) -> Predicate {
    let matcher = StringMatcher::new(class, true);
    Box::new(move |node: &Node| {
        node.as_element()
            .is_some_and(|elm| elm.classes().any(|c| matcher.matches(c)))
    })
}

/// Element with a direct element child whose name matches, ignoring case.
pub fn has_children_of_type(name: impl Into<StringMatch>) -> Predicate {
    has_children_of_type_case(name, true)
}

pub fn has_children_of_type_case(name: impl Into<StringMatch>, ignore_case: bool) -> Predicate {
    let matcher = StringMatcher::new(name, ignore_case);
    Box::new(move |node: &Node| {
        node.is_element()
            && node
                .children()
                .iter()
                .any(|c| c.name().is_some_and(|n| matcher.matches(n)))
    })
}

/// Element with an element descendant, at any depth, whose name matches, ignoring case.
pub fn has_descendants_of_type(name: impl Into<StringMatch>) -> Predicate {
    has_descendants_of_type_case(name, true)
}

pub fn has_descendants_of_type_case(
    name: impl Into<StringMatch>,
    ignore_case: bool,
) -> Predicate {
    let matcher = StringMatcher::new(name, ignore_case);
    Box::new(move |node: &Node| node.is_element() && any_descendant(node, &matcher))
}

fn any_descendant(node: &Node, matcher: &StringMatcher) -> bool {
    node.children().iter().any(|child| {
        child.name().is_some_and(|n| matcher.matches(n)) || any_descendant(child, matcher)
    })
}

/// Element whose name matches and which holds only whitespace text.
pub fn is_blank_element(name: impl Into<StringMatch>) -> Predicate {
    let matcher = StringMatcher::new(name, true);
    Box::new(move |node: &Node| {
        node.name().is_some_and(|n| matcher.matches(n)) && node.is_blank()
    })
}
