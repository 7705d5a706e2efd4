// ABOUTME: Pipeline composition: lifting single-node rewrites to sequence stages and chaining stages.
// ABOUTME: Provides the Stage trait, Pipeline, join, and stage factories for every rewrite primitive.

use crate::error::RewriteError;
use crate::node::Node;
use crate::rewrite::{
    filter, flatten, join_children, lateral_effect, local_modify, local_modify_with, unwrap,
};

/// A sequence-to-sequence rewrite step.
pub trait Stage {
    fn apply(&mut self, nodes: Vec<Node>) -> Vec<Node>;
}

impl<F> Stage for F
where
    F: FnMut(Vec<Node>) -> Vec<Node>,
{
    fn apply(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        self(nodes)
    }
}

pub type BoxedStage = Box<dyn Stage + Send>;

/// An ordered chain of stages, applied left to right.
///
/// A pipeline is itself a [`Stage`], so pipelines nest; grouping does not
/// change the result.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<BoxedStage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a stage.
    pub fn stage<S>(mut self, stage: S) -> Self
    where
        S: Stage + Send + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn push(&mut self, stage: BoxedStage) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Feed `nodes` through every stage in order.
    pub fn run(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        self.stages
            .iter_mut()
            .fold(nodes, |current, stage| stage.apply(current))
    }

    /// Run over a single root and require exactly one result.
    pub fn run_single(&mut self, root: Node) -> Result<Node, RewriteError> {
        expect_single(self.run(vec![root]))
    }
}

impl Stage for Pipeline {
    fn apply(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        self.run(nodes)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Chain `stages` into one pipeline. An empty list is the identity.
pub fn join<I>(stages: I) -> Pipeline
where
    I: IntoIterator<Item = BoxedStage>,
{
    Pipeline {
        stages: stages.into_iter().collect(),
    }
}

/// Unwrap a result sequence that must hold exactly one node.
pub fn expect_single(nodes: Vec<Node>) -> Result<Node, RewriteError> {
    let count = nodes.len();
    let mut nodes = nodes.into_iter();
    match (nodes.next(), nodes.next()) {
        (Some(node), None) => Ok(node),
        _ => Err(RewriteError::multiplicity(count)),
    }
}

/// Lift a single-node rewrite into a stage: apply it to each input and concatenate.
pub fn single_to_multiple<F>(mut node_fn: F) -> impl FnMut(Vec<Node>) -> Vec<Node>
where
    F: FnMut(Node) -> Vec<Node>,
{
    move |nodes: Vec<Node>| nodes.into_iter().flat_map(&mut node_fn).collect()
}

/// Same as [`single_to_multiple`] over optional inputs; absent entries are skipped.
pub fn single_to_multiple_opt<F>(mut node_fn: F) -> impl FnMut(Vec<Option<Node>>) -> Vec<Node>
where
    F: FnMut(Node) -> Vec<Node>,
{
    move |nodes: Vec<Option<Node>>| nodes.into_iter().flatten().flat_map(&mut node_fn).collect()
}

pub fn filter_factory<P>(should_remove: P) -> impl FnMut(Vec<Node>) -> Vec<Node> + Send
where
    P: Fn(&Node) -> bool + Send,
{
    single_to_multiple(move |node| filter(&should_remove, node))
}

pub fn unwrap_factory<P>(should_unwrap: P) -> impl FnMut(Vec<Node>) -> Vec<Node> + Send
where
    P: Fn(&Node) -> bool + Send,
{
    single_to_multiple(move |node| unwrap(&should_unwrap, node))
}

pub fn flatten_factory<F, I>(
    flatten_children: F,
    is_internal: I,
) -> impl FnMut(Vec<Node>) -> Vec<Node> + Send
where
    F: Fn(&Node) -> bool + Send,
    I: Fn(&Node) -> bool + Send,
{
    single_to_multiple(move |node| flatten(&flatten_children, &is_internal, node))
}

pub fn join_children_factory<J>(join_pair: J) -> impl FnMut(Vec<Node>) -> Vec<Node> + Send
where
    J: Fn(Node, Node) -> Vec<Node> + Send,
{
    single_to_multiple(move |node| join_children(&join_pair, node))
}

pub fn local_modify_factory<M>(mut mutator: M) -> impl FnMut(Vec<Node>) -> Vec<Node> + Send
where
    M: FnMut(&mut Node) + Send,
{
    single_to_multiple(move |node| local_modify(&mut mutator, node))
}

/// A local-modify stage whose context is built fresh by `init` on every run.
///
/// Counters and similar per-document state live in the context, so
/// repeated or concurrent runs never share it.
pub fn local_modify_with_factory<C, I, M>(
    mut init: I,
    mut mutator: M,
) -> impl FnMut(Vec<Node>) -> Vec<Node> + Send
where
    I: FnMut() -> C + Send,
    M: FnMut(&mut C, &mut Node) + Send,
{
    move |nodes: Vec<Node>| {
        let mut context = init();
        nodes
            .into_iter()
            .flat_map(|node| local_modify_with(&mut context, &mut mutator, node))
            .collect()
    }
}

pub fn lateral_effect_factory<E>(mut effect: E) -> impl FnMut(Vec<Node>) -> Vec<Node> + Send
where
    E: FnMut() + Send,
{
    move |nodes: Vec<Node>| lateral_effect(&mut effect, nodes)
}
