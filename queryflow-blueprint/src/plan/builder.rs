use crate::operator::Operator;
use crate::plan::Blueprint;

/// A utility builder for blueprint trees.
///
/// ```
/// use queryflow_blueprint::operator::{And, Or, Term};
/// use queryflow_blueprint::plan::{RootBuilder, TreeBuilder};
///
/// let blueprint = RootBuilder::new(And)
///     .leaf(Term::new("title", "rust", 100))
///     .begin_node(Or)
///         .leaf(Term::new("body", "tokio", 20))
///         .leaf(Term::new("body", "async", 300))
///     .end_node()
///     .end_node();
///
/// assert_eq!(2, blueprint.children().len());
/// ```
pub trait TreeBuilder: Sized {
    type Output;

    fn begin_node<O: Into<Operator>>(self, operator: O) -> NonRootBuilder<Self> {
        NonRootBuilder {
            parent: self,
            operator: operator.into(),
            children: vec![],
        }
    }

    fn leaf<O: Into<Operator>>(self, operator: O) -> Self {
        self.add_child(Blueprint::leaf(operator))
    }

    fn end_node(self) -> Self::Output;

    fn add_child(self, child: Blueprint) -> Self;
}

pub struct RootBuilder {
    operator: Operator,
    children: Vec<Blueprint>,
}

impl RootBuilder {
    pub fn new<O: Into<Operator>>(operator: O) -> Self {
        Self {
            operator: operator.into(),
            children: vec![],
        }
    }
}

pub struct NonRootBuilder<P> {
    parent: P,
    operator: Operator,
    children: Vec<Blueprint>,
}

impl TreeBuilder for RootBuilder {
    type Output = Blueprint;

    fn end_node(self) -> Blueprint {
        Blueprint::new(self.operator, self.children)
    }

    fn add_child(mut self, child: Blueprint) -> Self {
        self.children.push(child);
        self
    }
}

impl<P: TreeBuilder> TreeBuilder for NonRootBuilder<P> {
    type Output = P;

    fn end_node(self) -> P {
        self.parent
            .add_child(Blueprint::new(self.operator, self.children))
    }

    fn add_child(mut self, child: Blueprint) -> Self {
        self.children.push(child);
        self
    }
}
