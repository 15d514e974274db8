//! XPath 1.0 evaluation over a [`Document`].
//!
//! Covers location paths with all axes except namespace, abbreviated steps,
//! positional and boolean predicates, unions, comparisons, filter
//! expressions and the core string/boolean/node-set functions. Arithmetic
//! operators are not supported.

mod eval;
mod lexer;
pub mod literal;
mod parser;

pub use eval::{NodeRef, Value};
pub use literal::quote;

use crate::dom::{Document, NodeId};
use crate::error::{LocatorError, Result};
use eval::Evaluator;
use parser::Expr;

/// A parsed expression, reusable across documents and context nodes
#[derive(Debug, Clone)]
pub struct XPath {
    source: String,
    expr: Expr,
}

impl XPath {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            source: source.to_string(),
            expr: parser::parse(source)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluate to any XPath value
    pub fn evaluate(&self, doc: &Document, context: NodeId) -> Result<Value> {
        Evaluator::new(doc).evaluate(&self.expr, context)
    }

    /// Evaluate to a node-set of tree nodes, in document order
    pub fn select(&self, doc: &Document, context: NodeId) -> Result<Vec<NodeId>> {
        match self.evaluate(doc, context)? {
            Value::NodeSet(nodes) => nodes
                .into_iter()
                .map(|n| match n.attribute {
                    None => Ok(n.node),
                    Some(_) => Err(LocatorError::evaluation(format!(
                        "'{}' selects attribute nodes",
                        self.source
                    ))),
                })
                .collect(),
            _ => Err(LocatorError::evaluation(format!(
                "'{}' does not evaluate to a node-set",
                self.source
            ))),
        }
    }
}

/// Parse and evaluate `expression` against `doc` with `context` as the
/// context node.
pub fn select(doc: &Document, expression: &str, context: NodeId) -> Result<Vec<NodeId>> {
    XPath::parse(expression)?.select(doc, context)
}
