use crate::dom::{Document, NodeId, NodeKind};
use crate::error::{LocatorError, Result};
use crate::xpath::parser::{Axis, CompareOp, Expr, Function, LocationPath, NodeTest, Step};

/// A node or an attribute of an element.
///
/// Ordering follows document order: an element's attributes sort after the
/// element itself and before its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    pub node: NodeId,
    /// Index into the owner's attribute map
    pub attribute: Option<usize>,
}

impl NodeRef {
    pub fn node(node: NodeId) -> Self {
        Self { node, attribute: None }
    }

    fn attribute(node: NodeId, index: usize) -> Self {
        Self {
            node,
            attribute: Some(index),
        }
    }
}

/// Result of evaluating an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    NodeSet(Vec<NodeRef>),
    String(String),
    Number(f64),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy)]
struct Context {
    item: NodeRef,
    position: usize,
    size: usize,
}

pub(crate) struct Evaluator<'a> {
    doc: &'a Document,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    pub(crate) fn evaluate(&self, expr: &Expr, context: NodeId) -> Result<Value> {
        if !self.doc.contains(context) {
            return Err(LocatorError::NodeNotFound(format!("{:?}", context)));
        }
        let ctx = Context {
            item: NodeRef::node(context),
            position: 1,
            size: 1,
        };
        self.eval(expr, &ctx)
    }

    fn eval(&self, expr: &Expr, ctx: &Context) -> Result<Value> {
        match expr {
            Expr::Or(left, right) => Ok(Value::Boolean(
                self.eval_bool(left, ctx)? || self.eval_bool(right, ctx)?,
            )),
            Expr::And(left, right) => Ok(Value::Boolean(
                self.eval_bool(left, ctx)? && self.eval_bool(right, ctx)?,
            )),
            Expr::Compare(op, left, right) => {
                let left = self.eval(left, ctx)?;
                let right = self.eval(right, ctx)?;
                Ok(Value::Boolean(self.compare(*op, &left, &right)))
            }
            Expr::Union(left, right) => {
                let mut nodes = self.eval_nodes(left, ctx)?;
                nodes.extend(self.eval_nodes(right, ctx)?);
                nodes.sort();
                nodes.dedup();
                Ok(Value::NodeSet(nodes))
            }
            Expr::Path(path) => self.eval_path(path, ctx).map(Value::NodeSet),
            Expr::Filter {
                primary,
                predicates,
                steps,
            } => {
                let mut nodes = self.eval_nodes(primary, ctx)?;
                for predicate in predicates {
                    nodes = self.filter(nodes, predicate)?;
                }
                for step in steps {
                    nodes = self.apply_step(&nodes, step)?;
                }
                Ok(Value::NodeSet(nodes))
            }
            Expr::Literal(value) => Ok(Value::String(value.clone())),
            Expr::Number(value) => Ok(Value::Number(*value)),
            Expr::Function(function, args) => self.call(*function, args, ctx),
        }
    }

    fn eval_bool(&self, expr: &Expr, ctx: &Context) -> Result<bool> {
        Ok(self.to_bool(&self.eval(expr, ctx)?))
    }

    fn eval_string(&self, expr: &Expr, ctx: &Context) -> Result<String> {
        Ok(self.to_string(&self.eval(expr, ctx)?))
    }

    fn eval_nodes(&self, expr: &Expr, ctx: &Context) -> Result<Vec<NodeRef>> {
        match self.eval(expr, ctx)? {
            Value::NodeSet(nodes) => Ok(nodes),
            other => Err(LocatorError::evaluation(format!(
                "expected a node-set, got {}",
                type_name(&other)
            ))),
        }
    }

    fn eval_path(&self, path: &LocationPath, ctx: &Context) -> Result<Vec<NodeRef>> {
        let mut nodes = if path.absolute {
            vec![NodeRef::node(self.doc.root())]
        } else {
            vec![ctx.item]
        };
        for step in &path.steps {
            nodes = self.apply_step(&nodes, step)?;
        }
        Ok(nodes)
    }

    fn apply_step(&self, inputs: &[NodeRef], step: &Step) -> Result<Vec<NodeRef>> {
        let mut out = Vec::new();
        for &input in inputs {
            let mut selected: Vec<NodeRef> = self
                .axis(input, step.axis)
                .into_iter()
                .filter(|&candidate| self.matches(candidate, step.axis, &step.test))
                .collect();
            for predicate in &step.predicates {
                selected = self.filter(selected, predicate)?;
            }
            out.extend(selected);
        }
        out.sort();
        out.dedup();
        Ok(out)
    }

    /// Keep the nodes for which `predicate` holds, with positions taken in
    /// the order the nodes are given.
    fn filter(&self, nodes: Vec<NodeRef>, predicate: &Expr) -> Result<Vec<NodeRef>> {
        let size = nodes.len();
        let mut kept = Vec::with_capacity(size);
        for (i, node) in nodes.into_iter().enumerate() {
            let ctx = Context {
                item: node,
                position: i + 1,
                size,
            };
            let keep = match self.eval(predicate, &ctx)? {
                Value::Number(n) => n == (i + 1) as f64,
                other => self.to_bool(&other),
            };
            if keep {
                kept.push(node);
            }
        }
        Ok(kept)
    }

    /// Nodes along `axis`, in proximity order.
    fn axis(&self, from: NodeRef, axis: Axis) -> Vec<NodeRef> {
        let doc = self.doc;
        let node = from.node;

        if from.attribute.is_some() {
            return match axis {
                Axis::SelfAxis | Axis::DescendantOrSelf => vec![from],
                Axis::Parent => vec![NodeRef::node(node)],
                Axis::Ancestor => std::iter::once(node)
                    .chain(doc.ancestors(node))
                    .map(NodeRef::node)
                    .collect(),
                Axis::AncestorOrSelf => std::iter::once(from)
                    .chain(std::iter::once(node).chain(doc.ancestors(node)).map(NodeRef::node))
                    .collect(),
                _ => Vec::new(),
            };
        }

        match axis {
            Axis::Child => doc.children(node).iter().copied().map(NodeRef::node).collect(),
            Axis::Descendant => doc.descendants(node).map(NodeRef::node).collect(),
            Axis::DescendantOrSelf => std::iter::once(node)
                .chain(doc.descendants(node))
                .map(NodeRef::node)
                .collect(),
            Axis::Parent => doc.parent(node).map(NodeRef::node).into_iter().collect(),
            Axis::Ancestor => doc.ancestors(node).map(NodeRef::node).collect(),
            Axis::AncestorOrSelf => std::iter::once(node)
                .chain(doc.ancestors(node))
                .map(NodeRef::node)
                .collect(),
            Axis::FollowingSibling | Axis::PrecedingSibling => {
                let Some(parent) = doc.parent(node) else {
                    return Vec::new();
                };
                let siblings = doc.children(parent);
                let Some(index) = siblings.iter().position(|&s| s == node) else {
                    return Vec::new();
                };
                if axis == Axis::FollowingSibling {
                    siblings[index + 1..].iter().copied().map(NodeRef::node).collect()
                } else {
                    siblings[..index].iter().rev().copied().map(NodeRef::node).collect()
                }
            }
            Axis::Following => doc
                .descendants(doc.root())
                .filter(|&other| other > node && !doc.is_ancestor_of(node, other))
                .map(NodeRef::node)
                .collect(),
            Axis::Preceding => {
                let mut nodes: Vec<NodeRef> = doc
                    .descendants(doc.root())
                    .filter(|&other| other < node && !doc.is_ancestor_of(other, node))
                    .map(NodeRef::node)
                    .collect();
                nodes.reverse();
                nodes
            }
            Axis::Attribute => doc
                .attributes(node)
                .map(|attrs| (0..attrs.len()).map(|i| NodeRef::attribute(node, i)).collect())
                .unwrap_or_default(),
            Axis::SelfAxis => vec![from],
        }
    }

    fn matches(&self, candidate: NodeRef, axis: Axis, test: &NodeTest) -> bool {
        if let Some(index) = candidate.attribute {
            // Attributes are only reachable by name through the attribute axis
            return match test {
                NodeTest::Node => true,
                NodeTest::Text => false,
                NodeTest::Any => axis == Axis::Attribute,
                NodeTest::Name(name) => {
                    axis == Axis::Attribute
                        && self
                            .attribute_entry(candidate.node, index)
                            .is_some_and(|(attr, _)| attr.eq_ignore_ascii_case(name))
                }
            };
        }

        match (test, self.doc.kind(candidate.node)) {
            (NodeTest::Node, Some(_)) => true,
            (NodeTest::Text, Some(NodeKind::Text(_))) => true,
            (NodeTest::Any, Some(NodeKind::Element { .. })) => axis != Axis::Attribute,
            (NodeTest::Name(name), Some(NodeKind::Element { tag_name, .. })) => {
                axis != Axis::Attribute && tag_name.eq_ignore_ascii_case(name)
            }
            _ => false,
        }
    }

    fn attribute_entry(&self, node: NodeId, index: usize) -> Option<(&'a str, &'a str)> {
        self.doc
            .attributes(node)?
            .get_index(index)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn string_value(&self, item: NodeRef) -> String {
        match item.attribute {
            Some(index) => self
                .attribute_entry(item.node, index)
                .map(|(_, value)| value.to_string())
                .unwrap_or_default(),
            None => self.doc.text_content(item.node),
        }
    }

    fn name_of(&self, item: NodeRef) -> String {
        match item.attribute {
            Some(index) => self
                .attribute_entry(item.node, index)
                .map(|(name, _)| name.to_string())
                .unwrap_or_default(),
            None => self.doc.tag_name(item.node).unwrap_or_default().to_string(),
        }
    }

    fn to_bool(&self, value: &Value) -> bool {
        match value {
            Value::NodeSet(nodes) => !nodes.is_empty(),
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Boolean(b) => *b,
        }
    }

    fn to_string(&self, value: &Value) -> String {
        match value {
            Value::NodeSet(nodes) => nodes.first().map(|&n| self.string_value(n)).unwrap_or_default(),
            Value::String(s) => s.clone(),
            Value::Number(n) => number_to_string(*n),
            Value::Boolean(b) => b.to_string(),
        }
    }

    fn to_number(&self, value: &Value) -> f64 {
        match value {
            Value::Number(n) => *n,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            other => string_to_number(&self.to_string(other)),
        }
    }

    fn compare(&self, op: CompareOp, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::NodeSet(l), Value::NodeSet(r)) => {
                let right_strings: Vec<String> = r.iter().map(|&n| self.string_value(n)).collect();
                l.iter().any(|&n| {
                    let left = self.string_value(n);
                    right_strings
                        .iter()
                        .any(|right| compare_atoms(op, &Value::String(left.clone()), &Value::String(right.clone())))
                })
            }
            (Value::NodeSet(nodes), other) => self.compare_node_set(op, nodes, other, false),
            (other, Value::NodeSet(nodes)) => self.compare_node_set(op, nodes, other, true),
            _ => compare_atoms(op, left, right),
        }
    }

    fn compare_node_set(&self, op: CompareOp, nodes: &[NodeRef], other: &Value, swapped: bool) -> bool {
        if let Value::Boolean(_) = other {
            let set = Value::Boolean(!nodes.is_empty());
            return if swapped {
                compare_atoms(op, other, &set)
            } else {
                compare_atoms(op, &set, other)
            };
        }
        nodes.iter().any(|&n| {
            let atom = match other {
                Value::Number(_) => Value::Number(string_to_number(&self.string_value(n))),
                _ => Value::String(self.string_value(n)),
            };
            if swapped {
                compare_atoms(op, other, &atom)
            } else {
                compare_atoms(op, &atom, other)
            }
        })
    }

    fn call(&self, function: Function, args: &[Expr], ctx: &Context) -> Result<Value> {
        let string_arg = |i: usize| -> Result<String> {
            match args.get(i) {
                Some(arg) => self.eval_string(arg, ctx),
                None => Ok(self.string_value(ctx.item)),
            }
        };

        Ok(match function {
            Function::Last => Value::Number(ctx.size as f64),
            Function::Position => Value::Number(ctx.position as f64),
            Function::Count => Value::Number(self.eval_nodes(&args[0], ctx)?.len() as f64),
            Function::String => Value::String(string_arg(0)?),
            Function::Concat => {
                let mut out = String::new();
                for arg in args {
                    out.push_str(&self.eval_string(arg, ctx)?);
                }
                Value::String(out)
            }
            Function::Contains => Value::Boolean(string_arg(0)?.contains(string_arg(1)?.as_str())),
            Function::StartsWith => Value::Boolean(string_arg(0)?.starts_with(string_arg(1)?.as_str())),
            Function::NormalizeSpace => {
                Value::String(string_arg(0)?.split_whitespace().collect::<Vec<_>>().join(" "))
            }
            Function::StringLength => Value::Number(string_arg(0)?.chars().count() as f64),
            Function::Not => Value::Boolean(!self.eval_bool(&args[0], ctx)?),
            Function::True => Value::Boolean(true),
            Function::False => Value::Boolean(false),
            Function::Boolean => Value::Boolean(self.eval_bool(&args[0], ctx)?),
            Function::Number => match args.first() {
                Some(arg) => Value::Number(self.to_number(&self.eval(arg, ctx)?)),
                None => Value::Number(string_to_number(&self.string_value(ctx.item))),
            },
            Function::Name | Function::LocalName => {
                let target = match args.first() {
                    Some(arg) => self.eval_nodes(arg, ctx)?.first().copied(),
                    None => Some(ctx.item),
                };
                let name = target.map(|n| self.name_of(n)).unwrap_or_default();
                match (function, name.split_once(':')) {
                    (Function::LocalName, Some((_, local))) => Value::String(local.to_string()),
                    _ => Value::String(name),
                }
            }
        })
    }
}

fn compare_atoms(op: CompareOp, left: &Value, right: &Value) -> bool {
    match op {
        CompareOp::Eq | CompareOp::NotEq => {
            let equal = match (left, right) {
                (Value::Boolean(_), _) | (_, Value::Boolean(_)) => atom_bool(left) == atom_bool(right),
                (Value::Number(_), _) | (_, Value::Number(_)) => atom_number(left) == atom_number(right),
                _ => atom_string(left) == atom_string(right),
            };
            (op == CompareOp::Eq) == equal
        }
        _ => {
            let (l, r) = (atom_number(left), atom_number(right));
            match op {
                CompareOp::Lt => l < r,
                CompareOp::Le => l <= r,
                CompareOp::Gt => l > r,
                _ => l >= r,
            }
        }
    }
}

fn atom_bool(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::NodeSet(nodes) => !nodes.is_empty(),
    }
}

fn atom_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => string_to_number(s),
        Value::NodeSet(_) => f64::NAN,
    }
}

fn atom_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(*n),
        Value::Boolean(b) => b.to_string(),
        Value::NodeSet(_) => String::new(),
    }
}

/// XPath number syntax only: optional minus, digits, optional fraction.
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let valid = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1
        && digits != ".";
    if valid {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::NodeSet(_) => "node-set",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Boolean(_) => "boolean",
    }
}
