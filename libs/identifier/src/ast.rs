//! Expression tree for captured access paths
//!
//! [`Expr`] is the tree a caller hands to the converter. It mirrors what a
//! quoting facility produces for a lambda such as `x => x.Items[0].Name`:
//!
//! ```text
//! Member "Name"
//!   └─ ArrayIndex 0
//!        └─ Member "Items"
//!             └─ Parameter x
//! ```
//!
//! Only five shapes form a valid path (root, conversion, member access, array
//! index and indexer call). The remaining shapes exist so that indexer
//! arguments can be arbitrary sub-expressions and so that unsupported paths
//! can be reported with their source text.

use crate::value::Value;
use std::fmt;

/// Name of the `get element at index` method an indexer compiles to.
pub const INDEXER_METHOD: &str = "get_Item";

/// Declaring type of a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypeName {
    /// Short type name, e.g. `IdentifierTests`
    pub name: String,
    /// Namespace-qualified type name, e.g. `Pathkey.Tests.IdentifierTests`
    pub full_name: String,
}

impl TypeName {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
        }
    }

    /// Build a type name from a dotted full name; the short name is the last segment.
    pub fn from_full_name(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let name = full_name
            .rsplit('.')
            .next()
            .unwrap_or(full_name.as_str())
            .to_string();
        Self { name, full_name }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // ============================================
    // Roots
    // ============================================
    /// The lambda's own input parameter
    Parameter { name: String },

    /// A constant; a path root when it starts a chain, a literal when used as an index
    Constant(Value),

    // ============================================
    // Path steps
    // ============================================
    /// Transparent type conversion: `(T)operand`
    Convert {
        operand: Box<Expr>,
        target_type: TypeName,
    },

    /// Member access. `target` is `None` for static members.
    Member {
        name: String,
        declaring_type: TypeName,
        target: Option<Box<Expr>>,
    },

    /// Array element access with an index known when the tree was built
    ArrayIndex { array: Box<Expr>, index: i64 },

    /// Method call; `get_Item` with one argument is an indexer
    Call {
        method: String,
        target: Option<Box<Expr>>,
        arguments: Vec<Expr>,
    },

    // ============================================
    // Index sub-expressions
    // ============================================
    /// A variable captured from the enclosing scope
    Variable { name: String },

    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Negate { operand: Box<Expr> },

    /// `parameter => body`; only meaningful at the top of a tree
    Lambda { parameter: String, body: Box<Expr> },
}

impl Expr {
    pub fn parameter(name: impl Into<String>) -> Self {
        Expr::Parameter { name: name.into() }
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable { name: name.into() }
    }

    /// Instance member access on `target`.
    pub fn member(target: Expr, name: impl Into<String>) -> Self {
        Expr::Member {
            name: name.into(),
            declaring_type: TypeName::default(),
            target: Some(Box::new(target)),
        }
    }

    /// Static member access; no owning object.
    pub fn static_member(declaring_type: TypeName, name: impl Into<String>) -> Self {
        Expr::Member {
            name: name.into(),
            declaring_type,
            target: None,
        }
    }

    pub fn convert(operand: Expr, target_type: TypeName) -> Self {
        Expr::Convert {
            operand: Box::new(operand),
            target_type,
        }
    }

    pub fn array_index(array: Expr, index: i64) -> Self {
        Expr::ArrayIndex {
            array: Box::new(array),
            index,
        }
    }

    /// Indexer getter call: `target[argument]`.
    pub fn indexer(target: Expr, argument: Expr) -> Self {
        Expr::call(Some(target), INDEXER_METHOD, vec![argument])
    }

    pub fn call(target: Option<Expr>, method: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            method: method.into(),
            target: target.map(Box::new),
            arguments,
        }
    }

    pub fn binary(operator: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::Negate {
            operand: Box::new(operand),
        }
    }

    pub fn lambda(parameter: impl Into<String>, body: Expr) -> Self {
        Expr::Lambda {
            parameter: parameter.into(),
            body: Box::new(body),
        }
    }

    /// Whether this node starts a path: the lambda parameter or a root constant.
    pub fn is_root(&self) -> bool {
        matches!(self, Expr::Parameter { .. } | Expr::Constant(_))
    }

    /// Variant name, for logging without rendering the subtree.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Parameter { .. } => "Parameter",
            Expr::Constant(_) => "Constant",
            Expr::Convert { .. } => "Convert",
            Expr::Member { target: None, .. } => "StaticMember",
            Expr::Member { .. } => "Member",
            Expr::ArrayIndex { .. } => "ArrayIndex",
            Expr::Call { .. } => "Call",
            Expr::Variable { .. } => "Variable",
            Expr::Binary { .. } => "Binary",
            Expr::Negate { .. } => "Negate",
            Expr::Lambda { .. } => "Lambda",
        }
    }

    fn is_leaf(&self) -> bool {
        match self {
            Expr::Parameter { .. } | Expr::Constant(_) | Expr::Variable { .. } => true,
            Expr::Member { target, .. } => target.is_none(),
            Expr::Call {
                target, arguments, ..
            } => target.is_none() && arguments.is_empty(),
            _ => false,
        }
    }

    /// Move every non-leaf child onto `stack`, leaving leaves in its place.
    fn detach_children(&mut self, stack: &mut Vec<Expr>) {
        fn detach(child: &mut Expr, stack: &mut Vec<Expr>) {
            if !child.is_leaf() {
                stack.push(std::mem::replace(child, Expr::Constant(Value::Null)));
            }
        }

        match self {
            Expr::Parameter { .. } | Expr::Constant(_) | Expr::Variable { .. } => {}
            Expr::Convert { operand, .. } | Expr::Negate { operand } => detach(operand, stack),
            Expr::Member { target, .. } => {
                if let Some(target) = target {
                    detach(target, stack);
                }
            }
            Expr::ArrayIndex { array, .. } => detach(array, stack),
            Expr::Call {
                target, arguments, ..
            } => {
                if let Some(target) = target {
                    detach(target, stack);
                }
                for argument in arguments.iter_mut() {
                    detach(argument, stack);
                }
            }
            Expr::Binary { left, right, .. } => {
                detach(left, stack);
                detach(right, stack);
            }
            Expr::Lambda { body, .. } => detach(body, stack),
        }
    }

    /// Target and argument of an indexer getter call, if this node is one.
    pub fn as_indexer(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Expr::Call {
                method,
                target: Some(target),
                arguments,
            } if method == INDEXER_METHOD && arguments.len() == 1 => {
                Some((target.as_ref(), &arguments[0]))
            }
            _ => None,
        }
    }
}

// Chains can be far deeper than the call stack allows for the derived,
// recursive drop glue.
impl Drop for Expr {
    fn drop(&mut self) {
        if self.is_leaf() {
            return;
        }
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

/// Literal source form, used in diagnostics and accepted by the parser.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter { name } | Expr::Variable { name } => f.write_str(name),
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Convert {
                operand,
                target_type,
            } => write!(f, "(({}){})", target_type, operand),
            Expr::Member {
                name,
                declaring_type,
                target,
            } => match target {
                Some(target) => write!(f, "{}.{}", target, name),
                None => write!(f, "{}::{}", declaring_type, name),
            },
            Expr::ArrayIndex { array, index } => write!(f, "{}[{}]", array, index),
            Expr::Call {
                method,
                target,
                arguments,
            } => {
                if let Some(target) = target {
                    write!(f, "{}.", target)?;
                }
                write!(f, "{}(", method)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator.symbol(), right),
            Expr::Negate { operand } => write!(f, "-{}", operand),
            Expr::Lambda { parameter, body } => write!(f, "{} => {}", parameter, body),
        }
    }
}
