//! Access path → identifier string conversion
//!
//! The converter walks from the outermost access (the end of the chain)
//! toward the root, collecting fragments as it goes. Fragments therefore
//! arrive leaf-first and are joined in reverse so the result reads
//! root-to-leaf, e.g. `x => x.A.B[0].C` becomes `A.B[0].C`.

use crate::ast::Expr;
use crate::error::{Error, Result};
use crate::evaluator::SubexpressionEvaluator;
use crate::options::{ConversionOptions, StaticMemberConversion};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Fragments of one conversion, leaf-first.
type Fragments<'a> = SmallVec<[Cow<'a, str>; 16]>;

/// Classifies access-path nodes and renders them.
///
/// Holds only borrowed, read-only state, so one converter can be shared
/// across threads.
pub struct PathConverter<'a> {
    options: &'a ConversionOptions,
    evaluator: &'a dyn SubexpressionEvaluator,
}

impl<'a> PathConverter<'a> {
    pub fn new(options: &'a ConversionOptions, evaluator: &'a dyn SubexpressionEvaluator) -> Self {
        Self { options, evaluator }
    }

    /// Convert a path to its identifier string.
    ///
    /// A top-level lambda is unwrapped to its body.
    pub fn convert(&self, expression: &'a Expr) -> Result<String> {
        let body = match expression {
            Expr::Lambda { body, .. } => body.as_ref(),
            other => other,
        };

        let mut fragments = Fragments::new();
        self.collect(body, &mut fragments)?;

        let len = fragments.iter().map(|f| f.len()).sum();
        let mut identifier = String::with_capacity(len);
        for fragment in fragments.iter().rev() {
            identifier.push_str(fragment);
        }
        Ok(identifier)
    }

    fn collect(&self, expression: &'a Expr, fragments: &mut Fragments<'a>) -> Result<()> {
        let mut node = expression;
        loop {
            tracing::trace!(kind = node.kind(), "classifying path node");
            match node {
                Expr::Parameter { .. } | Expr::Constant(_) => return Ok(()),

                Expr::Convert { operand, .. } => node = operand.as_ref(),

                Expr::Member {
                    name,
                    declaring_type,
                    target,
                } => {
                    fragments.push(Cow::Borrowed(name.as_str()));
                    let Some(target) = target else {
                        let parent = match self.options.static_member_conversion {
                            StaticMemberConversion::MemberNameOnly => None,
                            StaticMemberConversion::ParentTypeName => Some(&declaring_type.name),
                            StaticMemberConversion::ParentTypeFullName => {
                                Some(&declaring_type.full_name)
                            }
                        };
                        if let Some(parent) = parent {
                            fragments.push(Cow::Borrowed(self.options.separator.as_str()));
                            fragments.push(Cow::Borrowed(parent.as_str()));
                        }
                        return Ok(());
                    };
                    // A bare root renders as nothing, so nothing separates it from the first member.
                    if !target.is_root() {
                        fragments.push(Cow::Borrowed(self.options.separator.as_str()));
                    }
                    node = target.as_ref();
                }

                Expr::ArrayIndex { array, index } => {
                    fragments.push(Cow::Owned(format!("[{}]", index)));
                    node = array.as_ref();
                }

                Expr::Call { .. } => {
                    let (target, argument) = node
                        .as_indexer()
                        .ok_or_else(|| Error::unsupported(node))?;
                    let index = match argument {
                        Expr::Constant(value) => value.to_index_string(),
                        other => self.evaluator.evaluate(other)?.to_index_string(),
                    };
                    fragments.push(Cow::Owned(format!("[{}]", index)));
                    node = target;
                }

                Expr::Variable { .. }
                | Expr::Binary { .. }
                | Expr::Negate { .. }
                | Expr::Lambda { .. } => return Err(Error::unsupported(node)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeName;
    use crate::evaluator::Interpreter;

    fn convert(expression: &Expr, options: &ConversionOptions) -> Result<String> {
        let interpreter = Interpreter::default();
        PathConverter::new(options, &interpreter).convert(expression)
    }

    #[test]
    fn separator_is_kept_after_converted_root() {
        let expr = Expr::member(
            Expr::convert(Expr::parameter("x"), TypeName::from_full_name("Base")),
            "Id",
        );
        assert_eq!(convert(&expr, &ConversionOptions::default()).unwrap(), ".Id");

        let options = ConversionOptions::default().with_separator("/");
        assert_eq!(convert(&expr, &options).unwrap(), "/Id");
    }

    #[test]
    fn separator_is_skipped_after_bare_root() {
        let expr = Expr::member(Expr::parameter("x"), "Id");
        assert_eq!(convert(&expr, &ConversionOptions::default()).unwrap(), "Id");
    }

    #[test]
    fn separator_is_kept_before_converted_member() {
        let expr = Expr::member(
            Expr::convert(
                Expr::member(Expr::parameter("x"), "Owner"),
                TypeName::from_full_name("Person"),
            ),
            "Name",
        );
        let options = ConversionOptions::default().with_separator("/");
        assert_eq!(convert(&expr, &options).unwrap(), "Owner/Name");
    }

    #[test]
    fn static_member_ends_the_walk() {
        let expr = Expr::member(
            Expr::static_member(TypeName::from_full_name("App.Settings"), "Current"),
            "Theme",
        );
        let options = ConversionOptions::default()
            .with_static_member_conversion(StaticMemberConversion::ParentTypeName);
        assert_eq!(convert(&expr, &options).unwrap(), "Settings.Current.Theme");
    }
}
