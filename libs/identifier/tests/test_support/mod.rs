#![allow(dead_code)]

use pathkey_identifier::{Expr, TypeName};

pub const TEST_TYPE: &str = "Pathkey.Tests.IdentifierTests";

/// The lambda parameter every fixture path starts from.
pub fn root() -> Expr {
    Expr::parameter("x")
}

/// `x.a.b.c` for `path(&["a", "b", "c"])`.
pub fn path(members: &[&str]) -> Expr {
    members
        .iter()
        .fold(root(), |target, name| Expr::member(target, *name))
}

pub fn test_type() -> TypeName {
    TypeName::from_full_name(TEST_TYPE)
}

pub fn static_property(name: &str) -> Expr {
    Expr::static_member(test_type(), name)
}

/// Wrap `expr` in `depth` conversions.
pub fn wrap_in_conversions(expr: Expr, depth: usize) -> Expr {
    (0..depth).fold(expr, |inner, i| {
        Expr::convert(inner, TypeName::from_full_name(format!("System.Cast{}", i)))
    })
}
