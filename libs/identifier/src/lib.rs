//! Canonical identifier strings for captured access paths
//!
//! Given a tree describing a chain of member accesses, array indexing,
//! indexer calls and conversions (what a quoted lambda like
//! `x => x.Items[0].Name` looks like), this crate renders the canonical
//! string `Items[0].Name`. The strings are used as dictionary and route
//! keys, log field names and diagnostic labels.
//!
//! # Architecture Overview
//!
//! ```text
//! Lambda source ("x => x.A.B[i]")       hand-built Expr tree
//!      |                                        |
//!   Lexer -> Parser -> Expr  -------------------+
//!                        |
//!                  PathConverter  --(non-literal index)-->  SubexpressionEvaluator
//!                        |
//!                 "A.B[42]"
//! ```
//!
//! # Example
//!
//! ```rust
//! use pathkey_identifier::{
//!     parse_lambda, to_identifier_string_bound, Bindings, ConversionOptions,
//!     StaticMemberConversion,
//! };
//!
//! let path = parse_lambda("x => x.TestClassListProperty[i]").unwrap();
//! let bindings = Bindings::new().bind("i", 42);
//! assert_eq!(
//!     to_identifier_string_bound(&path, None, &bindings).unwrap(),
//!     "TestClassListProperty[42]"
//! );
//!
//! let path = parse_lambda("x => Tests.IdentifierTests::StaticTestProperty").unwrap();
//! let options = ConversionOptions::default()
//!     .with_static_member_conversion(StaticMemberConversion::ParentTypeName);
//! assert_eq!(
//!     to_identifier_string_bound(&path, Some(&options), &bindings).unwrap(),
//!     "IdentifierTests.StaticTestProperty"
//! );
//! ```

pub mod ast;
pub mod converter;
pub mod error;
pub mod evaluator;
pub mod identifier;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod token;
pub mod value;
pub mod visualize;

// Re-export main types
pub use ast::{BinaryOperator, Expr, TypeName, INDEXER_METHOD};
pub use converter::PathConverter;
pub use error::{Error, Result};
pub use evaluator::{Bindings, Interpreter, SubexpressionEvaluator};
pub use identifier::{to_identifier_string, to_identifier_string_bound, to_identifier_string_with};
pub use options::{ConversionOptions, StaticMemberConversion, DEFAULT_SEPARATOR};
pub use parser::{parse_expression, parse_lambda};
pub use value::Value;
pub use visualize::{VisualizationFormat, Visualize};
