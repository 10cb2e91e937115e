//! # qp8 Query Language - Abstract Syntax Tree
//!
//! The tree the [`Parser`](crate::parser::Parser) builds from a query such as
//!
//! ```text
//! SELECT name, dept FROM employees WHERE dept IN (SELECT dept FROM offices), name LIKE 'J%';
//! ```
//!
//! ## Grammar
//!
//! ```text
//! query     = SELECT selList FROM fromList [WHERE condList ";"] .
//! selList   = attribute ("," attribute)* .
//! fromList  = relation ("," relation)* .
//! condList  = condition ("," condition)* .
//! condition = term (AND term)* .
//! term      = "(" condition ")"
//!           | attribute "=" attribute
//!           | attribute IN "(" query ")"
//!           | attribute LIKE pattern .
//! attribute = identifier ("." identifier)* .
//! ```
//!
//! A sub-query inside `IN ( ... )` ends at its closing parenthesis and takes
//! no `;`.
//!
//! ## Modules
//!
//! - **[tokens]** - Grammar tokens produced by the lexer
//! - **[query]** - [`Query`] and its select, from, and condition lists
//! - **[condition]** - The [`Condition`] sum type
//! - **[terms]** - Named terminals: [`Attribute`], [`Relation`], [`Pattern`]
//!
//! Every node owns its children. Rendering a node with `Display` produces
//! canonical query text that parses back to an equal tree.
pub mod condition;
pub mod query;
pub mod terms;
pub mod tokens;

pub use condition::Condition;
pub use query::{CondList, FromList, Query, SelList};
pub use terms::{Attribute, Pattern, Relation};
pub use tokens::Token;
