use std::fmt;
use std::mem;

use serde::Serialize;

use crate::ast::{Attribute, Pattern, Query};

/// A single WHERE condition.
///
/// Exactly one form is held per value. Conditions nest through [`Condition::And`]
/// and, via [`Condition::In`], through whole sub-queries.
///
/// An `AND` chain is as deep as it is long, so dropping, comparing, and
/// rendering walk it with an explicit stack instead of recursing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Explicit conjunction
    ///
    /// Chains fold to the left: `x AND y AND z` is `And(And(x, y), z)`.
    /// Grouping with parentheses builds other shapes.
    ///
    /// # Example
    /// ```text
    /// a = b AND c LIKE 'x%'
    /// ```
    And {
        left: Box<Condition>,
        right: Box<Condition>,
    },

    /// Attribute-to-attribute equality
    ///
    /// # Example
    /// ```text
    /// r.a = s.a
    /// ```
    Equals { left: Attribute, right: Attribute },

    /// Membership in the result of a sub-query
    ///
    /// # Example
    /// ```text
    /// a IN (SELECT a FROM s)
    /// ```
    In {
        attribute: Attribute,
        query: Box<Query>,
    },

    /// Pattern match
    ///
    /// # Example
    /// ```text
    /// name LIKE 'J%'
    /// ```
    Like {
        attribute: Attribute,
        pattern: Pattern,
    },
}

impl Condition {
    pub fn and(left: Condition, right: Condition) -> Self {
        Condition::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn equals(left: Attribute, right: Attribute) -> Self {
        Condition::Equals { left, right }
    }

    pub fn is_in(attribute: Attribute, query: Query) -> Self {
        Condition::In {
            attribute,
            query: Box::new(query),
        }
    }

    pub fn like(attribute: Attribute, pattern: Pattern) -> Self {
        Condition::Like { attribute, pattern }
    }

    /// Moves the operands of an `And` onto `stack`, leaving leaves behind.
    fn detach_operands(&mut self, stack: &mut Vec<Condition>) {
        if let Condition::And { left, right } = self {
            stack.push(mem::replace(left.as_mut(), Condition::empty()));
            stack.push(mem::replace(right.as_mut(), Condition::empty()));
        }
    }

    /// Leaf used to fill a detached slot. Empty strings don't allocate.
    fn empty() -> Self {
        Condition::Equals {
            left: Attribute::new(String::new()),
            right: Attribute::new(String::new()),
        }
    }
}

impl Drop for Condition {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_operands(&mut stack);
        while let Some(mut condition) = stack.pop() {
            condition.detach_operands(&mut stack);
        }
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (
                    Condition::And { left, right },
                    Condition::And {
                        left: other_left,
                        right: other_right,
                    },
                ) => {
                    pending.push((left.as_ref(), other_left.as_ref()));
                    pending.push((right.as_ref(), other_right.as_ref()));
                }
                (
                    Condition::Equals { left, right },
                    Condition::Equals {
                        left: other_left,
                        right: other_right,
                    },
                ) => {
                    if left != other_left || right != other_right {
                        return false;
                    }
                }
                (
                    Condition::In { attribute, query },
                    Condition::In {
                        attribute: other_attribute,
                        query: other_query,
                    },
                ) => {
                    if attribute != other_attribute || query != other_query {
                        return false;
                    }
                }
                (
                    Condition::Like { attribute, pattern },
                    Condition::Like {
                        attribute: other_attribute,
                        pattern: other_pattern,
                    },
                ) => {
                    if attribute != other_attribute || pattern != other_pattern {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Condition {}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::And { .. } => {
                let mut rights = vec![];
                let mut node = self;
                while let Condition::And { left, right } = node {
                    rights.push(right.as_ref());
                    node = left.as_ref();
                }

                write!(f, "{}", node)?;
                for right in rights.into_iter().rev() {
                    match right {
                        // left-associative, so only a nested right side needs grouping
                        Condition::And { .. } => write!(f, " AND ({})", right)?,
                        _ => write!(f, " AND {}", right)?,
                    }
                }
                Ok(())
            }
            Condition::Equals { left, right } => write!(f, "{} = {}", left, right),
            Condition::In { attribute, query } => write!(f, "{} IN ({})", attribute, query),
            Condition::Like { attribute, pattern } => write!(f, "{} LIKE {}", attribute, pattern),
        }
    }
}
