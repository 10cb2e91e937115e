use std::fmt;

use serde::Serialize;

use crate::ast::{Attribute, Condition, Relation};

/// A complete query or sub-query.
///
/// `select` and `from` are never empty in a parsed query. A missing `where`
/// clause means no filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Selected attributes, in display order
    pub select: SelList,

    /// Source relations
    pub from: FromList,

    /// Conditions, if a WHERE clause was given
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<CondList>,
}

impl Query {
    /// Renders the query as a full statement, with the `;` the grammar requires
    /// after a WHERE clause.
    ///
    /// ```
    /// let query = qp8db::parse("select a from r where a = b;").unwrap();
    /// assert_eq!(query.statement(), "SELECT a FROM r WHERE a = b;");
    /// ```
    pub fn statement(&self) -> String {
        match self.where_clause {
            Some(_) => format!("{};", self),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.select, self.from)?;
        if let Some(conditions) = &self.where_clause {
            write!(f, " WHERE {}", conditions)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelList {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FromList {
    pub relations: Vec<Relation>,
}

/// Top-level conditions. Entries are implicitly conjoined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CondList {
    pub conditions: Vec<Condition>,
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for SelList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.attributes)
    }
}

impl fmt::Display for FromList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.relations)
    }
}

impl fmt::Display for CondList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.conditions)
    }
}
