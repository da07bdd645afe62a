use chrono::{NaiveDate, NaiveTime};

use crate::date::Zone;
use crate::location::Located;

/// A single value in a metadata tree.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Scalar {
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Zone(Zone),
    Integer(u64),
}

/// A metadata node: a scalar with optional children, or a bare child forest.
///
/// ```text
/// {receipt {"r-17"}; reviewed; {2024-01-05; 10:30}}
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Tree {
    pub scalar: Option<Located<Scalar>>,
    pub children: Option<Forest>,
}

impl Tree {
    pub fn leaf(scalar: Located<Scalar>) -> Self {
        Tree {
            scalar: Some(scalar),
            children: None,
        }
    }

    pub fn branch(scalar: Option<Located<Scalar>>, children: Forest) -> Self {
        Tree {
            scalar,
            children: Some(children),
        }
    }

    /// Finds the first direct child whose scalar is the text `key`.
    pub fn child(&self, key: &str) -> Option<&Tree> {
        self.children.as_ref().and_then(|f| find(f, key))
    }
}

/// A braced list of trees.
pub type Forest = Vec<Located<Tree>>;

/// Finds the first tree in `forest` whose scalar is the text `key`.
pub fn find<'a>(forest: &'a [Located<Tree>], key: &str) -> Option<&'a Tree> {
    forest.iter().map(|t| &t.value).find(|t| {
        matches!(t.scalar.as_ref().map(|s| &s.value), Some(Scalar::Text(k)) if k == key)
    })
}

/// A label on a top line, written `^name`, used to select a subset of
/// transactions in reports.
///
/// ```text
/// 2014-04-23 "Flight to Berlin" ^berlin-trip-2014
///     Expenses:Flights           Dr 1230.27 USD
///     Liabilities:CreditCard     Cr
/// ```
pub type Tag = String;
