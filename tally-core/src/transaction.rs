use std::slice;
use std::vec;

use typed_builder::TypedBuilder;

use crate::date::DateTime;
use crate::flags::Flag;
use crate::location::Located;
use crate::metadata::{Forest, Tag};
use crate::posting::Posting;

/// A sequence with at least two elements.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AtLeastTwo<T> {
    items: Vec<T>,
}

impl<T> AtLeastTwo<T> {
    pub fn new(first: T, second: T, rest: Vec<T>) -> Self {
        let mut items = Vec::with_capacity(2 + rest.len());
        items.push(first);
        items.push(second);
        items.extend(rest);
        AtLeastTwo { items }
    }

    /// `None` if `items` has fewer than two elements.
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.len() >= 2 {
            Some(AtLeastTwo { items })
        } else {
            None
        }
    }

    pub fn first(&self) -> &T {
        &self.items[0]
    }

    pub fn second(&self) -> &T {
        &self.items[1]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> AtLeastTwo<U> {
        AtLeastTwo {
            items: self.items.into_iter().map(f).collect(),
        }
    }

    /// Maps every element, stopping at the first error.
    pub fn try_map<U, E, F: FnMut(T) -> Result<U, E>>(self, f: F) -> Result<AtLeastTwo<U>, E> {
        Ok(AtLeastTwo {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
        })
    }
}

impl<T> IntoIterator for AtLeastTwo<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a AtLeastTwo<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Everything on the first line of a transaction.
///
/// ```text
/// 2014-05-05 12:30 -0500 [R] (1042) "Cafe Mogador" ^dinner {receipt {"r-17"}}
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct TopLine {
    pub date_time: DateTime,

    #[builder(default)]
    pub flag: Option<Flag>,

    /// A reference number such as a cheque number, written in parentheses.
    #[builder(default)]
    pub number: Option<String>,

    #[builder(default)]
    pub payee: Option<String>,

    #[builder(default)]
    pub tags: Vec<Tag>,

    #[builder(default)]
    pub forest: Option<Forest>,
}

/// A top line and two or more postings.
///
/// `Transaction<Trio>` is what the converter produces; proofing turns it into
/// a `Transaction<Troika>` whose quantities net to zero per commodity.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Transaction<A> {
    pub top_line: Located<TopLine>,
    pub postings: AtLeastTwo<Located<Posting<A>>>,
}

impl<A> Transaction<A> {
    pub fn new(top_line: Located<TopLine>, postings: AtLeastTwo<Located<Posting<A>>>) -> Self {
        Transaction { top_line, postings }
    }
}

#[test]
fn test_at_least_two() {
    assert!(AtLeastTwo::from_vec(vec![1]).is_none());
    let two = AtLeastTwo::from_vec(vec![1, 2, 3]).unwrap();
    assert_eq!(*two.first(), 1);
    assert_eq!(*two.second(), 2);
    assert_eq!(two.len(), 3);
    assert_eq!(two.map(|n| n * 10).into_iter().collect::<Vec<_>>(), vec![10, 20, 30]);
}
