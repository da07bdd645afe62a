//! Results that collect every failure instead of stopping at the first.

use std::iter::FromIterator;
use std::slice;
use std::vec;

/// A non-empty list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NonEmpty<T> {
    items: Vec<T>,
}

impl<T> NonEmpty<T> {
    pub fn new(first: T) -> Self {
        NonEmpty { items: vec![first] }
    }

    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(NonEmpty { items })
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item)
    }

    pub fn append(&mut self, other: NonEmpty<T>) {
        self.items.extend(other.items)
    }

    pub fn first(&self) -> &T {
        &self.items[0]
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

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> NonEmpty<U> {
        NonEmpty {
            items: self.items.into_iter().map(f).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Either a value or every failure met while producing it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Validation<T, E> {
    Success(T),
    Failure(NonEmpty<E>),
}

impl<T, E> Validation<T, E> {
    pub fn fail(error: E) -> Self {
        Validation::Failure(NonEmpty::new(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Validation<U, E> {
        match self {
            Validation::Success(t) => Validation::Success(f(t)),
            Validation::Failure(es) => Validation::Failure(es),
        }
    }

    pub fn map_err<G, F: FnMut(E) -> G>(self, f: F) -> Validation<T, G> {
        match self {
            Validation::Success(t) => Validation::Success(t),
            Validation::Failure(es) => Validation::Failure(es.map(f)),
        }
    }

    /// Combines two independent validations, keeping the failures of both.
    pub fn zip<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(t), Validation::Success(u)) => Validation::Success((t, u)),
            (Validation::Failure(es), Validation::Success(_)) => Validation::Failure(es),
            (Validation::Success(_), Validation::Failure(es)) => Validation::Failure(es),
            (Validation::Failure(mut es), Validation::Failure(more)) => {
                es.append(more);
                Validation::Failure(es)
            }
        }
    }

    pub fn into_result(self) -> Result<T, NonEmpty<E>> {
        match self {
            Validation::Success(t) => Ok(t),
            Validation::Failure(es) => Err(es),
        }
    }
}

impl<T, E> From<Result<T, E>> for Validation<T, E> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(t) => Validation::Success(t),
            Err(e) => Validation::fail(e),
        }
    }
}

impl<T, E> FromIterator<Validation<T, E>> for Validation<Vec<T>, E> {
    fn from_iter<I: IntoIterator<Item = Validation<T, E>>>(iter: I) -> Self {
        let mut successes = Vec::new();
        let mut failures: Option<NonEmpty<E>> = None;
        for v in iter {
            match v {
                Validation::Success(t) => successes.push(t),
                Validation::Failure(es) => match failures {
                    Some(ref mut acc) => acc.append(es),
                    None => failures = Some(es),
                },
            }
        }
        match failures {
            Some(es) => Validation::Failure(es),
            None => Validation::Success(successes),
        }
    }
}

impl<T, E> FromIterator<Result<T, E>> for Validation<Vec<T>, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        iter.into_iter().map(Validation::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failure() {
        let results = vec![Ok(1), Err("a"), Ok(2), Err("b")];
        let v: Validation<Vec<i32>, &str> = results.into_iter().collect();
        assert_eq!(v.into_result().unwrap_err().into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn all_successes() {
        let v: Validation<Vec<i32>, &str> = vec![Ok(1), Ok(2)].into_iter().collect();
        assert_eq!(v, Validation::Success(vec![1, 2]));
    }

    #[test]
    fn zip_merges_failures() {
        let a: Validation<i32, &str> = Validation::fail("a");
        let b: Validation<i32, &str> = Validation::fail("b");
        let zipped = a.zip(b).into_result().unwrap_err();
        assert_eq!(zipped.as_slice(), &["a", "b"]);
        let c: Validation<i32, &str> = Validation::Success(1);
        assert_eq!(c.zip(Validation::Success(2)), Validation::Success((1, 2)));
    }
}
