use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Columns advance to the next multiple of this width on a tab.
pub const TAB_STOP: usize = 8;

/// A 1-based line and column in the source text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl Pos {
    pub fn new(line: usize, column: usize) -> Self {
        Pos { line, column }
    }

    /// The position after consuming `c`.
    pub fn advance(self, c: char) -> Self {
        match c {
            '\n' => Pos {
                line: self.line + 1,
                column: 1,
            },
            '\t' => Pos {
                line: self.line,
                column: ((self.column - 1) / TAB_STOP + 1) * TAB_STOP + 1,
            },
            _ => Pos {
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    /// The position after consuming every character of `text`.
    pub fn advance_str(self, text: &str) -> Self {
        text.chars().fold(self, Pos::advance)
    }
}

impl Default for Pos {
    fn default() -> Self {
        Pos { line: 1, column: 1 }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Tracks the position of a byte offset while walking an input front to back.
///
/// The cursor only moves forward; asking for an offset behind it rescans from
/// the start of the input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    offset: usize,
    pos: Pos,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the cursor to the byte `offset` of `input` and returns its position.
    ///
    /// `offset` must lie on a character boundary of `input`.
    pub fn advance_to(&mut self, input: &str, offset: usize) -> Pos {
        if offset < self.offset {
            *self = Cursor::new();
        }
        if let Some(skipped) = input.get(self.offset..offset) {
            self.pos = self.pos.advance_str(skipped);
            self.offset = offset;
        }
        self.pos
    }

    /// The position of `offset` in `input`, without a cursor to reuse.
    pub fn locate(input: &str, offset: usize) -> Pos {
        Cursor::new().advance_to(input, offset)
    }
}

/// A value together with the place in the source text it came from.
///
/// The position is diagnostic only: comparisons and hashing look at the value.
#[derive(Clone, Copy, Debug)]
pub struct Located<T> {
    pub value: T,
    pub pos: Pos,
}

impl<T> Located<T> {
    pub fn new(value: T, pos: Pos) -> Self {
        Located { value, pos }
    }

    /// Wraps a value built in code rather than read from text.
    pub fn unlocated(value: T) -> Self {
        Located {
            value,
            pos: Pos::default(),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Located<U> {
        Located {
            value: f(self.value),
            pos: self.pos,
        }
    }

    pub fn as_ref(&self) -> Located<&T> {
        Located {
            value: &self.value,
            pos: self.pos,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> std::ops::Deref for Located<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> PartialEq for Located<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Located<T> {}

impl<T: PartialOrd> PartialOrd for Located<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord> Ord for Located<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash> Hash for Located<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}
