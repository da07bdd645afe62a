//! Decimal literals as they were written.
//!
//! A literal keeps its surface layout (leading zeros, trailing zeros, digit
//! groups, a trailing radix point) so it renders back exactly as it was read.
//! Zero literals ([`Nil`]) and non-zero literals ([`Brim`]) are distinct types,
//! and only a [`Brim`] can carry a [`Pole`].

use std::convert::TryFrom;
use std::fmt;
use std::ops::Neg;

use rust_decimal::Decimal;

/// Which punctuation mark is the radix point.
///
/// The other mark of the pair separates digit groups.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Radix {
    /// `1.000,25`
    Comma,
    /// `1,000.25`
    Period,
}

impl Radix {
    pub fn point(self) -> char {
        match self {
            Radix::Comma => ',',
            Radix::Period => '.',
        }
    }

    pub fn grouper(self) -> char {
        match self {
            Radix::Comma => '.',
            Radix::Period => ',',
        }
    }
}

impl Default for Radix {
    fn default() -> Self {
        Radix::Period
    }
}

/// A non-empty run of decimal digits between separators.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DigitGroup(String);

impl DigitGroup {
    pub fn new<S: Into<String>>(digits: S) -> Option<Self> {
        let digits = digits.into();
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(DigitGroup(digits))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }
}

/// Whether a literal uses digit group separators.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Grouping {
    Ungrouped,
    Grouped,
}

/// The layout of a literal: digit groups before and after the radix point.
///
/// `fraction` is `None` when there is no radix point and `Some(vec![])` for a
/// trailing radix point (`12.`). `whole` is empty only for literals starting
/// at the radix point (`.5`), which then have at least one fraction group.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Figure {
    whole: Vec<DigitGroup>,
    fraction: Option<Vec<DigitGroup>>,
}

impl Figure {
    pub fn new(whole: Vec<DigitGroup>, fraction: Option<Vec<DigitGroup>>) -> Option<Self> {
        let has_fraction_digits = fraction.as_ref().map_or(false, |f| !f.is_empty());
        if whole.is_empty() && !has_fraction_digits {
            None
        } else {
            Some(Figure { whole, fraction })
        }
    }

    /// Reads a literal written with `radix`, e.g. `"1,000.25"` for [`Radix::Period`].
    pub fn from_str_radix(s: &str, radix: Radix) -> Option<Self> {
        fn groups(s: &str, grouper: char) -> Option<Vec<DigitGroup>> {
            s.split(grouper).map(DigitGroup::new).collect()
        }
        let mut halves = s.splitn(2, radix.point());
        let whole = halves.next().unwrap_or("");
        let whole = if whole.is_empty() {
            Vec::new()
        } else {
            groups(whole, radix.grouper())?
        };
        let fraction = match halves.next() {
            None => None,
            Some("") => Some(Vec::new()),
            Some(f) => Some(groups(f, radix.grouper())?),
        };
        Figure::new(whole, fraction)
    }

    pub fn whole(&self) -> &[DigitGroup] {
        &self.whole
    }

    pub fn fraction(&self) -> Option<&[DigitGroup]> {
        self.fraction.as_deref()
    }

    pub fn grouping(&self) -> Grouping {
        let fraction_groups = self.fraction.as_ref().map_or(0, Vec::len);
        if self.whole.len() > 1 || fraction_groups > 1 {
            Grouping::Grouped
        } else {
            Grouping::Ungrouped
        }
    }

    /// Sizes of the whole-part groups following the leading one.
    pub fn group_sizes(&self) -> Vec<usize> {
        self.whole.iter().skip(1).map(DigitGroup::len).collect()
    }

    pub fn is_zero(&self) -> bool {
        self.groups().all(DigitGroup::is_zero)
    }

    fn groups(&self) -> impl Iterator<Item = &DigitGroup> {
        self.whole
            .iter()
            .chain(self.fraction.iter().flat_map(|f| f.iter()))
    }

    /// The unsigned value, or `None` when it does not fit a `Decimal`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let mut digits = String::new();
        for group in &self.whole {
            digits.push_str(group.as_str());
        }
        if digits.is_empty() {
            digits.push('0');
        }
        if let Some(fraction) = &self.fraction {
            if !fraction.is_empty() {
                digits.push('.');
                for group in fraction {
                    digits.push_str(group.as_str());
                }
            }
        }
        Decimal::from_str_exact(&digits).ok()
    }

    /// Writes the literal back out with `radix`.
    pub fn render(&self, radix: Radix) -> String {
        let join = |groups: &[DigitGroup]| {
            groups
                .iter()
                .map(DigitGroup::as_str)
                .collect::<Vec<_>>()
                .join(&radix.grouper().to_string())
        };
        let mut out = join(&self.whole);
        if let Some(fraction) = &self.fraction {
            out.push(radix.point());
            out.push_str(&join(fraction));
        }
        out
    }
}

/// A literal whose every digit is zero. It never carries a pole.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Nil(Figure);

impl Nil {
    pub fn figure(&self) -> &Figure {
        &self.0
    }

    pub fn grouping(&self) -> Grouping {
        self.0.grouping()
    }

    pub fn render(&self, radix: Radix) -> String {
        self.0.render(radix)
    }
}

/// A literal with at least one non-zero digit.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Brim(Figure);

impl Brim {
    pub fn figure(&self) -> &Figure {
        &self.0
    }

    pub fn grouping(&self) -> Grouping {
        self.0.grouping()
    }

    pub fn group_sizes(&self) -> Vec<usize> {
        self.0.group_sizes()
    }

    /// The (positive) value, or `None` when it does not fit a `Decimal`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        self.0.to_decimal()
    }

    pub fn render(&self, radix: Radix) -> String {
        self.0.render(radix)
    }
}

/// An unsigned decimal literal, zero or not.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Magnitude {
    Nil(Nil),
    Brim(Brim),
}

impl Magnitude {
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Magnitude::Nil(_) => Some(Decimal::ZERO),
            Magnitude::Brim(brim) => brim.to_decimal(),
        }
    }

    pub fn figure(&self) -> &Figure {
        match self {
            Magnitude::Nil(nil) => nil.figure(),
            Magnitude::Brim(brim) => brim.figure(),
        }
    }

    pub fn render(&self, radix: Radix) -> String {
        self.figure().render(radix)
    }

    pub fn from_str_radix(s: &str, radix: Radix) -> Option<Self> {
        Figure::from_str_radix(s, radix).map(Magnitude::from)
    }
}

impl From<Figure> for Magnitude {
    fn from(figure: Figure) -> Self {
        if figure.is_zero() {
            Magnitude::Nil(Nil(figure))
        } else {
            Magnitude::Brim(Brim(figure))
        }
    }
}

impl TryFrom<Magnitude> for Brim {
    type Error = Nil;

    fn try_from(m: Magnitude) -> Result<Self, Self::Error> {
        match m {
            Magnitude::Brim(brim) => Ok(brim),
            Magnitude::Nil(nil) => Err(nil),
        }
    }
}

impl TryFrom<Magnitude> for Nil {
    type Error = Brim;

    fn try_from(m: Magnitude) -> Result<Self, Self::Error> {
        match m {
            Magnitude::Nil(nil) => Ok(nil),
            Magnitude::Brim(brim) => Err(brim),
        }
    }
}

/// The abstract sign of a non-zero quantity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Pole {
    /// Debit; positive.
    North,
    /// Credit; negative.
    South,
}

impl Pole {
    pub const DEBIT: Pole = Pole::North;
    pub const CREDIT: Pole = Pole::South;

    pub fn opposite(self) -> Pole {
        match self {
            Pole::North => Pole::South,
            Pole::South => Pole::North,
        }
    }

    /// The pole of a quantity; zero has none.
    pub fn of(quantity: Decimal) -> Option<Pole> {
        if quantity.is_zero() {
            None
        } else if quantity.is_sign_negative() {
            Some(Pole::South)
        } else {
            Some(Pole::North)
        }
    }

    /// Gives `magnitude` this pole's sign.
    pub fn apply(self, magnitude: Decimal) -> Decimal {
        let magnitude = magnitude.abs();
        match self {
            Pole::North => magnitude,
            Pole::South => magnitude.neg(),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Pole::North => "Dr",
            Pole::South => "Cr",
        }
    }

    pub fn sign(self) -> char {
        match self {
            Pole::North => '+',
            Pole::South => '-',
        }
    }
}

impl fmt::Display for Pole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pole::North => "debit",
            Pole::South => "credit",
        })
    }
}

/// A non-zero literal with a pole.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Signed {
    pub pole: Pole,
    pub brim: Brim,
}

impl Signed {
    pub fn new(pole: Pole, brim: Brim) -> Self {
        Signed { pole, brim }
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        self.brim.to_decimal().map(|d| self.pole.apply(d))
    }
}
