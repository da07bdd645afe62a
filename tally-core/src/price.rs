use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use crate::amount::Arrangement;
use crate::commodity::Commodity;
use crate::date::DateTime;
use crate::number::{Magnitude, Signed};

/// The exchange rate of a price line as written.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Rate {
    Unsigned(Magnitude),
    Signed(Signed),
}

impl Rate {
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Rate::Unsigned(m) => m.to_decimal(),
            Rate::Signed(s) => s.to_decimal(),
        }
    }
}

/// A price line: one unit of `from` costs `rate` units of `to`.
///
/// ```text
/// P 2024-01-01 USD EUR 0.91
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct Price {
    pub date_time: DateTime,
    pub from: Commodity,
    pub to: Commodity,
    pub rate: Rate,
    #[builder(default)]
    pub arrangement: Arrangement,
}

/// A proofed price: distinct commodities and a positive rate.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PricePoint {
    pub date_time: DateTime,
    pub from: Commodity,
    pub to: Commodity,
    pub count_per_unit: Decimal,
    /// The price line as written.
    pub price: Price,
}
