//! Posting amounts before and after balancing.

use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use crate::commodity::Commodity;
use crate::number::{Brim, Nil, Pole, Signed};

/// Which side of the number the commodity is written on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Orient {
    CommodityOnLeft,
    CommodityOnRight,
}

/// How a commodity and a number were laid out relative to each other.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Arrangement {
    pub orient: Orient,
    pub space_between: bool,
}

impl Arrangement {
    pub fn new(orient: Orient, space_between: bool) -> Self {
        Arrangement {
            orient,
            space_between,
        }
    }
}

impl Default for Arrangement {
    fn default() -> Self {
        Arrangement::new(Orient::CommodityOnRight, true)
    }
}

/// The amount of a posting as the user wrote it, possibly incomplete.
///
/// Keyword forms use `Dr`/`Cr`; sign forms put `+`/`-` directly before the
/// number. Missing parts are inferred by proofing from the postings around it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Trio {
    /// `Dr 10 USD`
    SignedQtyCommodity(Pole, Brim, Commodity, Arrangement),
    /// `Dr 10`: the commodity is that of the only imbalance.
    SignedQty(Pole, Brim),
    /// `Cr USD`: offsets the whole `USD` imbalance, which must be a debit.
    SideCommodity(Pole, Commodity),
    /// `Cr`: offsets the only imbalance, which must be a debit.
    Side(Pole),
    /// `-10 USD`
    QtyCommodity(Signed, Commodity, Arrangement),
    /// `-10`: the commodity is that of the only imbalance.
    Qty(Signed),
    /// `10 USD`: the pole is opposite the `USD` imbalance, which must be larger.
    UnsignedCommodity(Brim, Commodity, Arrangement),
    /// `10`: as [`Trio::UnsignedCommodity`] against the only imbalance.
    Unsigned(Brim),
    /// `0 USD`
    ZeroCommodity(Nil, Commodity, Arrangement),
    /// `USD`: offsets the whole `USD` imbalance.
    Commodity(Commodity),
    /// Nothing written: offsets the only imbalance.
    Empty,
}

impl Trio {
    /// Whether this trio fixes both commodity and quantity by itself.
    pub fn is_determined(&self) -> bool {
        matches!(
            self,
            Trio::SignedQtyCommodity(..) | Trio::QtyCommodity(..) | Trio::ZeroCommodity(..)
        )
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Trio::Empty)
    }

    pub fn commodity(&self) -> Option<&Commodity> {
        match self {
            Trio::SignedQtyCommodity(_, _, c, _)
            | Trio::SideCommodity(_, c)
            | Trio::QtyCommodity(_, c, _)
            | Trio::UnsignedCommodity(_, c, _)
            | Trio::ZeroCommodity(_, c, _)
            | Trio::Commodity(c) => Some(c),
            Trio::SignedQty(..) | Trio::Side(_) | Trio::Qty(_) | Trio::Unsigned(_) | Trio::Empty => {
                None
            }
        }
    }
}

impl Default for Trio {
    fn default() -> Self {
        Trio::Empty
    }
}

/// A posting amount after balancing: always a concrete commodity and signed quantity.
#[derive(Clone, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct Troika {
    pub commodity: Commodity,
    pub quantity: Decimal,
    /// The amount as it was written.
    #[builder(default)]
    pub trio: Trio,
}

impl Troika {
    /// The pole of the quantity; zero has none.
    pub fn pole(&self) -> Option<Pole> {
        Pole::of(self.quantity)
    }

    /// How the resolved amount should be laid out: the written arrangement if
    /// there was one.
    pub fn arrangement(&self) -> Arrangement {
        match &self.trio {
            Trio::SignedQtyCommodity(_, _, _, a)
            | Trio::QtyCommodity(_, _, a)
            | Trio::UnsignedCommodity(_, _, a)
            | Trio::ZeroCommodity(_, _, a) => *a,
            _ => Arrangement::default(),
        }
    }
}
