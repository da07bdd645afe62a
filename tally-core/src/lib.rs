//! Domain types for plain-text double-entry ledgers, and the proofing pass
//! that balances them.

pub use account::Account;
pub use amount::{Arrangement, Orient, Trio, Troika};
pub use commodity::Commodity;
pub use date::{DateTime, Zone};
pub use flags::Flag;
pub use imbalance::Imbalance;
pub use location::{Cursor, Located, Pos};
pub use metadata::{Forest, Scalar, Tag, Tree};
pub use number::{Brim, DigitGroup, Figure, Grouping, Magnitude, Nil, Pole, Radix, Signed};
pub use posting::Posting;
pub use price::{Price, PricePoint, Rate};
pub use proof::{proof_items, proof_price, proof_transaction, PriceProblem, ProofError, ProofErrorKind};
pub use transaction::{AtLeastTwo, TopLine, Transaction};
pub use validation::{NonEmpty, Validation};

pub mod account;
pub mod amount;
pub mod commodity;
pub mod date;
pub mod flags;
pub mod imbalance;
pub mod location;
pub mod metadata;
pub mod number;
pub mod posting;
pub mod price;
pub mod proof;
pub mod transaction;
pub mod validation;

/// One top-level entry of a ledger file as written.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FileItem {
    /// A `#` comment on a line of its own, without the leading `#`.
    Comment(Located<String>),
    Price(Located<Price>),
    Transaction(Transaction<Trio>),
}

/// A file entry that passed proofing. Comments do not survive proofing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ProofedItem {
    Price(Located<PricePoint>),
    Transaction(Transaction<Troika>),
}
