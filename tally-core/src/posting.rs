use typed_builder::TypedBuilder;

use super::account::Account;
use super::flags::Flag;
use super::metadata::Forest;

/// Represents a transaction posting: an amount deposited to or withdrawn from
/// an account.
///
/// The amount type tells how far the posting has come: `Posting<Trio>` holds
/// what was written, `Posting<Troika>` the balanced result.
///
/// ```text
/// 2012-11-03 "Transfer to savings"
///     Assets:Checking     Cr 400.00 USD
///     Assets:Savings      400.00 USD   {memo {"monthly"}}
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct Posting<A> {
    #[builder(default)]
    pub flag: Option<Flag>,

    /// Account being posted to.
    pub account: Account,

    /// The amount being posted.
    pub amount: A,

    /// Metadata trees following the amount.
    #[builder(default)]
    pub forest: Option<Forest>,
}

impl<A> Posting<A> {
    /// Replaces the amount, keeping everything else.
    pub fn with_amount<B>(self, amount: B) -> Posting<B> {
        Posting {
            flag: self.flag,
            account: self.account,
            amount,
            forest: self.forest,
        }
    }
}
