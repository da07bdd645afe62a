use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;

use crate::commodity::Commodity;

/// Running per-commodity totals of a transaction's postings.
///
/// Only commodities that do not net to zero are kept, so a balanced
/// transaction has an empty imbalance.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Imbalance(BTreeMap<Commodity, Decimal>);

impl Imbalance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` to the total for `commodity`. Returns `None` on overflow.
    pub fn add(&mut self, commodity: &Commodity, quantity: Decimal) -> Option<()> {
        if quantity.is_zero() {
            return Some(());
        }
        match self.0.entry(commodity.clone()) {
            btree_map::Entry::Vacant(e) => {
                e.insert(quantity);
            }
            btree_map::Entry::Occupied(mut e) => {
                let total = e.get().checked_add(quantity)?;
                if total.is_zero() {
                    e.remove();
                } else {
                    *e.get_mut() = total;
                }
            }
        }
        Some(())
    }

    pub fn get(&self, commodity: &Commodity) -> Option<Decimal> {
        self.0.get(commodity).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The only entry, if there is exactly one.
    pub fn single(&self) -> Option<(&Commodity, Decimal)> {
        let mut iter = self.0.iter();
        match (iter.next(), iter.next()) {
            (Some((c, q)), None) => Some((c, *q)),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Commodity, Decimal)> {
        self.0.iter().map(|(c, q)| (c, *q))
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(c, q)| format!("{} {}", q, c)).collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn netting_to_zero_removes_commodity() {
        let usd = Commodity::from("USD");
        let mut imbalance = Imbalance::new();
        imbalance.add(&usd, Decimal::new(10, 0)).unwrap();
        assert_eq!(imbalance.get(&usd), Some(Decimal::new(10, 0)));
        imbalance.add(&usd, Decimal::new(-4, 0)).unwrap();
        assert_eq!(imbalance.single(), Some((&usd, Decimal::new(6, 0))));
        imbalance.add(&usd, Decimal::new(-6, 0)).unwrap();
        assert!(imbalance.is_empty());
    }

    #[test]
    fn zero_is_not_recorded() {
        let mut imbalance = Imbalance::new();
        imbalance.add(&"USD".into(), Decimal::ZERO).unwrap();
        assert!(imbalance.is_empty());
    }

    #[test]
    fn display_lists_entries() {
        let mut imbalance = Imbalance::new();
        imbalance.add(&"USD".into(), Decimal::new(10, 0)).unwrap();
        imbalance.add(&"EUR".into(), Decimal::new(-5, 1)).unwrap();
        assert_eq!(imbalance.single(), None);
        assert_eq!(imbalance.to_string(), "-0.5 EUR, 10 USD");
    }
}
