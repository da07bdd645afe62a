//! Balancing transactions and checking prices.
//!
//! Each transaction is proofed on its own: fully written amounts are summed
//! into an [`Imbalance`] first, then the incomplete ones are resolved against
//! it in posting order. A posting with no amount is resolved last, against
//! what remains. Failures from every item of a file are collected.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::amount::{Trio, Troika};
use crate::commodity::Commodity;
use crate::imbalance::Imbalance;
use crate::location::{Located, Pos};
use crate::number::{Brim, Magnitude, Pole, Signed};
use crate::price::{Price, PricePoint, Rate};
use crate::transaction::Transaction;
use crate::validation::Validation;
use crate::{FileItem, ProofedItem};

/// What is wrong with a price line.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PriceProblem {
    SameCommodity(Commodity),
    ZeroRate,
    NegativeRate,
}

impl fmt::Display for PriceProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceProblem::SameCommodity(c) => write!(f, "{} is priced in itself", c),
            PriceProblem::ZeroRate => f.write_str("rate is zero"),
            PriceProblem::NegativeRate => f.write_str("rate is negative"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProofErrorKind {
    #[error("transaction does not balance, remaining: {0}")]
    Unbalanced(Imbalance),
    #[error("{0} postings have no amount, at most one can be inferred")]
    TooManyInfer(usize),
    #[error("could not infer an amount: nothing is unbalanced")]
    NoImbalance,
    #[error("could not infer an amount: more than one commodity is unbalanced ({0})")]
    MultipleImbalance(Imbalance),
    #[error("could not infer an amount: {0} is not unbalanced")]
    CommodityNotFound(Commodity),
    #[error("{magnitude} {commodity} is not smaller than the {imbalance} {commodity} it offsets")]
    UnsignedTooLarge {
        commodity: Commodity,
        magnitude: Decimal,
        imbalance: Decimal,
    },
    #[error("a {pole} cannot offset the {commodity} imbalance, which is also a {pole}")]
    BalanceIsSameSide { commodity: Commodity, pole: Pole },
    #[error("quantity is too large to represent")]
    QuantityOutOfRange,
    #[error("invalid price: {0}")]
    InvalidPrice(PriceProblem),
}

/// A failed check, with the position of the item or posting that failed it.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} at {location}")]
pub struct ProofError {
    pub location: Pos,
    pub kind: ProofErrorKind,
}

impl ProofError {
    pub fn new(location: Pos, kind: ProofErrorKind) -> Self {
        ProofError { location, kind }
    }
}

pub type ProofResult<T> = Result<T, ProofError>;

/// Proofs every transaction and price, skipping comments.
pub fn proof_items<I>(items: I) -> Validation<Vec<ProofedItem>, ProofError>
where
    I: IntoIterator<Item = FileItem>,
{
    items
        .into_iter()
        .filter_map(|item| match item {
            FileItem::Comment(_) => None,
            FileItem::Price(price) => Some(proof_price(price).map(ProofedItem::Price)),
            FileItem::Transaction(txn) => {
                Some(proof_transaction(txn).map(ProofedItem::Transaction))
            }
        })
        .collect()
}

/// Resolves every posting amount and checks that the transaction balances.
pub fn proof_transaction(txn: Transaction<Trio>) -> ProofResult<Transaction<Troika>> {
    let Transaction { top_line, postings } = txn;
    let txn_pos = top_line.pos;

    let inferred = postings.iter().filter(|p| p.amount.is_empty()).count();
    if inferred > 1 {
        return Err(ProofError::new(txn_pos, ProofErrorKind::TooManyInfer(inferred)));
    }

    let mut imbalance = Imbalance::new();
    for posting in postings.iter().filter(|p| p.amount.is_determined()) {
        let troika = resolve(&posting.amount, &imbalance)
            .map_err(|kind| ProofError::new(posting.pos, kind))?;
        add(&mut imbalance, &troika).map_err(|kind| ProofError::new(posting.pos, kind))?;
    }
    tracing::trace!(%imbalance, "imbalance of written amounts at {}", txn_pos);

    let partial = postings.try_map(|posting| -> ProofResult<_> {
        if posting.amount.is_empty() {
            return Ok(posting.map(|p| p.with_amount(None)));
        }
        let pos = posting.pos;
        let troika = resolve(&posting.amount, &imbalance).map_err(|kind| ProofError::new(pos, kind))?;
        if !posting.amount.is_determined() {
            tracing::trace!(commodity = %troika.commodity, quantity = %troika.quantity, "inferred amount at {}", pos);
            add(&mut imbalance, &troika).map_err(|kind| ProofError::new(pos, kind))?;
        }
        Ok(posting.map(|p| p.with_amount(Some(troika))))
    })?;
    // The empty posting takes whatever is left, wherever it was written.
    let postings = partial.try_map(|Located { value: mut posting, pos }| -> ProofResult<_> {
        let troika = match posting.amount.take() {
            Some(troika) => troika,
            None => {
                let troika = resolve(&Trio::Empty, &imbalance).map_err(|kind| ProofError::new(pos, kind))?;
                tracing::trace!(commodity = %troika.commodity, quantity = %troika.quantity, "inferred amount at {}", pos);
                add(&mut imbalance, &troika).map_err(|kind| ProofError::new(pos, kind))?;
                troika
            }
        };
        Ok(Located::new(posting.with_amount(troika), pos))
    })?;
    if !imbalance.is_empty() {
        tracing::debug!(%imbalance, "unbalanced transaction at {}", txn_pos);
        return Err(ProofError::new(txn_pos, ProofErrorKind::Unbalanced(imbalance)));
    }
    Ok(Transaction::new(top_line, postings))
}

fn add(imbalance: &mut Imbalance, troika: &Troika) -> Result<(), ProofErrorKind> {
    imbalance
        .add(&troika.commodity, troika.quantity)
        .ok_or(ProofErrorKind::QuantityOutOfRange)
}

fn troika(trio: &Trio, commodity: &Commodity, quantity: Decimal) -> Troika {
    Troika {
        commodity: commodity.clone(),
        quantity,
        trio: trio.clone(),
    }
}

fn brim_value(brim: &Brim) -> Result<Decimal, ProofErrorKind> {
    brim.to_decimal().ok_or(ProofErrorKind::QuantityOutOfRange)
}

fn signed_value(signed: &Signed) -> Result<Decimal, ProofErrorKind> {
    signed.to_decimal().ok_or(ProofErrorKind::QuantityOutOfRange)
}

/// The commodity and total of the only unbalanced commodity.
fn single(imbalance: &Imbalance) -> Result<(&Commodity, Decimal), ProofErrorKind> {
    match imbalance.len() {
        0 => Err(ProofErrorKind::NoImbalance),
        1 => imbalance.single().ok_or(ProofErrorKind::NoImbalance),
        _ => Err(ProofErrorKind::MultipleImbalance(imbalance.clone())),
    }
}

fn lookup(imbalance: &Imbalance, commodity: &Commodity) -> Result<Decimal, ProofErrorKind> {
    imbalance
        .get(commodity)
        .ok_or_else(|| ProofErrorKind::CommodityNotFound(commodity.clone()))
}

/// Offsets all of `total` with a posting of `pole`, which must be the other side.
fn offset_side(
    pole: Pole,
    commodity: &Commodity,
    total: Decimal,
) -> Result<Decimal, ProofErrorKind> {
    if Pole::of(total) == Some(pole) {
        Err(ProofErrorKind::BalanceIsSameSide {
            commodity: commodity.clone(),
            pole,
        })
    } else {
        Ok(pole.apply(total))
    }
}

/// Offsets part of `total` by `magnitude`, which must be strictly smaller.
fn offset_part(
    brim: &Brim,
    commodity: &Commodity,
    total: Decimal,
) -> Result<Decimal, ProofErrorKind> {
    let magnitude = brim_value(brim)?;
    if magnitude < total.abs() {
        let pole = Pole::of(total).map_or(Pole::North, Pole::opposite);
        Ok(pole.apply(magnitude))
    } else {
        Err(ProofErrorKind::UnsignedTooLarge {
            commodity: commodity.clone(),
            magnitude,
            imbalance: total,
        })
    }
}

/// Turns a written amount into a concrete one, consulting `imbalance` for
/// whatever was left out.
fn resolve(trio: &Trio, imbalance: &Imbalance) -> Result<Troika, ProofErrorKind> {
    let resolved = match trio {
        Trio::SignedQtyCommodity(pole, brim, commodity, _) => {
            troika(trio, commodity, pole.apply(brim_value(brim)?))
        }
        Trio::QtyCommodity(signed, commodity, _) => troika(trio, commodity, signed_value(signed)?),
        Trio::ZeroCommodity(_, commodity, _) => troika(trio, commodity, Decimal::ZERO),
        Trio::SignedQty(pole, brim) => {
            let (commodity, _) = single(imbalance)?;
            troika(trio, commodity, pole.apply(brim_value(brim)?))
        }
        Trio::Qty(signed) => {
            let (commodity, _) = single(imbalance)?;
            troika(trio, commodity, signed_value(signed)?)
        }
        Trio::SideCommodity(pole, commodity) => {
            let total = lookup(imbalance, commodity)?;
            troika(trio, commodity, offset_side(*pole, commodity, total)?)
        }
        Trio::Side(pole) => {
            let (commodity, total) = single(imbalance)?;
            troika(trio, commodity, offset_side(*pole, commodity, total)?)
        }
        Trio::UnsignedCommodity(brim, commodity, _) => {
            let total = lookup(imbalance, commodity)?;
            troika(trio, commodity, offset_part(brim, commodity, total)?)
        }
        Trio::Unsigned(brim) => {
            let (commodity, total) = single(imbalance)?;
            troika(trio, commodity, offset_part(brim, commodity, total)?)
        }
        Trio::Commodity(commodity) => {
            let total = lookup(imbalance, commodity)?;
            troika(trio, commodity, -total)
        }
        Trio::Empty => {
            let (commodity, total) = single(imbalance)?;
            troika(trio, commodity, -total)
        }
    };
    Ok(resolved)
}

/// Checks that a price relates two different commodities at a positive rate.
pub fn proof_price(price: Located<Price>) -> ProofResult<Located<PricePoint>> {
    let pos = price.pos;
    let fail = |problem| ProofError::new(pos, ProofErrorKind::InvalidPrice(problem));
    if price.from == price.to {
        return Err(fail(PriceProblem::SameCommodity(price.from.clone())));
    }
    match &price.rate {
        Rate::Unsigned(Magnitude::Nil(_)) => return Err(fail(PriceProblem::ZeroRate)),
        Rate::Signed(Signed {
            pole: Pole::South, ..
        }) => return Err(fail(PriceProblem::NegativeRate)),
        Rate::Unsigned(Magnitude::Brim(_)) | Rate::Signed(_) => {}
    }
    let count_per_unit = price
        .rate
        .to_decimal()
        .ok_or_else(|| ProofError::new(pos, ProofErrorKind::QuantityOutOfRange))?;
    Ok(price.map(|price| PricePoint {
        date_time: price.date_time.clone(),
        from: price.from.clone(),
        to: price.to.clone(),
        count_per_unit,
        price,
    }))
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;
    use std::str::FromStr;

    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;
    use crate::account::Account;
    use crate::amount::Arrangement;
    use crate::number::{Nil, Radix};
    use crate::posting::Posting;
    use crate::transaction::{AtLeastTwo, TopLine};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn brim(s: &str) -> Brim {
        Brim::try_from(Magnitude::from_str_radix(s, Radix::Period).unwrap()).unwrap()
    }

    fn usd() -> Commodity {
        Commodity::from("USD")
    }

    fn eur() -> Commodity {
        Commodity::from("EUR")
    }

    fn dr(q: &str, c: Commodity) -> Trio {
        Trio::SignedQtyCommodity(Pole::DEBIT, brim(q), c, Arrangement::default())
    }

    fn cr(q: &str, c: Commodity) -> Trio {
        Trio::SignedQtyCommodity(Pole::CREDIT, brim(q), c, Arrangement::default())
    }

    fn txn(trios: Vec<Trio>) -> Transaction<Trio> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let top_line = TopLine::builder().date_time(crate::date::DateTime::from(date)).build();
        let postings = trios
            .into_iter()
            .enumerate()
            .map(|(i, trio)| {
                let posting = Posting::builder()
                    .account(Account::parse(&format!("Assets:A{}", i)).unwrap())
                    .amount(trio)
                    .build();
                Located::new(posting, Pos::new(i + 2, 5))
            })
            .collect();
        Transaction::new(
            Located::new(top_line, Pos::new(1, 1)),
            AtLeastTwo::from_vec(postings).unwrap(),
        )
    }

    fn quantities(txn: &Transaction<Troika>) -> Vec<(String, Decimal)> {
        txn.postings
            .iter()
            .map(|p| (p.amount.commodity.to_string(), p.amount.quantity))
            .collect()
    }

    fn fails(trios: Vec<Trio>) -> ProofError {
        proof_transaction(txn(trios)).unwrap_err()
    }

    #[test]
    fn debit_and_credit_balance() {
        let proofed = proof_transaction(txn(vec![dr("10", usd()), cr("10", usd())])).unwrap();
        assert_eq!(
            quantities(&proofed),
            vec![("USD".into(), dec("10")), ("USD".into(), dec("-10"))]
        );
    }

    #[test]
    fn empty_posting_takes_the_remaining_amount() {
        let proofed = proof_transaction(txn(vec![Trio::Empty, dr("12.50", usd())])).unwrap();
        assert_eq!(proofed.postings.first().amount.quantity, dec("-12.50"));
        assert_eq!(proofed.postings.first().amount.commodity, usd());
        assert_eq!(proofed.postings.first().amount.trio, Trio::Empty);
    }

    #[test]
    fn empty_posting_with_two_commodities_is_ambiguous() {
        let err = fails(vec![dr("10", usd()), dr("5", eur()), Trio::Empty]);
        assert_eq!(err.location, Pos::new(4, 5));
        match err.kind {
            ProofErrorKind::MultipleImbalance(imbalance) => assert_eq!(imbalance.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn two_empty_postings() {
        let err = fails(vec![Trio::Empty, Trio::Empty]);
        assert_eq!(err.location, Pos::new(1, 1));
        assert_eq!(err.kind, ProofErrorKind::TooManyInfer(2));
    }

    #[test]
    fn nothing_to_infer_from() {
        let err = fails(vec![Trio::Side(Pole::CREDIT), Trio::Commodity(usd())]);
        assert_eq!(err.kind, ProofErrorKind::NoImbalance);
        assert_eq!(err.location, Pos::new(2, 5));
    }

    #[test]
    fn named_commodity_must_be_unbalanced() {
        let err = fails(vec![dr("10", usd()), Trio::Commodity(eur())]);
        assert_eq!(err.kind, ProofErrorKind::CommodityNotFound(eur()));
    }

    #[test]
    fn commodity_only_offsets_its_imbalance() {
        let proofed =
            proof_transaction(txn(vec![dr("3", eur()), Trio::Commodity(eur())])).unwrap();
        assert_eq!(proofed.postings.second().amount.quantity, dec("-3"));
    }

    #[test]
    fn side_offsets_opposite_imbalance() {
        let proofed =
            proof_transaction(txn(vec![Trio::Side(Pole::CREDIT), dr("7", usd())])).unwrap();
        assert_eq!(proofed.postings.first().amount.quantity, dec("-7"));

        let proofed =
            proof_transaction(txn(vec![cr("7", usd()), Trio::SideCommodity(Pole::DEBIT, usd())]))
                .unwrap();
        assert_eq!(proofed.postings.second().amount.quantity, dec("7"));
    }

    #[test]
    fn side_on_same_side_as_imbalance() {
        let err = fails(vec![dr("7", usd()), Trio::Side(Pole::DEBIT)]);
        assert_eq!(
            err.kind,
            ProofErrorKind::BalanceIsSameSide {
                commodity: usd(),
                pole: Pole::DEBIT,
            }
        );
    }

    #[test]
    fn unsigned_takes_opposite_pole() {
        let proofed = proof_transaction(txn(vec![
            dr("10", usd()),
            Trio::Unsigned(brim("4")),
            Trio::UnsignedCommodity(brim("5"), usd(), Arrangement::default()),
            Trio::Empty,
        ]))
        .unwrap();
        assert_eq!(
            quantities(&proofed),
            vec![
                ("USD".into(), dec("10")),
                ("USD".into(), dec("-4")),
                ("USD".into(), dec("-5")),
                ("USD".into(), dec("-1")),
            ]
        );
    }

    #[test]
    fn empty_posting_resolves_after_the_others() {
        let proofed = proof_transaction(txn(vec![
            Trio::Empty,
            dr("10", usd()),
            Trio::Unsigned(brim("0.5")),
        ]))
        .unwrap();
        assert_eq!(
            quantities(&proofed),
            vec![
                ("USD".into(), dec("-9.5")),
                ("USD".into(), dec("10")),
                ("USD".into(), dec("-0.5")),
            ]
        );
        assert_eq!(proofed.postings.first().amount.trio, Trio::Empty);
        assert_eq!(proofed.postings.first().pos, Pos::new(2, 5));
    }

    #[test]
    fn empty_posting_first_with_nothing_left() {
        let err = fails(vec![Trio::Empty, dr("10", usd()), Trio::Side(Pole::CREDIT)]);
        assert_eq!(err.kind, ProofErrorKind::NoImbalance);
        assert_eq!(err.location, Pos::new(2, 5));
    }

    #[test]
    fn unsigned_equal_to_imbalance_is_too_large() {
        let err = fails(vec![dr("10", usd()), Trio::Unsigned(brim("10"))]);
        assert_eq!(
            err.kind,
            ProofErrorKind::UnsignedTooLarge {
                commodity: usd(),
                magnitude: dec("10"),
                imbalance: dec("10"),
            }
        );
    }

    #[test]
    fn signed_quantity_borrows_the_commodity() {
        let proofed = proof_transaction(txn(vec![
            Trio::SignedQty(Pole::CREDIT, brim("2")),
            Trio::Qty(Signed::new(Pole::North, brim("2"))),
            dr("0.5", eur()),
            Trio::Empty,
        ]))
        .unwrap();
        assert_eq!(
            quantities(&proofed),
            vec![
                ("EUR".into(), dec("-2")),
                ("EUR".into(), dec("2")),
                ("EUR".into(), dec("0.5")),
                ("EUR".into(), dec("-0.5")),
            ]
        );
    }

    #[test]
    fn leftover_is_unbalanced() {
        let err = fails(vec![dr("10", usd()), cr("9", usd())]);
        assert_eq!(err.location, Pos::new(1, 1));
        match err.kind {
            ProofErrorKind::Unbalanced(imbalance) => {
                assert_eq!(imbalance.get(&usd()), Some(dec("1")))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn zero_amount_does_not_unbalance() {
        let zero = Nil::try_from(Magnitude::from_str_radix("0.00", Radix::Period).unwrap()).unwrap();
        let proofed = proof_transaction(txn(vec![
            Trio::ZeroCommodity(zero, eur(), Arrangement::default()),
            dr("1", usd()),
            Trio::Empty,
        ]))
        .unwrap();
        assert_eq!(proofed.postings.first().amount.quantity, Decimal::ZERO);
        assert_eq!(proofed.postings.as_slice()[2].amount.quantity, dec("-1"));
    }

    fn price(from: Commodity, to: Commodity, rate: Rate) -> Located<Price> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let price = Price::builder()
            .date_time(crate::date::DateTime::from(date))
            .from(from)
            .to(to)
            .rate(rate)
            .build();
        Located::new(price, Pos::new(3, 1))
    }

    #[test]
    fn prices() {
        let point = proof_price(price(
            usd(),
            eur(),
            Rate::Unsigned(Magnitude::from_str_radix("0.91", Radix::Period).unwrap()),
        ))
        .unwrap();
        assert_eq!(point.count_per_unit, dec("0.91"));
        assert_eq!(point.pos, Pos::new(3, 1));

        let problem = |p: Located<Price>| match proof_price(p).unwrap_err().kind {
            ProofErrorKind::InvalidPrice(problem) => problem,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(
            problem(price(usd(), usd(), Rate::Unsigned(Magnitude::Brim(brim("1"))))),
            PriceProblem::SameCommodity(usd())
        );
        assert_eq!(
            problem(price(
                usd(),
                eur(),
                Rate::Unsigned(Magnitude::from_str_radix("0", Radix::Period).unwrap())
            )),
            PriceProblem::ZeroRate
        );
        assert_eq!(
            problem(price(usd(), eur(), Rate::Signed(Signed::new(Pole::South, brim("2"))))),
            PriceProblem::NegativeRate
        );
    }

    #[test]
    fn failures_accumulate_across_items() {
        let items = vec![
            FileItem::Transaction(txn(vec![Trio::Empty, Trio::Empty])),
            FileItem::Comment(Located::unlocated("note".to_string())),
            FileItem::Transaction(txn(vec![dr("1", usd()), Trio::Empty])),
            FileItem::Price(price(usd(), usd(), Rate::Unsigned(Magnitude::Brim(brim("1"))))),
        ];
        let errors = proof_items(items).into_result().unwrap_err();
        assert_eq!(errors.len(), 2);

        let items = vec![FileItem::Transaction(txn(vec![dr("1", usd()), Trio::Empty]))];
        assert_eq!(proof_items(items).into_result().unwrap().len(), 1);
    }

    fn brim_strategy() -> impl Strategy<Value = Brim> {
        (1i64..10_000, 0u32..3).prop_map(|(n, scale)| brim(&Decimal::new(n, scale).to_string()))
    }

    fn pole_strategy() -> impl Strategy<Value = Pole> {
        prop_oneof![Just(Pole::DEBIT), Just(Pole::CREDIT)]
    }

    fn commodity_strategy() -> impl Strategy<Value = Commodity> {
        prop_oneof![Just("USD"), Just("EUR")].prop_map(Commodity::from)
    }

    fn trio_strategy() -> impl Strategy<Value = Trio> {
        let arrangement = Arrangement::default();
        prop_oneof![
            3 => (pole_strategy(), brim_strategy(), commodity_strategy())
                .prop_map(move |(p, b, c)| Trio::SignedQtyCommodity(p, b, c, arrangement)),
            2 => (pole_strategy(), brim_strategy(), commodity_strategy())
                .prop_map(move |(p, b, c)| Trio::QtyCommodity(Signed::new(p, b), c, arrangement)),
            1 => (brim_strategy(), commodity_strategy())
                .prop_map(move |(b, c)| Trio::UnsignedCommodity(b, c, arrangement)),
            1 => (pole_strategy(), brim_strategy()).prop_map(|(p, b)| Trio::SignedQty(p, b)),
            1 => (pole_strategy(), commodity_strategy()).prop_map(|(p, c)| Trio::SideCommodity(p, c)),
            1 => pole_strategy().prop_map(Trio::Side),
            1 => (pole_strategy(), brim_strategy()).prop_map(|(p, b)| Trio::Qty(Signed::new(p, b))),
            1 => brim_strategy().prop_map(Trio::Unsigned),
            1 => commodity_strategy().prop_map(Trio::Commodity),
            2 => Just(Trio::Empty),
        ]
    }

    fn net(txn: &Transaction<Troika>) -> Imbalance {
        let mut sum = Imbalance::new();
        for posting in txn.postings.iter() {
            sum.add(&posting.amount.commodity, posting.amount.quantity).unwrap();
        }
        sum
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn proofed_transactions_net_to_zero(trios in prop::collection::vec(trio_strategy(), 2..6)) {
            if let Ok(proofed) = proof_transaction(txn(trios.clone())) {
                prop_assert!(net(&proofed).is_empty(), "{:?}", proofed);
                let written: Vec<Trio> = proofed.postings.iter().map(|p| p.amount.trio.clone()).collect();
                prop_assert_eq!(written, trios);
            }
        }

        #[test]
        fn empty_posting_takes_the_rest_wherever_it_is(
            amounts in prop::collection::vec((pole_strategy(), brim_strategy()), 1..5),
            at in any::<prop::sample::Index>(),
        ) {
            let written: Decimal = amounts
                .iter()
                .map(|(pole, b)| pole.apply(b.to_decimal().unwrap()))
                .sum();
            let mut trios: Vec<Trio> = amounts
                .into_iter()
                .map(|(pole, b)| Trio::SignedQtyCommodity(pole, b, usd(), Arrangement::default()))
                .collect();
            let at = at.index(trios.len() + 1);
            trios.insert(at, Trio::Empty);

            match proof_transaction(txn(trios)) {
                Ok(proofed) => {
                    prop_assert!(net(&proofed).is_empty());
                    prop_assert_eq!(proofed.postings.as_slice()[at].amount.quantity, -written);
                }
                Err(err) => {
                    prop_assert!(written.is_zero(), "{:?}", err);
                    prop_assert_eq!(err.kind, ProofErrorKind::NoImbalance);
                }
            }
        }
    }
}
