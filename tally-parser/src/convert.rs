//! Turns parse pairs into domain values.
//!
//! The grammar has already rejected every malformed input, so conversion
//! cannot fail; shapes the grammar does not produce are `unreachable!`.

use chrono::{NaiveDate, NaiveTime};
use pest::iterators::{Pair, Pairs};

use tally_core as tc;
use tc::{
    Account, Arrangement, AtLeastTwo, Brim, Commodity, Cursor, DateTime, FileItem, Flag, Forest,
    Located, Magnitude, Nil, Orient, Pole, Pos, Posting, Price, Radix, Rate, Scalar, Signed,
    TopLine, Transaction, Tree, Trio, Zone,
};

use super::Rule;

pub(crate) struct Converter<'i> {
    input: &'i str,
    cursor: Cursor,
    radix: Radix,
}

fn next<'i>(pairs: &mut Pairs<'i, Rule>) -> Pair<'i, Rule> {
    match pairs.next() {
        Some(pair) => pair,
        None => unreachable!("grammar produced fewer pairs than expected"),
    }
}

fn optional<'i>(rule: Rule, pairs: &mut Pairs<'i, Rule>) -> Option<Pair<'i, Rule>> {
    match pairs.peek() {
        Some(ref p) if p.as_rule() == rule => pairs.next(),
        _ => None,
    }
}

/// The production inside a `full_*` wrapper pair.
pub(crate) fn unwrap_full<'i>(mut pairs: Pairs<'i, Rule>) -> Pair<'i, Rule> {
    next(&mut next(&mut pairs).into_inner())
}

impl<'i> Converter<'i> {
    pub fn new(input: &'i str, radix: Radix) -> Self {
        Converter {
            input,
            cursor: Cursor::new(),
            radix,
        }
    }

    fn pos(&mut self, pair: &Pair<'i, Rule>) -> Pos {
        self.cursor.advance_to(self.input, pair.as_span().start())
    }

    pub fn file(&mut self, pair: Pair<'i, Rule>) -> Vec<FileItem> {
        let items: Vec<FileItem> = pair
            .into_inner()
            .filter_map(|p| match p.as_rule() {
                Rule::comment_item => Some(FileItem::Comment(self.comment(p))),
                Rule::price_p | Rule::price_c => Some(FileItem::Price(self.price(p))),
                Rule::transaction_p | Rule::transaction_c => {
                    Some(FileItem::Transaction(self.transaction(p)))
                }
                Rule::EOI => None,
                rule => unreachable!("unexpected rule {:?} in file", rule),
            })
            .collect();
        tracing::trace!(items = items.len(), "converted file items");
        items
    }

    pub fn comment(&mut self, pair: Pair<'i, Rule>) -> Located<String> {
        let pos = self.pos(&pair);
        let text = next(&mut pair.into_inner()).as_str().to_string();
        Located::new(text, pos)
    }

    pub fn price(&mut self, pair: Pair<'i, Rule>) -> Located<Price> {
        let pos = self.pos(&pair);
        let mut inner = pair.into_inner();
        let date_time = self.date_time(&mut inner);
        let from = self.commodity(next(&mut inner));

        let mut exchange = next(&mut inner).into_inner();
        let first = next(&mut exchange);
        let space_between = optional(Rule::space, &mut exchange).is_some();
        let second = next(&mut exchange);
        let (to, rate, orient) = match first.as_rule() {
            Rule::commodity => (
                self.commodity(first),
                self.rate(second),
                Orient::CommodityOnLeft,
            ),
            _ => (
                self.commodity(second),
                self.rate(first),
                Orient::CommodityOnRight,
            ),
        };

        let price = Price::builder()
            .date_time(date_time)
            .from(from)
            .to(to)
            .rate(rate)
            .arrangement(Arrangement::new(orient, space_between))
            .build();
        Located::new(price, pos)
    }

    fn rate(&mut self, pair: Pair<'i, Rule>) -> Rate {
        let pair = next(&mut pair.into_inner());
        match pair.as_rule() {
            Rule::signed_p | Rule::signed_c => Rate::Signed(self.signed(pair)),
            Rule::magnitude_p | Rule::magnitude_c => Rate::Unsigned(self.magnitude(pair)),
            rule => unreachable!("unexpected rule {:?} in rate", rule),
        }
    }

    /// Reads a date and the optional time and zone after it.
    fn date_time(&mut self, pairs: &mut Pairs<'i, Rule>) -> DateTime {
        let date = self.date(next(pairs));
        let time = optional(Rule::time, pairs).map(|p| self.time(p));
        let zone = optional(Rule::zone, pairs).map(|p| self.zone(p));
        DateTime::builder().date(date).time(time).zone(zone).build()
    }

    pub fn transaction(&mut self, pair: Pair<'i, Rule>) -> Transaction<Trio> {
        let mut inner = pair.into_inner();
        let top_line = self.top_line(next(&mut inner));
        let postings: Vec<_> = inner
            .filter(|p| p.as_rule() != Rule::EOI)
            .map(|p| self.posting(p))
            .collect();
        let postings = match AtLeastTwo::from_vec(postings) {
            Some(postings) => postings,
            None => unreachable!("grammar admitted a transaction with fewer than two postings"),
        };
        Transaction::new(top_line, postings)
    }

    pub fn top_line(&mut self, pair: Pair<'i, Rule>) -> Located<TopLine> {
        let pos = self.pos(&pair);
        let mut inner = pair.into_inner();
        let date_time = self.date_time(&mut inner);
        let flag = optional(Rule::flag, &mut inner).map(|p| self.flag(p));
        let number = optional(Rule::number, &mut inner).map(|p| text_of(p).to_string());
        let payee = optional(Rule::payee, &mut inner).map(|p| self.payee(p));
        let mut tags = Vec::new();
        while let Some(tag) = optional(Rule::tag, &mut inner) {
            tags.push(self.tag(tag));
        }
        let forest = optional(Rule::forest, &mut inner).map(|p| self.forest(p));
        let top_line = TopLine::builder()
            .date_time(date_time)
            .flag(flag)
            .number(number)
            .payee(payee)
            .tags(tags)
            .forest(forest)
            .build();
        Located::new(top_line, pos)
    }

    pub fn posting(&mut self, pair: Pair<'i, Rule>) -> Located<Posting<Trio>> {
        let pos = self.pos(&pair);
        let mut inner = pair.into_inner();
        let flag = optional(Rule::flag, &mut inner).map(|p| self.flag(p));
        let account = self.account(next(&mut inner));
        let trio = match inner.peek() {
            Some(ref p) if matches!(p.as_rule(), Rule::trio_p | Rule::trio_c) => {
                self.trio(next(&mut inner))
            }
            _ => Trio::Empty,
        };
        let forest = optional(Rule::forest, &mut inner).map(|p| self.forest(p));
        let posting = Posting::builder()
            .flag(flag)
            .account(account)
            .amount(trio)
            .forest(forest)
            .build();
        Located::new(posting, pos)
    }

    pub fn trio(&mut self, pair: Pair<'i, Rule>) -> Trio {
        let pair = next(&mut pair.into_inner());
        match pair.as_rule() {
            Rule::signed_qty_commodity_p | Rule::signed_qty_commodity_c => {
                let mut inner = pair.into_inner();
                let pole = pole(next(&mut inner));
                let (brim, commodity, arrangement) = self.arranged(inner, |c, p| c.brim(p));
                Trio::SignedQtyCommodity(pole, brim, commodity, arrangement)
            }
            Rule::signed_qty_p | Rule::signed_qty_c => {
                let mut inner = pair.into_inner();
                let pole = pole(next(&mut inner));
                Trio::SignedQty(pole, self.brim(next(&mut inner)))
            }
            Rule::side_commodity => {
                let mut inner = pair.into_inner();
                let pole = pole(next(&mut inner));
                Trio::SideCommodity(pole, self.commodity(next(&mut inner)))
            }
            Rule::side => Trio::Side(pole(next(&mut pair.into_inner()))),
            Rule::qty_commodity_p | Rule::qty_commodity_c => {
                let (signed, commodity, arrangement) =
                    self.arranged(pair.into_inner(), |c, p| c.signed(p));
                Trio::QtyCommodity(signed, commodity, arrangement)
            }
            Rule::signed_p | Rule::signed_c => Trio::Qty(self.signed(pair)),
            Rule::unsigned_commodity_p | Rule::unsigned_commodity_c => {
                let (brim, commodity, arrangement) =
                    self.arranged(pair.into_inner(), |c, p| c.brim(p));
                Trio::UnsignedCommodity(brim, commodity, arrangement)
            }
            Rule::brim_p | Rule::brim_c => Trio::Unsigned(self.brim(pair)),
            Rule::zero_commodity_p | Rule::zero_commodity_c => {
                let (nil, commodity, arrangement) =
                    self.arranged(pair.into_inner(), |c, p| c.nil(p));
                Trio::ZeroCommodity(nil, commodity, arrangement)
            }
            Rule::commodity => Trio::Commodity(self.commodity(pair)),
            rule => unreachable!("unexpected rule {:?} in amount", rule),
        }
    }

    /// Reads a quantity and a commodity written in either order.
    fn arranged<Q, F>(
        &mut self,
        mut pairs: Pairs<'i, Rule>,
        quantity: F,
    ) -> (Q, Commodity, Arrangement)
    where
        F: FnOnce(&mut Self, Pair<'i, Rule>) -> Q,
    {
        let first = next(&mut pairs);
        let space_between = optional(Rule::space, &mut pairs).is_some();
        let second = next(&mut pairs);
        if first.as_rule() == Rule::commodity {
            let commodity = self.commodity(first);
            let q = quantity(&mut *self, second);
            (
                q,
                commodity,
                Arrangement::new(Orient::CommodityOnLeft, space_between),
            )
        } else {
            let q = quantity(&mut *self, first);
            let commodity = self.commodity(second);
            (
                q,
                commodity,
                Arrangement::new(Orient::CommodityOnRight, space_between),
            )
        }
    }

    fn signed(&mut self, pair: Pair<'i, Rule>) -> Signed {
        let mut inner = pair.into_inner();
        let pole = match next(&mut inner).as_str() {
            "+" => Pole::North,
            "-" => Pole::South,
            other => unreachable!("unexpected sign {:?}", other),
        };
        Signed::new(pole, self.brim(next(&mut inner)))
    }

    pub fn magnitude(&mut self, pair: Pair<'i, Rule>) -> Magnitude {
        self.figure(next(&mut pair.into_inner()))
    }

    fn brim(&mut self, pair: Pair<'i, Rule>) -> Brim {
        match self.figure(pair) {
            Magnitude::Brim(brim) => brim,
            Magnitude::Nil(_) => unreachable!("grammar admitted a zero non-zero quantity"),
        }
    }

    fn nil(&mut self, pair: Pair<'i, Rule>) -> Nil {
        match self.figure(pair) {
            Magnitude::Nil(nil) => nil,
            Magnitude::Brim(_) => unreachable!("grammar admitted a non-zero zero quantity"),
        }
    }

    fn figure(&mut self, pair: Pair<'i, Rule>) -> Magnitude {
        match Magnitude::from_str_radix(pair.as_str(), self.radix) {
            Some(m) => m,
            None => unreachable!("grammar admitted malformed quantity {:?}", pair.as_str()),
        }
    }

    pub fn commodity(&mut self, pair: Pair<'i, Rule>) -> Commodity {
        let pair = next(&mut pair.into_inner());
        match pair.as_rule() {
            Rule::quoted_string => Commodity::new(unquote(pair)),
            Rule::currency_symbol | Rule::bare_commodity => Commodity::new(pair.as_str()),
            rule => unreachable!("unexpected rule {:?} in commodity", rule),
        }
    }

    pub fn account(&mut self, pair: Pair<'i, Rule>) -> Account {
        match Account::parse(pair.as_str()) {
            Some(account) => account,
            None => unreachable!("grammar admitted malformed account {:?}", pair.as_str()),
        }
    }

    pub fn flag(&mut self, pair: Pair<'i, Rule>) -> Flag {
        Flag::from(text_of(pair))
    }

    pub fn tag(&mut self, pair: Pair<'i, Rule>) -> tc::Tag {
        text_of(pair).to_string()
    }

    pub fn payee(&mut self, pair: Pair<'i, Rule>) -> String {
        let pair = next(&mut pair.into_inner());
        match pair.as_rule() {
            Rule::quoted_string => unquote(pair),
            _ => pair.as_str().to_string(),
        }
    }

    pub fn forest(&mut self, pair: Pair<'i, Rule>) -> Forest {
        pair.into_inner().map(|p| self.tree(p)).collect()
    }

    fn tree(&mut self, pair: Pair<'i, Rule>) -> Located<Tree> {
        let pos = self.pos(&pair);
        let mut inner = pair.into_inner();
        let scalar = optional(Rule::scalar, &mut inner).map(|p| self.scalar(p));
        let children = optional(Rule::forest, &mut inner).map(|p| self.forest(p));
        Located::new(Tree { scalar, children }, pos)
    }

    fn scalar(&mut self, pair: Pair<'i, Rule>) -> Located<Scalar> {
        let pos = self.pos(&pair);
        let pair = next(&mut pair.into_inner());
        let scalar = match pair.as_rule() {
            Rule::date => Scalar::Date(self.date(pair)),
            Rule::time => Scalar::Time(self.time(pair)),
            Rule::zone => Scalar::Zone(self.zone(pair)),
            Rule::integer => match pair.as_str().parse() {
                Ok(n) => Scalar::Integer(n),
                Err(_) => unreachable!("grammar admitted integer {:?}", pair.as_str()),
            },
            Rule::quoted_string => Scalar::Text(unquote(pair)),
            Rule::text => Scalar::Text(pair.as_str().to_string()),
            rule => unreachable!("unexpected rule {:?} in scalar", rule),
        };
        Located::new(scalar, pos)
    }

    pub fn date(&mut self, pair: Pair<'i, Rule>) -> NaiveDate {
        let s = pair.as_str();
        let (y, m, d) = (digits(&s[0..4]), digits(&s[5..7]), digits(&s[8..10]));
        match NaiveDate::from_ymd_opt(y as i32, m, d) {
            Some(date) => date,
            None => unreachable!("grammar admitted invalid date {:?}", s),
        }
    }

    pub fn time(&mut self, pair: Pair<'i, Rule>) -> NaiveTime {
        let s = pair.as_str();
        let seconds = if s.len() > 5 { digits(&s[6..8]) } else { 0 };
        match NaiveTime::from_hms_opt(digits(&s[0..2]), digits(&s[3..5]), seconds) {
            Some(time) => time,
            None => unreachable!("grammar admitted invalid time {:?}", s),
        }
    }

    pub fn zone(&mut self, pair: Pair<'i, Rule>) -> Zone {
        let s = pair.as_str();
        let negative = s.starts_with('-');
        match Zone::new(negative, digits(&s[1..3]) as u8, digits(&s[3..5]) as u8) {
            Some(zone) => zone,
            None => unreachable!("grammar admitted invalid zone {:?}", s),
        }
    }
}

fn pole(pair: Pair<'_, Rule>) -> Pole {
    match pair.as_str() {
        "Dr" => Pole::DEBIT,
        "Cr" => Pole::CREDIT,
        other => unreachable!("unexpected pole {:?}", other),
    }
}

/// The text inside a delimited pair such as a flag, number or tag.
fn text_of<'i>(pair: Pair<'i, Rule>) -> &'i str {
    next(&mut pair.into_inner()).as_str()
}

/// Decodes the escapes and gaps of a quoted string.
fn unquote(pair: Pair<'_, Rule>) -> String {
    let mut out = String::new();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::plain => out.push_str(part.as_str()),
            Rule::escape => out.push(match part.as_str() {
                "\\n" => '\n',
                "\\\"" => '"',
                _ => '\\',
            }),
            Rule::string_gap => {}
            rule => unreachable!("unexpected rule {:?} in quoted string", rule),
        }
    }
    out
}

/// Value of a run of ASCII digits the grammar has already checked.
fn digits(s: &str) -> u32 {
    s.bytes().fold(0, |n, b| n * 10 + u32::from(b - b'0'))
}
