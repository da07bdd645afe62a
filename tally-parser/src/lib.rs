use chrono::{NaiveDate, NaiveTime};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;
use typed_builder::TypedBuilder;

use tally_core as tc;

use convert::Converter;
pub use error::{ParseError, ParseErrorKind, ParseResult};

mod convert;
pub mod error;

#[derive(PestParser)]
#[grammar = "tally.pest"]
pub struct TallyParser;

/// Options that change how a file is read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct ParseConfig {
    /// Whether numbers are written `1,000.25` or `1.000,25`.
    #[builder(default)]
    pub radix: tc::Radix,
}

/// A grammar production that can be parsed on its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Production {
    Date,
    Time,
    Zone,
    Commodity,
    Account,
    Magnitude,
    Trio,
    Flag,
    Tag,
    Payee,
    Comment,
    Forest,
    TopLine,
    Posting,
    Transaction,
    Price,
    File,
}

impl Production {
    /// The whole-input rule and the bare rule for this production.
    fn rules(self, radix: tc::Radix) -> (Rule, Rule) {
        use tc::Radix::{Comma, Period};
        match (self, radix) {
            (Production::Date, _) => (Rule::full_date, Rule::date),
            (Production::Time, _) => (Rule::full_time, Rule::time),
            (Production::Zone, _) => (Rule::full_zone, Rule::zone),
            (Production::Commodity, _) => (Rule::full_commodity, Rule::commodity),
            (Production::Account, _) => (Rule::full_account, Rule::account),
            (Production::Flag, _) => (Rule::full_flag, Rule::flag),
            (Production::Tag, _) => (Rule::full_tag, Rule::tag),
            (Production::Payee, _) => (Rule::full_payee, Rule::payee),
            (Production::Comment, _) => (Rule::full_comment, Rule::comment_item),
            (Production::Forest, _) => (Rule::full_forest, Rule::forest),
            (Production::TopLine, _) => (Rule::full_top_line, Rule::top_line),
            (Production::Magnitude, Period) => (Rule::full_magnitude_p, Rule::magnitude_p),
            (Production::Magnitude, Comma) => (Rule::full_magnitude_c, Rule::magnitude_c),
            (Production::Trio, Period) => (Rule::full_trio_p, Rule::trio_p),
            (Production::Trio, Comma) => (Rule::full_trio_c, Rule::trio_c),
            (Production::Posting, Period) => (Rule::full_posting_p, Rule::posting_p),
            (Production::Posting, Comma) => (Rule::full_posting_c, Rule::posting_c),
            (Production::Transaction, Period) => {
                (Rule::full_transaction_p, Rule::transaction_p)
            }
            (Production::Transaction, Comma) => (Rule::full_transaction_c, Rule::transaction_c),
            (Production::Price, Period) => (Rule::full_price_p, Rule::price_p),
            (Production::Price, Comma) => (Rule::full_price_c, Rule::price_c),
            (Production::File, Period) => (Rule::full_file_p, Rule::file_p),
            (Production::File, Comma) => (Rule::full_file_c, Rule::file_c),
        }
    }
}

/// The converted value of a single production.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Parsed {
    Date(NaiveDate),
    Time(NaiveTime),
    Zone(tc::Zone),
    Commodity(tc::Commodity),
    Account(tc::Account),
    Magnitude(tc::Magnitude),
    Trio(tc::Trio),
    Flag(tc::Flag),
    Tag(tc::Tag),
    Payee(String),
    Comment(tc::Located<String>),
    Forest(tc::Forest),
    TopLine(tc::Located<tc::TopLine>),
    Posting(tc::Located<tc::Posting<tc::Trio>>),
    Transaction(tc::Transaction<tc::Trio>),
    Price(tc::Located<tc::Price>),
    File(Vec<tc::FileItem>),
}

/// Parses `input` as exactly one `production`, which must span all of it.
pub fn parse_production(
    production: Production,
    radix: tc::Radix,
    input: &str,
) -> ParseResult<Parsed> {
    let pair = start(production, radix, input)?;
    let mut c = Converter::new(input, radix);
    let parsed = match production {
        Production::Date => Parsed::Date(c.date(pair)),
        Production::Time => Parsed::Time(c.time(pair)),
        Production::Zone => Parsed::Zone(c.zone(pair)),
        Production::Commodity => Parsed::Commodity(c.commodity(pair)),
        Production::Account => Parsed::Account(c.account(pair)),
        Production::Magnitude => Parsed::Magnitude(c.magnitude(pair)),
        Production::Trio => Parsed::Trio(c.trio(pair)),
        Production::Flag => Parsed::Flag(c.flag(pair)),
        Production::Tag => Parsed::Tag(c.tag(pair)),
        Production::Payee => Parsed::Payee(c.payee(pair)),
        Production::Comment => Parsed::Comment(c.comment(pair)),
        Production::Forest => Parsed::Forest(c.forest(pair)),
        Production::TopLine => Parsed::TopLine(c.top_line(pair)),
        Production::Posting => Parsed::Posting(c.posting(pair)),
        Production::Transaction => Parsed::Transaction(c.transaction(pair)),
        Production::Price => Parsed::Price(c.price(pair)),
        Production::File => Parsed::File(c.file(pair)),
    };
    Ok(parsed)
}

/// Parses and converts a whole ledger file.
pub fn parse(input: &str, config: &ParseConfig) -> ParseResult<Vec<tc::FileItem>> {
    let pair = start(Production::File, config.radix, input)?;
    let items = Converter::new(input, config.radix).file(pair);
    tracing::debug!(items = items.len(), radix = ?config.radix, "parsed ledger file");
    Ok(items)
}

fn start(production: Production, radix: tc::Radix, input: &str) -> ParseResult<Pair<'_, Rule>> {
    let (full, bare) = production.rules(radix);
    match TallyParser::parse(full, input) {
        Ok(pairs) => Ok(convert::unwrap_full(pairs)),
        Err(err) => {
            let read = TallyParser::parse(bare, input)
                .ok()
                .and_then(|mut pairs| pairs.next())
                .map(|pair| pair.as_span().end());
            let kind = match read {
                Some(_) => ParseErrorKind::LeftoverInput,
                None => ParseErrorKind::AbortedParse,
            };
            let mut err = ParseError::from_pest(kind, err, input);
            err.unread = read.map(|offset| tc::Cursor::locate(input, offset));
            tracing::debug!(?production, %err, "parse failed");
            Err(err)
        }
    }
}
