use std::error::Error;
use std::fmt;

use tally_core::Pos;

use super::Rule;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// The input does not start with the requested production.
    AbortedParse,
    /// The production was read, but input remains after it.
    LeftoverInput,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// Where parsing could go no further.
    pub location: Pos,
    /// Descriptions of what would have been accepted at `location`.
    pub expected: Vec<String>,
    /// Where the unread input begins, for [`ParseErrorKind::LeftoverInput`].
    /// In a file this is the start of the first item that failed.
    pub unread: Option<Pos>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::AbortedParse => write!(f, "Invalid input")?,
            ParseErrorKind::LeftoverInput => write!(f, "Unexpected trailing input")?,
        }
        write!(f, " at {}", self.location)?;
        if let Some(unread) = self.unread.filter(|u| u.line != self.location.line) {
            write!(f, ", in the item starting on line {}", unread.line)?;
        }
        match self.expected.as_slice() {
            [] => Ok(()),
            [only] => write!(f, ": expected {}", only),
            [init @ .., last] => write!(f, ": expected {} or {}", init.join(", "), last),
        }
    }
}

impl Error for ParseError {}

impl ParseError {
    /// The line to point a reader at: where the unread input begins, or else
    /// where parsing stopped.
    pub fn line(&self) -> usize {
        self.unread.unwrap_or(self.location).line
    }

    pub(crate) fn from_pest(kind: ParseErrorKind, err: pest::error::Error<Rule>, input: &str) -> Self {
        let offset = match err.location {
            pest::error::InputLocation::Pos(p) => p,
            pest::error::InputLocation::Span((start, _)) => start,
        };
        let mut expected: Vec<String> = match &err.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                positives.iter().map(|r| describe(*r).to_string()).collect()
            }
            pest::error::ErrorVariant::CustomError { message } => vec![message.clone()],
        };
        expected.sort();
        expected.dedup();
        ParseError {
            kind,
            location: tally_core::Cursor::locate(input, offset),
            expected,
            unread: None,
        }
    }
}

/// A reader-facing name for a rule, used in the expected set.
pub(crate) fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::space => "space",
        Rule::comment_item | Rule::full_comment => "comment",
        Rule::comment_text => "comment text",
        Rule::date | Rule::full_date => "date",
        Rule::time | Rule::full_time => "time of day",
        Rule::zone | Rule::full_zone => "time zone offset",
        Rule::quoted_string => "quoted string",
        Rule::plain => "string character",
        Rule::escape => "escape sequence",
        Rule::string_gap => "string gap",
        Rule::commodity | Rule::full_commodity => "commodity",
        Rule::currency_symbol => "currency symbol",
        Rule::bare_commodity => "unquoted commodity",
        Rule::account | Rule::full_account => "account name",
        Rule::flag | Rule::full_flag => "flag",
        Rule::flag_text => "flag text",
        Rule::number => "transaction number",
        Rule::number_text => "transaction number text",
        Rule::tag | Rule::full_tag => "tag",
        Rule::tag_name => "tag name",
        Rule::payee | Rule::full_payee => "payee",
        Rule::bare_payee => "unquoted payee",
        Rule::forest | Rule::full_forest => "metadata forest",
        Rule::tree => "metadata tree",
        Rule::scalar => "metadata value",
        Rule::integer => "integer",
        Rule::text => "unquoted text",
        Rule::nil_p | Rule::nil_c => "zero quantity",
        Rule::brim_p | Rule::brim_c => "non-zero quantity",
        Rule::magnitude_p | Rule::magnitude_c | Rule::full_magnitude_p | Rule::full_magnitude_c => {
            "quantity"
        }
        Rule::pole => "'Dr' or 'Cr'",
        Rule::sign => "'+' or '-'",
        Rule::signed_p | Rule::signed_c => "signed quantity",
        Rule::trio_p | Rule::trio_c | Rule::full_trio_p | Rule::full_trio_c => "amount",
        Rule::signed_qty_commodity_p | Rule::signed_qty_commodity_c => {
            "debit or credit with quantity and commodity"
        }
        Rule::signed_qty_p | Rule::signed_qty_c => "debit or credit with quantity",
        Rule::side_commodity => "debit or credit with commodity",
        Rule::side => "debit or credit",
        Rule::qty_commodity_p | Rule::qty_commodity_c => "signed quantity with commodity",
        Rule::unsigned_commodity_p | Rule::unsigned_commodity_c => "quantity with commodity",
        Rule::zero_commodity_p | Rule::zero_commodity_c => "zero quantity with commodity",
        Rule::rate_p | Rule::rate_c => "exchange rate",
        Rule::exchange_p | Rule::exchange_c => "commodity and exchange rate",
        Rule::price_p | Rule::price_c | Rule::full_price_p | Rule::full_price_c => "price",
        Rule::top_line | Rule::full_top_line => "transaction top line",
        Rule::posting_p | Rule::posting_c | Rule::full_posting_p | Rule::full_posting_c => {
            "posting"
        }
        Rule::transaction_p
        | Rule::transaction_c
        | Rule::full_transaction_p
        | Rule::full_transaction_c => "transaction",
        Rule::file_p | Rule::file_c | Rule::full_file_p | Rule::full_file_c => "ledger file",
    }
}
