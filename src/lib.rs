//! Parse, convert and proof plain-text double-entry ledgers.
//!
//! ```text
//! 2024-01-05 "Grocer" ^food
//!     Expenses:Food    Dr 10 USD
//!     Assets:Cash
//! ```
//!
//! [`load_str`] takes one file's text through the whole pipeline.
//! [`load_files`] does the same for several files and reports every failing
//! file, not just the first.

use tally_core::{proof_items, NonEmpty, ProofError, ProofedItem, Validation};
use tally_parser::{parse, ParseConfig, ParseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("could not read {filename}")]
    NoText { filename: String },
    #[error("{filename}:{}: {error}", .error.line())]
    Parse {
        filename: String,
        #[source]
        error: ParseError,
    },
    #[error("{filename}: {} proofing error(s), first: {}", .errors.len(), .errors.first())]
    Proof {
        filename: String,
        errors: NonEmpty<ProofError>,
    },
}

impl LedgerError {
    pub fn filename(&self) -> &str {
        match self {
            LedgerError::NoText { filename }
            | LedgerError::Parse { filename, .. }
            | LedgerError::Proof { filename, .. } => filename,
        }
    }
}

/// Parses and proofs the ledger `text`; `name` labels any error.
pub fn load_str(
    name: &str,
    text: &str,
    config: &ParseConfig,
) -> Result<Vec<ProofedItem>, LedgerError> {
    let items = parse(text, config).map_err(|error| LedgerError::Parse {
        filename: name.to_string(),
        error,
    })?;
    let proofed = proof_items(items)
        .into_result()
        .map_err(|errors| LedgerError::Proof {
            filename: name.to_string(),
            errors,
        })?;
    tracing::debug!(file = name, items = proofed.len(), "loaded ledger");
    Ok(proofed)
}

/// Loads every file in `names`, getting each file's text from `read`.
///
/// A file that `read` has no text for, fails to parse or fails to proof adds
/// one error; the other files are still loaded.
pub fn load_files<I, S, R>(
    names: I,
    mut read: R,
    config: &ParseConfig,
) -> Validation<Vec<(String, Vec<ProofedItem>)>, LedgerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: FnMut(&str) -> Option<String>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let text = read(name).ok_or_else(|| LedgerError::NoText {
                filename: name.to_string(),
            })?;
            load_str(name, &text, config).map(|items| (name.to_string(), items))
        })
        .inspect(|loaded| {
            if let Err(err) = loaded {
                tracing::debug!(%err, "ledger file failed");
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use tally_core::{Pos, ProofErrorKind, Radix};
    use tally_parser::ParseErrorKind;

    const GROCER: &str = indoc!(
        "
        # January
        P 2024-01-01 USD EUR 0.91
        2024-01-05 Grocer
          Expenses:Food  Dr 10.50 USD
          Assets:Cash
        "
    );

    #[test]
    fn loads_and_infers() {
        let items = load_str("jan.ledger", GROCER, &ParseConfig::default()).unwrap();
        assert_eq!(items.len(), 2);
        match &items[1] {
            ProofedItem::Transaction(txn) => {
                let cash = &txn.postings.second().amount;
                assert_eq!(cash.quantity, Decimal::new(-1050, 2));
                assert_eq!(cash.commodity.as_str(), "USD");
            }
            other => panic!("expected a transaction, got {:?}", other),
        }
    }

    #[test]
    fn comma_radix() {
        let config = ParseConfig::builder().radix(Radix::Comma).build();
        let text = "2024-01-05 Bakery\n  A  Dr 1.000,5 EUR\n  B  Cr 1000,50 EUR\n";
        assert_eq!(load_str("b.ledger", text, &config).unwrap().len(), 1);
    }

    #[test]
    fn parse_failure_names_the_file() {
        let err = load_str("bad.ledger", "2024-02-30 X\n  A  1 X\n  B\n", &ParseConfig::default())
            .unwrap_err();
        assert_eq!(err.filename(), "bad.ledger");
        match err {
            LedgerError::Parse { error, .. } => {
                assert_eq!(error.kind, ParseErrorKind::LeftoverInput);
                assert_eq!(error.location, Pos::new(1, 1));
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn parse_failure_names_the_failing_item_line() {
        let text = indoc!(
            "
            2024-01-04 Fine
              A  Dr 1 USD
              B

            2024-01-05 Broken
              A  Dr 2 USD
              B  Cr 0 USD
            "
        );
        let err = load_str("feb.ledger", text, &ParseConfig::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("feb.ledger:5: "), "{}", message);
        match err {
            LedgerError::Parse { error, .. } => {
                assert_eq!(error.unread, Some(Pos::new(5, 1)));
                assert_eq!(error.location.line, 7);
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty_posting_may_come_first() {
        let text = indoc!(
            "
            2024-01-05 Grocer
              Assets:Cash
              Expenses:Food  Dr 10 USD
              Expenses:Tax  0.5
            "
        );
        let items = load_str("first.ledger", text, &ParseConfig::default()).unwrap();
        match &items[0] {
            ProofedItem::Transaction(txn) => {
                let cash = &txn.postings.first().amount;
                assert_eq!(cash.quantity, Decimal::new(-95, 1));
                assert_eq!(cash.commodity.as_str(), "USD");
                assert_eq!(txn.postings.as_slice()[2].amount.quantity, Decimal::new(-5, 1));
            }
            other => panic!("expected a transaction, got {:?}", other),
        }
    }

    #[test]
    fn proof_failures_accumulate() {
        let text = indoc!(
            "
            P 2024-01-01 USD USD 1
            2024-01-05 Lopsided
              A  Dr 10 USD
              B  Cr 9 USD
            "
        );
        match load_str("two.ledger", text, &ParseConfig::default()).unwrap_err() {
            LedgerError::Proof { errors, .. } => {
                assert_eq!(errors.len(), 2);
                assert!(matches!(errors.first().kind, ProofErrorKind::InvalidPrice(_)));
                assert!(matches!(errors.as_slice()[1].kind, ProofErrorKind::Unbalanced(_)));
                assert_eq!(errors.as_slice()[1].location, Pos::new(2, 1));
            }
            other => panic!("expected proof errors, got {:?}", other),
        }
    }

    #[test]
    fn every_failing_file_is_reported() {
        let mut files = HashMap::new();
        files.insert("good.ledger", GROCER.to_string());
        files.insert("bad.ledger", "2024-01-05 X\n  A  Dr 1 X\n  B  Dr 1 X\n".to_string());
        let read = |name: &str| files.get(name).cloned();

        let loaded = load_files(
            vec!["good.ledger", "missing.ledger", "bad.ledger"],
            read,
            &ParseConfig::default(),
        );
        let errors = loaded.into_result().unwrap_err();
        let names: Vec<&str> = errors.iter().map(LedgerError::filename).collect();
        assert_eq!(names, vec!["missing.ledger", "bad.ledger"]);
        assert!(matches!(errors.first(), LedgerError::NoText { .. }));

        let loaded = load_files(&["good.ledger"], |name| files.get(name).cloned(), &ParseConfig::default());
        match loaded {
            Validation::Success(files) => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].0, "good.ledger");
                assert_eq!(files[0].1.len(), 2);
            }
            Validation::Failure(errors) => panic!("unexpected failures {:?}", errors),
        }
    }
}
