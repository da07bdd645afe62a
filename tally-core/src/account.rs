use std::fmt;

/// Represents an account.
///
/// An account name is a colon-separated list of sub-account names. A sub-account
/// name may contain single spaces between words, which keeps it apart from the
/// two-or-more spaces that separate an account from the amount on a posting line.
///
/// Some example accounts:
///
/// ```text
/// Assets:Checking Account
/// Liabilities:Credit Card:Visa
/// Expenses:Food:Groceries
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Account {
    /// Sub-account names, outermost first. Never empty.
    pub parts: Vec<String>,
}

impl Account {
    /// Builds an account from colon-separated text, rejecting empty segments
    /// and segments with leading, trailing or doubled spaces.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<String> = s.split(':').map(String::from).collect();
        if parts.iter().all(|p| is_sub_account(p)) {
            Some(Account { parts })
        } else {
            None
        }
    }

    /// The outermost sub-account, e.g. `Assets`.
    pub fn root(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }
}

fn is_sub_account(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(' ')
        && !s.ends_with(' ')
        && !s.contains("  ")
        && !s.contains(|c: char| c == '\t' || c == '\n' || c == '\r')
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_account() {
        let a = Account::parse("Assets:Checking Account").unwrap();
        assert_eq!(a.parts, vec!["Assets", "Checking Account"]);
        assert_eq!(a.root(), Some("Assets"));
        assert_eq!(a.to_string(), "Assets:Checking Account");

        assert!(Account::parse("Assets:").is_none());
        assert!(Account::parse("Assets:Checking  Account").is_none());
        assert!(Account::parse("Assets: Checking").is_none());
    }
}
