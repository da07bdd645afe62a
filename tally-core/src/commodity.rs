use std::fmt;

/// The unit an amount is counted in: `USD`, `$`, `Stock:ACME` or any quoted
/// string. Compared and ordered by its exact text.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Commodity(String);

impl Commodity {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Commodity(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Commodity {
    fn from(s: &str) -> Self {
        Commodity::new(s)
    }
}

impl From<String> for Commodity {
    fn from(s: String) -> Self {
        Commodity(s)
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
