use std::fmt;

/// A bracketed marker on a top line or posting, such as `[R]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Flag {
    Cleared,
    Reconciled,
    Other(String),
}

impl Flag {
    pub fn as_str(&self) -> &str {
        match self {
            Flag::Cleared => "C",
            Flag::Reconciled => "R",
            Flag::Other(s) => s,
        }
    }
}

impl From<&str> for Flag {
    fn from(s: &str) -> Self {
        match s {
            "C" => Flag::Cleared,
            "R" => Flag::Reconciled,
            _ => Flag::Other(s.to_string()),
        }
    }
}

impl From<String> for Flag {
    fn from(s: String) -> Self {
        match s.as_str() {
            "C" => Flag::Cleared,
            "R" => Flag::Reconciled,
            _ => Flag::Other(s),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.as_str())
    }
}
