use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! jurisdictions {
    ($($code:ident),+ $(,)?) => {
        /// Brazilian federative unit a loan is attributed to.
        ///
        /// The set is closed: anything outside it is rejected at parse time,
        /// so downstream code never handles free-form codes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Jurisdiction {
            $($code),+
        }

        impl Jurisdiction {
            pub const ALL: &'static [Jurisdiction] = &[$(Jurisdiction::$code),+];

            /// Canonical upper-case code.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Jurisdiction::$code => stringify!($code)),+
                }
            }
        }
    };
}

jurisdictions!(
    AC, AL, AP, AM, BA, CE, DF, ES, GO, MA, MT, MS, MG, PA, PB, PR, PE, PI, RJ, RN, RS, RO, RR,
    SC, SP, SE, TO,
);

impl Jurisdiction {
    pub const COUNT: usize = Self::ALL.len();

    /// Membership check, case-insensitive.
    pub fn is_valid(code: &str) -> bool {
        code.parse::<Jurisdiction>().is_ok()
    }

    /// Position within [`Jurisdiction::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Jurisdiction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|j| j.as_str() == normalized)
            .ok_or_else(|| LedgerError::InvalidJurisdiction(s.to_string()))
    }
}

impl TryFrom<String> for Jurisdiction {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Jurisdiction> for String {
    fn from(jurisdiction: Jurisdiction) -> Self {
        jurisdiction.as_str().to_string()
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
