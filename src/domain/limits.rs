use crate::domain::jurisdiction::Jurisdiction;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Applies when no default entry is configured.
pub const FALLBACK_DEFAULT_THRESHOLD: Threshold = Threshold(dec!(0.10));

/// Maximum concentration share, a fraction in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Threshold(Decimal);

impl Threshold {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO && value <= Decimal::ONE {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidThreshold(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Threshold {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for Decimal {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// What a limit entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitScope {
    Default,
    Jurisdiction(Jurisdiction),
}

impl fmt::Display for LimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitScope::Default => f.write_str("DEFAULT"),
            LimitScope::Jurisdiction(j) => write!(f, "{}", j),
        }
    }
}

impl From<Option<Jurisdiction>> for LimitScope {
    fn from(jurisdiction: Option<Jurisdiction>) -> Self {
        jurisdiction.map_or(LimitScope::Default, LimitScope::Jurisdiction)
    }
}

/// One row of limit configuration.
///
/// On the wire a missing or `null` jurisdiction is the default entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationLimitConfig {
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
    pub threshold: Threshold,
}

impl ConcentrationLimitConfig {
    pub fn default_limit(threshold: Threshold) -> Self {
        Self {
            jurisdiction: None,
            threshold,
        }
    }

    pub fn for_jurisdiction(jurisdiction: Jurisdiction, threshold: Threshold) -> Self {
        Self {
            jurisdiction: Some(jurisdiction),
            threshold,
        }
    }

    pub fn scope(&self) -> LimitScope {
        self.jurisdiction.into()
    }
}

/// Immutable lookup table built from a full configuration listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimitSnapshot {
    limits: HashMap<LimitScope, Threshold>,
}

impl LimitSnapshot {
    /// Builds a snapshot, rejecting listings with more than one entry per scope.
    pub fn from_configs(configs: impl IntoIterator<Item = ConcentrationLimitConfig>) -> Result<Self> {
        let mut limits = HashMap::new();
        for config in configs {
            if limits.insert(config.scope(), config.threshold).is_some() {
                return Err(LedgerError::DuplicateLimit(config.scope()));
            }
        }
        Ok(Self { limits })
    }

    pub fn limit_for(&self, jurisdiction: Jurisdiction) -> Option<Threshold> {
        self.limits
            .get(&LimitScope::Jurisdiction(jurisdiction))
            .copied()
    }

    pub fn default_limit(&self) -> Threshold {
        self.limits
            .get(&LimitScope::Default)
            .copied()
            .unwrap_or(FALLBACK_DEFAULT_THRESHOLD)
    }

    /// Jurisdiction-specific limit, else the default.
    pub fn resolve(&self, jurisdiction: Jurisdiction) -> Threshold {
        self.limit_for(jurisdiction)
            .unwrap_or_else(|| self.default_limit())
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
