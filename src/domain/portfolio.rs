use crate::domain::jurisdiction::Jurisdiction;
use crate::domain::risk::concentration_share;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Ledger totals derived at query time. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioAggregate {
    pub total_amount: u64,
    pub amount_by_jurisdiction: HashMap<Jurisdiction, u64>,
}

impl PortfolioAggregate {
    pub fn amount_for(&self, jurisdiction: Jurisdiction) -> u64 {
        self.amount_by_jurisdiction
            .get(&jurisdiction)
            .copied()
            .unwrap_or_default()
    }

    /// Current share of the total held by `jurisdiction`; zero on an empty ledger.
    pub fn share_of(&self, jurisdiction: Jurisdiction) -> Decimal {
        concentration_share(self.amount_for(jurisdiction), self.total_amount)
    }

    /// Buckets ordered by jurisdiction code.
    pub fn buckets(&self) -> Vec<(Jurisdiction, u64)> {
        let mut buckets: Vec<_> = self
            .amount_by_jurisdiction
            .iter()
            .map(|(j, amount)| (*j, *amount))
            .collect();
        buckets.sort_by_key(|(j, _)| j.as_str());
        buckets
    }

    /// `true` when the buckets sum to the total.
    pub fn is_consistent(&self) -> bool {
        self.amount_by_jurisdiction
            .values()
            .try_fold(0u64, |acc, v| acc.checked_add(*v))
            == Some(self.total_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_aggregate() {
        let aggregate = PortfolioAggregate::default();
        assert_eq!(aggregate.amount_for(Jurisdiction::SP), 0);
        assert_eq!(aggregate.share_of(Jurisdiction::SP), Decimal::ZERO);
        assert!(aggregate.is_consistent());
        assert!(aggregate.buckets().is_empty());
    }

    #[test]
    fn test_share_and_ordering() {
        let aggregate = PortfolioAggregate {
            total_amount: 400,
            amount_by_jurisdiction: HashMap::from([
                (Jurisdiction::SP, 100),
                (Jurisdiction::AC, 300),
            ]),
        };
        assert_eq!(aggregate.share_of(Jurisdiction::SP), dec!(0.25));
        assert_eq!(
            aggregate.buckets(),
            vec![(Jurisdiction::AC, 300), (Jurisdiction::SP, 100)]
        );
        assert!(aggregate.is_consistent());
    }

    #[test]
    fn test_inconsistent_aggregate_detected() {
        let aggregate = PortfolioAggregate {
            total_amount: 500,
            amount_by_jurisdiction: HashMap::from([(Jurisdiction::SP, 100)]),
        };
        assert!(!aggregate.is_consistent());
    }
}
