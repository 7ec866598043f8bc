use serde::Serialize;

use crate::filter::{Lookup, Subset};

/// Fraud split for one subset. `total == fraud_count + non_fraud_count`
/// always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub fraud_count: usize,
    pub non_fraud_count: usize,
}

impl Summary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Percentage of fraudulent transactions, 0.0 for an empty subset.
    pub fn fraud_share(&self) -> f64 {
        percentage(self.fraud_count, self.total)
    }

    pub fn non_fraud_share(&self) -> f64 {
        percentage(self.non_fraud_count, self.total)
    }

    pub fn has_fraud(&self) -> bool {
        self.fraud_count > 0
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

pub fn summarize(subset: &Subset<'_>) -> Summary {
    let total = subset.len();
    let fraud_count = subset.iter().filter(|tx| tx.is_fraud()).count();
    Summary {
        total,
        fraud_count,
        non_fraud_count: total - fraud_count,
    }
}

/// Summary of a lookup result; an `Empty` lookup is all zeros.
pub fn summarize_lookup(lookup: &Lookup<'_>) -> Summary {
    lookup.subset().map_or_else(Summary::empty, summarize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares() {
        let summary = Summary {
            total: 4,
            fraud_count: 1,
            non_fraud_count: 3,
        };
        assert_eq!(summary.fraud_share(), 25.0);
        assert_eq!(summary.non_fraud_share(), 75.0);
        assert!(summary.has_fraud());
    }

    #[test]
    fn test_empty_shares() {
        let summary = Summary::empty();
        assert_eq!(summary.fraud_share(), 0.0);
        assert_eq!(summary.non_fraud_share(), 0.0);
        assert!(!summary.has_fraud());
    }

    #[test]
    fn test_json_shape() {
        let summary = Summary {
            total: 2,
            fraud_count: 1,
            non_fraud_count: 1,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"total": 2, "fraud_count": 1, "non_fraud_count": 1})
        );
    }
}
