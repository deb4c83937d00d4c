// Dashboard snapshot - point-in-time metrics payload returned by the backend
use super::error::DashboardError;
use serde::Deserialize;
use serde_json::Value;

/// Monthly portfolio series, positionally aligned with the chart's period labels
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub deposits: Vec<f64>,
    pub loans: Vec<f64>,
}

impl Portfolio {
    pub fn new(deposits: Vec<f64>, loans: Vec<f64>) -> Self {
        Self { deposits, loans }
    }
}

/// A validated snapshot. Either dataset may be absent, but not both.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub portfolio: Option<Portfolio>,
    pub customer_distribution: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    portfolio: Option<RawPortfolio>,
    customer_distribution: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawPortfolio {
    deposits: Vec<f64>,
    loans: Vec<f64>,
}

impl DashboardSnapshot {
    pub fn new(portfolio: Option<Portfolio>, customer_distribution: Option<Vec<f64>>) -> Self {
        Self {
            portfolio,
            customer_distribution,
        }
    }

    /// Decode and validate the backend's JSON result
    pub fn from_value(value: Value) -> Result<Self, DashboardError> {
        let raw: RawSnapshot =
            serde_json::from_value(value).map_err(|e| DashboardError::malformed(e.to_string()))?;

        let snapshot = Self {
            portfolio: raw.portfolio.map(|p| Portfolio::new(p.deposits, p.loans)),
            customer_distribution: raw.customer_distribution,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.portfolio.is_none() && self.customer_distribution.is_none() {
            return Err(DashboardError::malformed(
                "snapshot carries neither portfolio nor customer_distribution",
            ));
        }

        if let Some(portfolio) = &self.portfolio {
            if portfolio.deposits.len() != portfolio.loans.len() {
                return Err(DashboardError::malformed(format!(
                    "portfolio has {} deposit points but {} loan points",
                    portfolio.deposits.len(),
                    portfolio.loans.len()
                )));
            }
            check_finite("portfolio.deposits", &portfolio.deposits)?;
            check_finite("portfolio.loans", &portfolio.loans)?;
        }

        if let Some(shares) = &self.customer_distribution {
            check_finite("customer_distribution", shares)?;
            if let Some((idx, value)) = shares.iter().enumerate().find(|(_, v)| **v < 0.0) {
                return Err(DashboardError::malformed(format!(
                    "customer_distribution[{}] is negative ({})",
                    idx, value
                )));
            }
        }

        Ok(())
    }
}

fn check_finite(field: &str, values: &[f64]) -> Result<(), DashboardError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(DashboardError::malformed(format!(
            "{}[{}] is not a finite number",
            field, idx
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_full_snapshot() {
        let snapshot = DashboardSnapshot::from_value(json!({
            "portfolio": {"deposits": [1, 2, 3], "loans": [4, 5, 6]},
            "customer_distribution": [10, 20, 30, 40]
        }))
        .unwrap();

        let portfolio = snapshot.portfolio.unwrap();
        assert_eq!(portfolio.deposits, vec![1.0, 2.0, 3.0]);
        assert_eq!(portfolio.loans, vec![4.0, 5.0, 6.0]);
        assert_eq!(snapshot.customer_distribution, Some(vec![10.0, 20.0, 30.0, 40.0]));
    }

    #[test]
    fn test_absent_or_null_fields_are_optional() {
        let snapshot = DashboardSnapshot::from_value(json!({
            "portfolio": {"deposits": [1.5], "loans": [2.5]},
            "customer_distribution": null,
            "generated_at": "2024-06-01T00:00:00Z"
        }))
        .unwrap();
        assert!(snapshot.portfolio.is_some());
        assert!(snapshot.customer_distribution.is_none());

        let snapshot =
            DashboardSnapshot::from_value(json!({"customer_distribution": [50, 50]})).unwrap();
        assert!(snapshot.portfolio.is_none());
    }

    #[test]
    fn test_rejects_empty_snapshot() {
        let err = DashboardSnapshot::from_value(json!({})).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedSnapshot { .. }));
    }

    #[test]
    fn test_rejects_misaligned_portfolio() {
        let err = DashboardSnapshot::from_value(json!({
            "portfolio": {"deposits": [1, 2, 3], "loans": [4, 5]}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            DashboardError::malformed("portfolio has 3 deposit points but 2 loan points")
        );
    }

    #[test]
    fn test_rejects_portfolio_missing_series() {
        let err = DashboardSnapshot::from_value(json!({
            "portfolio": {"deposits": [1, 2, 3]}
        }))
        .unwrap_err();
        assert!(matches!(err, DashboardError::MalformedSnapshot { .. }));
    }

    #[test]
    fn test_rejects_wrong_types() {
        for payload in [
            json!(false),
            json!([1, 2, 3]),
            json!({"customer_distribution": ["45", 25]}),
            json!({"portfolio": {"deposits": [1, null], "loans": [1, 2]}}),
        ] {
            let err = DashboardSnapshot::from_value(payload).unwrap_err();
            assert!(matches!(err, DashboardError::MalformedSnapshot { .. }));
        }
    }

    #[test]
    fn test_rejects_negative_share() {
        let err = DashboardSnapshot::from_value(json!({
            "customer_distribution": [45, -5, 20, 10]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            DashboardError::malformed("customer_distribution[1] is negative (-5)")
        );
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let snapshot = DashboardSnapshot::new(
            Some(Portfolio::new(vec![1.0, f64::NAN], vec![1.0, 2.0])),
            None,
        );
        assert!(snapshot.validate().is_err());
    }
}
