//! Execution-quality report types produced by the simulator.
//!
//! An [`ExecutionReport`] is the immutable terminal artifact of one request:
//! the idealized (dark pool) fill against the penalized public-market fill.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ideal vs. penalized output for one order.
///
/// `ideal_output`, `penalized_output` and `savings` are rounded to
/// [`REPORT_DECIMALS`](crate::constants::REPORT_DECIMALS) places with a
/// fixed scale, so their `Display` always shows two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub amount: Decimal,
    /// Input amount exactly as submitted.
    pub amount_text: String,
    pub token_in: String,
    pub token_out: String,
    pub duration_hours: u32,
    /// Duration exactly as submitted.
    pub duration_text: String,
    /// `amount * reference_price`.
    pub ideal_output: Decimal,
    /// `ideal_output * (1 - penalty_rate)`.
    pub penalized_output: Decimal,
    /// `ideal_output - penalized_output`.
    pub savings: Decimal,
}

impl std::fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Report[{} {} -> {} over {}h] ideal={} penalized={} savings={}",
            self.amount,
            self.token_in,
            self.token_out,
            self.duration_hours,
            self.ideal_output,
            self.penalized_output,
            self.savings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report() -> ExecutionReport {
        ExecutionReport {
            amount: Decimal::new(1, 2),
            amount_text: "0.01".into(),
            token_in: "ETH".into(),
            token_out: "USDC".into(),
            duration_hours: 48,
            duration_text: "48".into(),
            ideal_output: Decimal::new(3000, 2),
            penalized_output: Decimal::new(2910, 2),
            savings: Decimal::new(90, 2),
        }
    }

    #[test]
    fn display_contains_values() {
        let s = format!("{}", make_report());
        assert!(s.contains("ETH -> USDC"));
        assert!(s.contains("ideal=30.00"));
        assert!(s.contains("savings=0.90"));
    }

    #[test]
    fn serde_roundtrip_keeps_scale() {
        let report = make_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"idealOutput\":\"30.00\""), "Got: {json}");
        let back: ExecutionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
