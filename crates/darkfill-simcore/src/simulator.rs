//! Execution simulator: idealized fill vs. penalized public-market fill.
//!
//! Computation happens in full `Decimal` precision. Each reported value is
//! rounded exactly once, half away from zero, to
//! [`REPORT_DECIMALS`](darkfill_types::constants::REPORT_DECIMALS) places.
//!
//! The simulator trusts its input: a [`ValidatedOrder`] has already had its
//! values checked, and nothing here re-validates them.

use darkfill_types::constants::REPORT_DECIMALS;
use darkfill_types::{
    DarkfillError, ExecutionReport, OrderDefect, Result, SimulationConfig, ValidatedOrder,
};
use rust_decimal::{Decimal, RoundingStrategy};

fn out_of_range(what: &'static str) -> DarkfillError {
    DarkfillError::InvalidOrderValue {
        defects: vec![OrderDefect::ValueOutOfRange(what)],
    }
}

/// Round to the report precision with a fixed scale, so `0.9` renders as `0.90`.
///
/// # Errors
/// `InvalidOrderValue` naming `what` if the mantissa has no room for the
/// fractional digits. `rescale` stops short silently in that case.
pub fn round_for_report(value: Decimal, what: &'static str) -> Result<Decimal> {
    let mut rounded =
        value.round_dp_with_strategy(REPORT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(REPORT_DECIMALS);
    if rounded.scale() == REPORT_DECIMALS {
        Ok(rounded)
    } else {
        Err(out_of_range(what))
    }
}

/// Simulate `order` against an explicit reference price and penalty rate.
///
/// - `ideal_output = amount * reference_price`
/// - `penalized_output = ideal_output * (1 - penalty_rate)`
/// - `savings = ideal_output - penalized_output`
///
/// # Errors
/// `InvalidOrderValue` if an intermediate product leaves the `Decimal`
/// range or a result cannot be reported with two fractional digits.
pub fn simulate(
    order: &ValidatedOrder,
    reference_price: Decimal,
    penalty_rate: Decimal,
) -> Result<ExecutionReport> {
    let ideal = order
        .amount
        .checked_mul(reference_price)
        .ok_or_else(|| out_of_range("ideal output"))?;
    let retained = Decimal::ONE
        .checked_sub(penalty_rate)
        .ok_or_else(|| out_of_range("penalty factor"))?;
    let penalized = ideal
        .checked_mul(retained)
        .ok_or_else(|| out_of_range("penalized output"))?;
    let savings = ideal
        .checked_sub(penalized)
        .ok_or_else(|| out_of_range("savings"))?;

    let report = ExecutionReport {
        amount: order.amount,
        amount_text: order.amount_text.clone(),
        token_in: order.token_in.clone(),
        token_out: order.token_out.clone(),
        duration_hours: order.duration_hours,
        duration_text: order.duration_text.clone(),
        ideal_output: round_for_report(ideal, "ideal output")?,
        penalized_output: round_for_report(penalized, "penalized output")?,
        savings: round_for_report(savings, "savings")?,
    };
    tracing::debug!(pair = %order.pair(), %report, "Simulated execution");
    Ok(report)
}

/// [`simulate`] with the parameters of `config`.
pub fn simulate_with(order: &ValidatedOrder, config: &SimulationConfig) -> Result<ExecutionReport> {
    simulate(order, config.reference_price, config.penalty_rate)
}
