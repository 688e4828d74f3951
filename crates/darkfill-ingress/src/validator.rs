//! Order validator: structural and semantic checks on a decoded order.
//!
//! Validation is exhaustive per call. Structure is checked first and every
//! missing field is reported together; only a structurally complete order
//! has its values checked, and again every value defect is reported.
//!
//! A field that is absent, `null` or the empty string counts as missing.

use std::str::FromStr;

use darkfill_types::{DarkfillError, Order, OrderDefect, Result, ValidatedOrder};
use rust_decimal::Decimal;

/// Wire names of the required order fields, in client key order.
pub const REQUIRED_FIELDS: [&str; 5] = ["amount", "tokenIn", "tokenOut", "duration", "timestamp"];

fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

/// Stateless gate between the codec and the simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderValidator;

impl OrderValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate `order` and parse its values.
    ///
    /// # Errors
    /// - `InvalidOrderStructure` listing every missing required field
    /// - `InvalidOrderValue` listing every unusable value
    pub fn validate(&self, order: &Order) -> Result<ValidatedOrder> {
        let fields = [
            present(order.amount.as_ref()),
            present(order.token_in.as_ref()),
            present(order.token_out.as_ref()),
            present(order.duration_hours.as_ref()),
            present(order.timestamp.as_ref()),
        ];
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .zip(fields)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(DarkfillError::InvalidOrderStructure { missing });
        }
        let [Some(amount), Some(token_in), Some(token_out), Some(duration), Some(timestamp)] =
            fields
        else {
            return Err(DarkfillError::Internal(
                "order fields vanished after structure check".into(),
            ));
        };

        if !order.unknown.is_empty() {
            let keys: Vec<&str> = order.unknown.keys().map(String::as_str).collect();
            tracing::warn!(?keys, "Dropping unrecognised order fields");
        }

        let mut defects = Vec::new();
        let amount_value = parse_amount(amount, &mut defects);
        let duration_hours = parse_duration(duration, &mut defects);
        let timestamp_ms = parse_timestamp(timestamp, &mut defects);
        let token_in = parse_token("tokenIn", token_in, &mut defects);
        let token_out = parse_token("tokenOut", token_out, &mut defects);

        match (amount_value, duration_hours, timestamp_ms, token_in, token_out) {
            (Some(amount_value), Some(duration_hours), Some(timestamp_ms), Some(token_in), Some(token_out))
                if defects.is_empty() =>
            {
                Ok(ValidatedOrder {
                    amount: amount_value,
                    amount_text: amount.to_string(),
                    token_in,
                    token_out,
                    duration_hours,
                    duration_text: duration.to_string(),
                    timestamp_ms,
                })
            }
            _ => Err(DarkfillError::InvalidOrderValue { defects }),
        }
    }
}

fn parse_amount(raw: &str, defects: &mut Vec<OrderDefect>) -> Option<Decimal> {
    let trimmed = raw.trim();
    let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    match parsed {
        Ok(amount) if amount > Decimal::ZERO => Some(amount.normalize()),
        Ok(_) => {
            defects.push(OrderDefect::AmountNotPositive(raw.to_string()));
            None
        }
        Err(_) => {
            defects.push(OrderDefect::AmountNotNumeric(raw.to_string()));
            None
        }
    }
}

fn parse_duration(raw: &str, defects: &mut Vec<OrderDefect>) -> Option<u32> {
    let Ok(hours) = raw.trim().parse::<i64>() else {
        defects.push(OrderDefect::DurationNotInteger(raw.to_string()));
        return None;
    };
    if hours <= 0 {
        defects.push(OrderDefect::DurationNotPositive(raw.to_string()));
        return None;
    }
    let Ok(hours) = u32::try_from(hours) else {
        defects.push(OrderDefect::ValueOutOfRange("duration"));
        return None;
    };
    Some(hours)
}

fn parse_timestamp(raw: &str, defects: &mut Vec<OrderDefect>) -> Option<u64> {
    if let Ok(ms) = raw.trim().parse::<u64>() {
        Some(ms)
    } else {
        defects.push(OrderDefect::TimestampNotInteger(raw.to_string()));
        None
    }
}

fn parse_token(name: &'static str, raw: &str, defects: &mut Vec<OrderDefect>) -> Option<String> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        defects.push(OrderDefect::EmptyToken(name));
        return None;
    }
    Some(symbol.to_string())
}
