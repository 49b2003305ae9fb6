//! Amount formatting helpers
//!
//! Amounts are plain `f64` currency units. Whole amounts print without
//! decimals ("₹5000"), fractional ones with two ("₹12.50").

/// Format an amount with a currency symbol
pub fn format_amount(symbol: &str, value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs.fract() == 0.0 {
        format!("{}{}{:.0}", sign, symbol, abs)
    } else {
        format!("{}{}{:.2}", sign, symbol, abs)
    }
}
