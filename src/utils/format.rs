use itertools::Itertools;

/// Renders `val` with `precision` significant digits in `%g` style:
/// trailing zeros dropped, scientific notation for very small or large magnitudes.
///
/// 102.0 -> "102"
/// 0.000123456789 -> "0.000123457"
/// 12345678.0 -> "1.23457e+07"
pub fn format_sig(val: f64, precision: usize) -> String {
    if !val.is_finite() {
        return format!("{}", val);
    }
    if val == 0.0 {
        return "0".to_string();
    }
    let precision = precision.max(1);

    // Round first so the exponent reflects carries like 999999.5 -> 1e6.
    let sci = format!("{:.*e}", precision - 1, val);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exp.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, val)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Truncates toward zero and groups thousands with commas: 1234567.9 -> "1,234,567".
pub fn format_grouped_int(val: f64) -> String {
    if !val.is_finite() {
        return format!("{}", val);
    }
    let int = val.trunc() as i64;
    let digits = int.unsigned_abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .join(",");
    if int < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
