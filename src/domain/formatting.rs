//! en-US number presentation: `$1,234.50`, `1,234.57`, `12.30%`.
//!
//! Grouped output rounds the shortest round-trip decimal form of the value,
//! halves away from zero, so `1.005` with two decimals gives `1.01`.
//! [`to_fixed`] rounds the exact binary value instead and gives `1.00`.

/// Locale-formatted USD amount. Negative values render as `-$1.00`.
pub fn format_currency(value: f64) -> String {
    match special_value(value) {
        Some(text) => format!("{}${}", sign(value), text),
        None => format!("{}${}", sign(value), grouped_fixed(value.abs(), 2)),
    }
}

/// Currency with an explicit `+` for non-negative amounts (price change cards).
pub fn format_signed_currency(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

/// Grouped number with exactly `decimals` fraction digits.
pub fn format_number(value: f64, decimals: usize) -> String {
    match special_value(value) {
        Some(text) => format!("{}{}", sign(value), text),
        None => format!("{}{}", sign(value), grouped_fixed(value.abs(), decimals)),
    }
}

/// `value` is already scaled by 100: `12.3` renders as `12.30%`.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_number(value, 2))
}

/// Fixed-point text without grouping, e.g. axis ticks `"$" + to_fixed(v, 2)`.
/// Exact halves such as `2.5` or `0.125` round away from zero.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if let Some(text) = special_value(value) {
        return format!("{}{}", sign(value), text);
    }
    let mut magnitude = value.abs();
    // `{:.N}` sends exact halves to even; step one ulp past them.
    if is_exact_half(magnitude, decimals) {
        magnitude = f64::from_bits(magnitude.to_bits() + 1);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{:.*}", sign, decimals, magnitude)
}

/// True when `magnitude` lies exactly halfway between two `decimals`-place
/// values, i.e. it is `odd * 2^-(decimals + 1)`.
fn is_exact_half(magnitude: f64, decimals: usize) -> bool {
    if magnitude == 0.0 || !magnitude.is_finite() {
        return false;
    }
    let bits = magnitude.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & 0x000f_ffff_ffff_ffff;
    // magnitude == mantissa * 2^(exponent - 1075)
    let mantissa = if exponent == 0 { fraction << 1 } else { fraction | 0x0010_0000_0000_0000 };
    let scale = 1075 - exponent - i64::from(mantissa.trailing_zeros());
    scale == decimals as i64 + 1
}

fn special_value(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some("∞")
    } else {
        None
    }
}

fn sign(value: f64) -> &'static str {
    if value.is_sign_negative() && !value.is_nan() { "-" } else { "" }
}

fn grouped_fixed(magnitude: f64, decimals: usize) -> String {
    let (int_part, frac_part) = round_decimal(magnitude, decimals);
    join_parts(&group_thousands(&int_part), &frac_part)
}

fn join_parts(int_part: &str, frac_part: &str) -> String {
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Split a finite non-negative value into integer and fraction digit strings,
/// rounded half away from zero at `decimals` places.
fn round_decimal(magnitude: f64, decimals: usize) -> (String, String) {
    // `Display` for f64 never uses exponent notation and is round-trip shortest.
    let text = format!("{}", magnitude);
    let (int_text, frac_text) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text.clone(), String::new()),
    };

    if frac_text.len() <= decimals {
        let mut frac = frac_text;
        frac.extend(std::iter::repeat_n('0', decimals - frac.len()));
        return (int_text, frac);
    }

    let round_up = frac_text.as_bytes()[decimals] >= b'5';
    let mut digits: Vec<u8> = int_text
        .bytes()
        .chain(frac_text.bytes().take(decimals))
        .collect();

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let int_part = String::from_utf8_lossy(&digits[..split]).into_owned();
    let frac_part = String::from_utf8_lossy(&digits[split..]).into_owned();
    (int_part, frac_part)
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
