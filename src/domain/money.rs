use thiserror::Error;

/// Values at or above this magnitude are printed in exponential form.
const EXPONENTIAL_THRESHOLD: f64 = 1e21;

/// Why a piece of user input could not become an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectedInput {
    #[error("input is empty")]
    Empty,

    #[error("not a finite number: {0}")]
    NotANumber(String),
}

/// Parse user input into an entry value.
/// Example: "15.5" -> 15.5, " 20 " -> 20.0, "1e3" -> 1000.0
pub fn parse_amount(input: &str) -> Result<f64, RejectedInput> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RejectedInput::Empty);
    }

    match input.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RejectedInput::NotANumber(input.to_string())),
    }
}

/// Format a value with exactly two decimals.
/// Example: 30.02 -> "30.02", 1.0 / 3.0 -> "0.33", 0.125 -> "0.13"
///
/// The digits are the ones closest to the exact binary value; exact ties
/// round away from zero. Negative zero prints as "0.00".
pub fn format_fixed2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value.abs() >= EXPONENTIAL_THRESHOLD {
        // "1e21" -> "1e+21"; the exponent is always positive here
        return format!("{:e}", value).replacen('e', "e+", 1);
    }

    let value = if value == 0.0 { 0.0 } else { value };
    if is_hundredths_tie(value) {
        return round_tie_away(&format!("{:.3}", value));
    }
    format!("{:.2}", value)
}

/// A tie at the third decimal needs an exact fractional part of .125, .375,
/// .625 or .875, i.e. `value * 8` is an odd integer.
fn is_hundredths_tie(value: f64) -> bool {
    let eighths = value * 8.0;
    eighths.fract() == 0.0 && eighths % 2.0 != 0.0
}

/// Drop the trailing '5' of a three-decimal string and bump the last kept
/// digit, carrying leftwards.
fn round_tie_away(exact: &str) -> String {
    let mut digits: Vec<u8> = exact.as_bytes().to_vec();
    digits.pop();

    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        match *digit {
            b'9' => *digit = b'0',
            b'0'..=b'8' => {
                *digit += 1;
                carry = false;
            }
            _ => {}
        }
    }

    let mut rounded = String::from_utf8_lossy(&digits).into_owned();
    if carry {
        let at = usize::from(rounded.starts_with('-'));
        rounded.insert(at, '1');
    }
    rounded
}
