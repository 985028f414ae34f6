//! Display helpers for currency amounts and raw listing values.

use serde_json::Value;

/// A numeric amount that remembers whether it came from an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub integral: bool,
}

impl Amount {
    pub fn from_json(value: &Value) -> Option<Self> {
        Some(Self {
            value: value.as_f64()?,
            integral: value.is_i64() || value.is_u64(),
        })
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            integral: self.integral && rhs.integral,
        }
    }
}

/// `€` followed by the amount with comma thousands separators.
///
/// Integral amounts print without a fraction (`€400,000`); fractional ones keep
/// it (`€1,234.5`, `€400,000.0`).
pub fn euro(amount: Amount) -> String {
    format!("€{}", group_thousands(amount))
}

fn group_thousands(amount: Amount) -> String {
    let text = if amount.integral {
        format!("{:.0}", amount.value)
    } else {
        amount.value.to_string()
    };
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, fraction) = match unsigned.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match (fraction, amount.integral) {
        (Some(fraction), _) => format!("{sign}{grouped}.{fraction}"),
        (None, false) => format!("{sign}{grouped}.0"),
        (None, true) => format!("{sign}{grouped}"),
    }
}

/// Strings without quotes, everything else in JSON notation.
pub fn display_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Join a list value with `", "`.
pub fn join_list(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(display_raw)
            .collect::<Vec<_>>()
            .join(", "),
        other => display_raw(other),
    }
}
