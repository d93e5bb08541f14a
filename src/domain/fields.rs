use serde_json::{Number, Value};

/// Decoded `winner` field of a match record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinnerIndicator {
    /// Missing, null, blank or zero
    Absent,
    /// One-based opponent position as reported by the API
    Index(i64),
    /// Present but not an integer; holds the raw text
    Malformed(String),
}

impl WinnerIndicator {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::Absent;
        };

        if is_empty_value(value) {
            return Self::Absent;
        }

        match value {
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map(Self::Index)
                .unwrap_or_else(|_| Self::Malformed(text.clone())),
            Value::Number(number) => number_as_integer(number)
                .map(Self::Index)
                .unwrap_or_else(|| Self::Malformed(number.to_string())),
            other => Self::Malformed(other.to_string()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Interpret a `finished` style flag (bool, 0/1 or "true"/"false")
pub fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim().to_lowercase().as_str(), "1" | "true"),
        _ => false,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.trim().is_empty(),
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn number_as_integer(number: &Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }

    let n = number.as_f64()?;
    let in_range = n >= i64::MIN as f64 && n <= i64::MAX as f64;
    if n.is_finite() && n.fract() == 0.0 && in_range {
        Some(n as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("1"), WinnerIndicator::Index(1))]
    #[case(json!(" 2 "), WinnerIndicator::Index(2))]
    #[case(json!(2), WinnerIndicator::Index(2))]
    #[case(json!(1.0), WinnerIndicator::Index(1))]
    #[case(json!("3"), WinnerIndicator::Index(3))]
    #[case(json!("0"), WinnerIndicator::Index(0))]
    #[case(json!(-1), WinnerIndicator::Index(-1))]
    #[case(json!("abc"), WinnerIndicator::Malformed("abc".to_string()))]
    #[case(json!("1.5"), WinnerIndicator::Malformed("1.5".to_string()))]
    #[case(json!(1.5), WinnerIndicator::Malformed("1.5".to_string()))]
    #[case(json!(true), WinnerIndicator::Malformed("true".to_string()))]
    #[case(json!(["1"]), WinnerIndicator::Malformed("[\"1\"]".to_string()))]
    fn test_winner_decoding(#[case] raw: Value, #[case] expected: WinnerIndicator) {
        assert_eq!(WinnerIndicator::from_value(Some(&raw)), expected);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!("  "))]
    #[case(json!(0))]
    #[case(json!(false))]
    #[case(json!([]))]
    #[case(json!({}))]
    fn test_empty_winner_is_absent(#[case] raw: Value) {
        assert!(WinnerIndicator::from_value(Some(&raw)).is_absent());
    }

    #[test]
    fn test_missing_winner_is_absent() {
        assert!(WinnerIndicator::from_value(None).is_absent());
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(1), true)]
    #[case(json!("1"), true)]
    #[case(json!(" TRUE "), true)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!("0"), false)]
    #[case(json!("false"), false)]
    #[case(json!(""), false)]
    #[case(json!(null), false)]
    fn test_finished_flag(#[case] raw: Value, #[case] expected: bool) {
        assert_eq!(is_truthy_flag(&raw), expected);
    }
}
