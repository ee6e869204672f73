//! Polling interval values
//!
//! The refresh interval arrives either as a number or as the string stored in
//! the settings document (`"30"`), so it is carried loosely and coerced late.

/// A polling interval in seconds, before coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalValue {
    Seconds(i64),
    Text(String),
    Invalid,
}

impl IntervalValue {
    /// Coerces the value to whole seconds
    ///
    /// Text is trimmed and parsed as a base-10 integer. Returns `None` when
    /// the value cannot be coerced.
    pub fn seconds(&self) -> Option<i64> {
        match self {
            Self::Seconds(secs) => Some(*secs),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Invalid => None,
        }
    }
}

impl From<i64> for IntervalValue {
    fn from(secs: i64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<&str> for IntervalValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for IntervalValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&serde_json::Value> for IntervalValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map_or(Self::Invalid, Self::Seconds),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            _ => Self::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coercion() {
        assert_eq!(IntervalValue::from(30i64).seconds(), Some(30));
        assert_eq!(IntervalValue::from("30").seconds(), Some(30));
        assert_eq!(IntervalValue::from(" 45 ").seconds(), Some(45));
        assert_eq!(IntervalValue::from("-5").seconds(), Some(-5));
        assert_eq!(IntervalValue::from("abc").seconds(), None);
        assert_eq!(IntervalValue::from("").seconds(), None);
        assert_eq!(IntervalValue::from("1.5").seconds(), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(IntervalValue::from(&json!(10)).seconds(), Some(10));
        assert_eq!(IntervalValue::from(&json!("60")).seconds(), Some(60));
        assert_eq!(IntervalValue::from(&json!(2.5)), IntervalValue::Invalid);
        assert_eq!(IntervalValue::from(&json!(true)), IntervalValue::Invalid);
        assert_eq!(IntervalValue::from(&json!(null)).seconds(), None);
    }
}
