use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the remote posture feed.
///
/// Every field is kept as raw JSON: the feed is loosely typed and the
/// dashboard renders values verbatim rather than validating them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostureReading {
    pub status: Field,
    pub distance: Field,
    pub score: Field,
    pub alerts: Field,
    pub created_at: Field,
}

impl PostureReading {
    /// Builds a reading from an arbitrary JSON element of the feed.
    ///
    /// Objects contribute their fields; scalars carry none. Returns `None`
    /// for `null`, which has no fields to read.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(map) => Some(Self {
                status: Field::from_entry(map.get("status")),
                distance: Field::from_entry(map.get("distance")),
                score: Field::from_entry(map.get("score")),
                alerts: Field::from_entry(map.get("alerts")),
                created_at: Field::from_entry(map.get("createdAt")),
            }),
            _ => Some(Self::default()),
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(&self.status.0, Some(Value::String(s)) if s == "good")
    }
}

/// A possibly absent JSON value taken from a reading. `Some(Value::Null)`
/// and `None` are distinct: the feed can send an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field(pub Option<Value>);

impl Field {
    pub fn absent() -> Self {
        Self(None)
    }

    pub fn new(value: Value) -> Self {
        Self(Some(value))
    }

    fn from_entry(entry: Option<&Value>) -> Self {
        Self(entry.cloned())
    }

    /// Text shown when the value is written into a display target.
    ///
    /// An explicit `null` clears the target; an absent field prints as
    /// `undefined`.
    pub fn display_text(&self) -> String {
        match &self.0 {
            None => "undefined".to_string(),
            Some(Value::Null) => String::new(),
            Some(value) => value_text(value),
        }
    }

    /// Numeric reading of the value, `NaN` when it has none.
    pub fn as_number(&self) -> f64 {
        match &self.0 {
            None => f64::NAN,
            Some(Value::Null) => 0.0,
            Some(Value::Bool(b)) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => parse_number(s),
            Some(other) => parse_number(&value_text(other)),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

/// String form of a JSON value as a browser would produce it: arrays join
/// their elements with commas (`null` elements are empty) and objects
/// collapse to `[object Object]`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n.as_f64().unwrap_or(f64::NAN)),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Parses text as a browser's `Number()` does.
///
/// Accepts decimal literals with optional sign and exponent, `Infinity`,
/// and unsigned `0x`/`0o`/`0b` integers. Blank text is zero; anything else
/// is `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixed {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let decimal_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Formats a number the way a browser prints it: shortest round-trip
/// digits, plain notation for magnitudes in `[1e-6, 1e21)` and exponent
/// notation outside it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{e_sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{e_sign}{}", e.abs())
        }
    };

    format!("{sign}{body}")
}

/// Current contents of the seven display targets.
///
/// `None` marks a target that no cycle has written yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub status_text: Option<String>,
    pub status_class: Option<String>,
    pub distance: Option<String>,
    pub score: Option<String>,
    pub alerts: Option<String>,
    pub mission_bar_width: Option<String>,
    pub mission_text: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub started_at: String,
    pub cycles_started: u64,
    pub renders: u64,
    pub failures: u64,
    pub last_render_at: Option<String>,
}
