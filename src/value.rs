use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValueError;

static SINGLE_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\-0-9.]+$").expect("hardcoded pattern is valid"));
static LIST_OF_FLOATS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\-0-9.]+\s*,?\s*)+$").expect("hardcoded pattern is valid"));

const TRUE_WORDS: [&str; 4] = ["1", "yes", "true", "on"];
const FALSE_WORDS: [&str; 4] = ["0", "no", "false", "off"];

/// A value on the right-hand side of `key = value`.
///
/// Without coercion every value is `Str`. With coercion enabled, values that
/// look like numbers become `Float` or `List`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Float(f64),
    List(Vec<f64>),
}

/// Classify `raw` and convert it to a number or list of numbers if it looks like one.
///
/// Anything that matches a numeric shape but does not actually parse (`-`, `1,2,`, `1 2`)
/// stays a string.
#[must_use]
pub fn coerce(raw: &str) -> Value {
    if SINGLE_FLOAT.is_match(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
    } else if LIST_OF_FLOATS.is_match(raw) {
        let list = raw
            .split(',')
            .map(|token| token.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>();

        if let Ok(list) = list {
            return Value::List(list);
        }
    }

    Value::Str(raw.to_owned())
}

impl Value {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Self::Str(ref s) => Some(s),
            Self::Float(..) | Self::List(..) => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(f) => Some(f),
            Self::Str(..) | Self::List(..) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[f64]> {
        match *self {
            Self::List(ref list) => Some(list),
            Self::Str(..) | Self::Float(..) => None,
        }
    }

    /// Empty values (including a coerced zero) make the typed getters fall back.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match *self {
            Self::Str(ref s) => s.trim().is_empty(),
            Self::List(ref list) => list.is_empty(),
            Self::Float(f) => f == 0.0,
        }
    }

    pub fn to_int(&self) -> Result<i64, ValueError> {
        // Floats go through their shortest decimal form, so `2.0` reads as `2`
        // while `2.5` is rejected like the string "2.5" would be.
        let text = match *self {
            Self::Str(ref s) => s.trim().to_owned(),
            Self::Float(f) => f.to_string(),
            Self::List(..) => return Err(ValueError::NotScalar),
        };

        text.parse::<i64>()
            .map_err(|source| ValueError::BadInt { value: text, source })
    }

    pub fn to_float(&self) -> Result<f64, ValueError> {
        match *self {
            Self::Str(ref s) => s.trim().parse::<f64>().map_err(|source| ValueError::BadFloat {
                value: s.clone(),
                source,
            }),
            Self::Float(f) => Ok(f),
            Self::List(..) => Err(ValueError::NotScalar),
        }
    }

    /// Accepts `1/yes/true/on` and `0/no/false/off`, case-insensitively.
    pub fn to_bool(&self) -> Result<bool, ValueError> {
        let text = match *self {
            Self::Str(ref s) => s.trim().to_lowercase(),
            Self::Float(f) => f.to_string(),
            Self::List(..) => return Err(ValueError::NotScalar),
        };

        if TRUE_WORDS.contains(&text.as_str()) {
            Ok(true)
        } else if FALSE_WORDS.contains(&text.as_str()) {
            Ok(false)
        } else {
            Err(ValueError::BadBoolean { value: text })
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Str(ref s) => f.write_str(s),
            Self::Float(x) => write!(f, "{x}"),
            Self::List(ref list) => {
                for (i, x) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::List(value)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_float() {
        assert_eq!(coerce("1.5"), Value::Float(1.5));
        assert_eq!(coerce("-3"), Value::Float(-3.0));
    }

    #[test]
    fn list_of_floats() {
        assert_eq!(coerce("1,2,3"), Value::List(vec![1.0, 2.0, 3.0]));
        assert_eq!(coerce("0.5 , -1, 2.25"), Value::List(vec![0.5, -1.0, 2.25]));
    }

    #[test]
    fn plain_strings_are_untouched() {
        assert_eq!(coerce("hello"), Value::Str("hello".to_owned()));
        assert_eq!(coerce("1.5 meters"), Value::Str("1.5 meters".to_owned()));
        assert_eq!(coerce(""), Value::Str(String::new()));
    }

    #[test]
    fn numeric_looking_garbage_stays_a_string() {
        assert_eq!(coerce("-"), Value::Str("-".to_owned()));
        assert_eq!(coerce("1..2"), Value::Str("1..2".to_owned()));
        assert_eq!(coerce("1,2,"), Value::Str("1,2,".to_owned()));
        assert_eq!(coerce("1 2"), Value::Str("1 2".to_owned()));
    }

    #[test]
    fn booleans() {
        for word in ["1", "yes", "TRUE", "On"] {
            assert_eq!(Value::from(word).to_bool(), Ok(true), "{word}");
        }
        for word in ["0", "No", "false", "OFF"] {
            assert_eq!(Value::from(word).to_bool(), Ok(false), "{word}");
        }

        assert_eq!(
            Value::from("maybe").to_bool(),
            Err(ValueError::BadBoolean {
                value: "maybe".to_owned()
            })
        );
        assert_eq!(Value::Float(1.0).to_bool(), Ok(true));
        assert!(Value::Float(0.5).to_bool().is_err());
    }

    #[test]
    fn integers() {
        assert_eq!(Value::from(" 42 ").to_int(), Ok(42));
        assert_eq!(Value::Float(2.0).to_int(), Ok(2));
        assert!(matches!(
            Value::Float(2.5).to_int(),
            Err(ValueError::BadInt { .. })
        ));
        assert!(matches!(
            Value::from("1.0").to_int(),
            Err(ValueError::BadInt { .. })
        ));
        assert_eq!(Value::List(vec![1.0]).to_int(), Err(ValueError::NotScalar));
    }

    #[test]
    fn floats() {
        assert_eq!(Value::from("2").to_float(), Ok(2.0));
        assert_eq!(Value::Float(-0.25).to_float(), Ok(-0.25));
        assert!(matches!(
            Value::from("two").to_float(),
            Err(ValueError::BadFloat { .. })
        ));
    }

    #[test]
    fn emptiness() {
        assert!(Value::from("").is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(Value::Float(0.0).is_empty());
        assert!(Value::Float(-0.0).is_empty());
        assert!(!Value::Float(0.5).is_empty());
        assert!(!Value::from("0").is_empty());
        assert!(!Value::from("x").is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::List(vec![1.0, 2.5]).to_string(), "1, 2.5");
    }
}
