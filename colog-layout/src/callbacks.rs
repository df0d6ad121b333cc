//! Built-in field callbacks a layout can refer to by name.
//!
//! Every callback receives the field's keyword arguments, the captured text
//! included, and returns the attribute value or an error describing why the
//! text could not be converted.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, format::ParseErrorKind};
use colog_framework::field::{CallbackError, CallbackResult, Kwargs, Value};

pub type BuiltinFn = fn(&Kwargs) -> CallbackResult;

/// a named callback and the keyword its captured text is passed as by default
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub argument: &'static str,
    pub callback: BuiltinFn,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "strptime",
        argument: "date_string",
        callback: strptime,
    },
    Builtin {
        name: "int",
        argument: "value",
        callback: int,
    },
    Builtin {
        name: "float",
        argument: "value",
        callback: float,
    },
    Builtin {
        name: "lower",
        argument: "value",
        callback: lower,
    },
    Builtin {
        name: "upper",
        argument: "value",
        callback: upper,
    },
    Builtin {
        name: "strip",
        argument: "value",
        callback: strip,
    },
    Builtin {
        name: "reverse",
        argument: "value",
        callback: reverse,
    },
    Builtin {
        name: "slice",
        argument: "value",
        callback: slice,
    },
];

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

fn text_arg<'k>(kwargs: &'k Kwargs, name: &str) -> Result<&'k str, CallbackError> {
    match kwargs.get(name) {
        Some(Value::Text(text)) => Ok(text.as_str()),
        Some(other) => Err(format!("argument '{}' must be text, got {}", name, other).into()),
        None => Err(format!("missing argument '{}'", name).into()),
    }
}

fn int_arg(kwargs: &Kwargs, name: &str) -> Result<Option<i64>, CallbackError> {
    match kwargs.get(name) {
        None => Ok(None),
        Some(Value::Integer(i)) => Ok(Some(*i)),
        Some(Value::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("argument '{}' must be an integer, got '{}'", name, text).into()),
        Some(other) => Err(format!("argument '{}' must be an integer, got {}", name, other).into()),
    }
}

/// date-only formats resolve to midnight
fn strptime(kwargs: &Kwargs) -> CallbackResult {
    let date_string = text_arg(kwargs, "date_string")?;
    let format = text_arg(kwargs, "format")?;

    match NaiveDateTime::parse_from_str(date_string, format) {
        Ok(timestamp) => Ok(Value::Timestamp(timestamp)),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            let date = NaiveDate::parse_from_str(date_string, format)?;
            Ok(Value::Timestamp(date.and_time(NaiveTime::MIN)))
        }
        Err(e) => Err(e.into()),
    }
}

fn int(kwargs: &Kwargs) -> CallbackResult {
    let value = text_arg(kwargs, "value")?.trim();
    let base = int_arg(kwargs, "base")?.unwrap_or(10);
    let radix = u32::try_from(base)
        .ok()
        .filter(|radix| (2..=36).contains(radix))
        .ok_or_else(|| format!("base must be within 2..=36, got {}", base))?;

    let parsed = i64::from_str_radix(value, radix)
        .map_err(|e| format!("invalid integer '{}' in base {}: {}", value, radix, e))?;
    Ok(Value::Integer(parsed))
}

fn float(kwargs: &Kwargs) -> CallbackResult {
    let value = text_arg(kwargs, "value")?.trim();
    let parsed: f64 = value
        .parse()
        .map_err(|e| format!("invalid float '{}': {}", value, e))?;
    Ok(Value::Float(parsed))
}

fn lower(kwargs: &Kwargs) -> CallbackResult {
    Ok(Value::Text(text_arg(kwargs, "value")?.to_lowercase()))
}

fn upper(kwargs: &Kwargs) -> CallbackResult {
    Ok(Value::Text(text_arg(kwargs, "value")?.to_uppercase()))
}

fn strip(kwargs: &Kwargs) -> CallbackResult {
    Ok(Value::Text(text_arg(kwargs, "value")?.trim().to_string()))
}

fn reverse(kwargs: &Kwargs) -> CallbackResult {
    Ok(Value::Text(text_arg(kwargs, "value")?.chars().rev().collect()))
}

/// `value[start:stop:step]` over characters; negative bounds count from the end
fn slice(kwargs: &Kwargs) -> CallbackResult {
    let chars: Vec<char> = text_arg(kwargs, "value")?.chars().collect();
    let len = chars.len() as i64;

    let step = int_arg(kwargs, "step")?.unwrap_or(1);
    if step <= 0 {
        return Err(format!("slice step must be positive, got {}", step).into());
    }

    let clamp = |index: i64| {
        if index < 0 {
            (index + len).max(0)
        } else {
            index.min(len)
        }
    };
    let start = int_arg(kwargs, "start")?.map_or(0, clamp);
    let stop = int_arg(kwargs, "stop")?.map_or(len, clamp);

    let sliced = (start..stop)
        .step_by(step as usize)
        .map(|index| chars[index as usize])
        .collect();
    Ok(Value::Text(sliced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: &[(&str, Value)]) -> CallbackResult {
        let builtin = lookup(name).unwrap();
        let kwargs: Kwargs = args
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        (builtin.callback)(&kwargs)
    }

    fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Value {
        Value::Timestamp(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
    }

    #[test]
    fn test_strptime_date_only_is_midnight() {
        let parsed = call(
            "strptime",
            &[
                ("date_string", Value::from("2 July, 2020")),
                ("format", Value::from("%d %B, %Y")),
            ],
        )
        .unwrap();
        assert_eq!(parsed, timestamp(2020, 7, 2, 0, 0, 0));
    }

    #[test]
    fn test_strptime_with_time() {
        let parsed = call(
            "strptime",
            &[
                ("date_string", Value::from("2024-03-01 12:30:05")),
                ("format", Value::from("%Y-%m-%d %H:%M:%S")),
            ],
        )
        .unwrap();
        assert_eq!(parsed, timestamp(2024, 3, 1, 12, 30, 5));
    }

    #[test]
    fn test_strptime_rejects_mismatch() {
        let result = call(
            "strptime",
            &[
                ("date_string", Value::from("yesterday")),
                ("format", Value::from("%Y-%m-%d")),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_strptime_requires_format() {
        let err = call("strptime", &[("date_string", Value::from("2020"))]).unwrap_err();
        assert_eq!(err.to_string(), "missing argument 'format'");
    }

    #[test]
    fn test_int() {
        assert_eq!(
            call("int", &[("value", Value::from(" 42 "))]).unwrap(),
            Value::Integer(42)
        );
        assert_eq!(
            call("int", &[("value", Value::from("ff")), ("base", Value::Integer(16))]).unwrap(),
            Value::Integer(255)
        );
        assert!(call("int", &[("value", Value::from("4x2"))]).is_err());
        assert!(call("int", &[("value", Value::from("1")), ("base", Value::Integer(1))]).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(
            call("float", &[("value", Value::from("0.25"))]).unwrap(),
            Value::Float(0.25)
        );
        assert!(call("float", &[("value", Value::from("quarter"))]).is_err());
    }

    #[test]
    fn test_text_callbacks() {
        let value = || vec![("value", Value::from("  Space "))];
        assert_eq!(call("lower", &value()).unwrap(), Value::from("  space "));
        assert_eq!(call("upper", &value()).unwrap(), Value::from("  SPACE "));
        assert_eq!(call("strip", &value()).unwrap(), Value::from("Space"));
        assert_eq!(
            call("reverse", &[("value", Value::from("Space"))]).unwrap(),
            Value::from("ecapS")
        );
    }

    #[test]
    fn test_slice() {
        let sliced = call(
            "slice",
            &[
                ("value", Value::from("separated")),
                ("start", Value::Integer(1)),
                ("stop", Value::Integer(6)),
                ("step", Value::Integer(2)),
            ],
        )
        .unwrap();
        assert_eq!(sliced, Value::from("eaa"));
    }

    #[test]
    fn test_slice_defaults_and_negative_bounds() {
        let sliced = call(
            "slice",
            &[("value", Value::from("separated")), ("start", Value::Integer(-3))],
        )
        .unwrap();
        assert_eq!(sliced, Value::from("ted"));

        let sliced = call(
            "slice",
            &[
                ("value", Value::from("abc")),
                ("start", Value::Integer(2)),
                ("stop", Value::Integer(1)),
            ],
        )
        .unwrap();
        assert_eq!(sliced, Value::from(""));
    }

    #[test]
    fn test_slice_rejects_zero_step() {
        let result = call(
            "slice",
            &[("value", Value::from("abc")), ("step", Value::Integer(0))],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_callback() {
        assert!(lookup("eval").is_none());
        assert!(names().any(|name| name == "strptime"));
    }
}
