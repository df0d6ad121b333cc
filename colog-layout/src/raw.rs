use crate::{callbacks, error::LayoutError, plugins};
use colog_framework::{
    ColorPair, HighlightRule, Layout, Value,
    field::{FieldSpec, RecordPattern, TagSpec},
    highlight::HighlightMatch,
    segmenter::BoundaryRule,
};
use serde::Deserialize;
use std::collections::BTreeMap;

type YamlValue = serde_yaml::Value;

/// layout document as written on disk
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawLayout {
    line_start: Option<YamlValue>,
    line_format: Option<YamlValue>,

    #[serde(default)]
    fields: BTreeMap<String, RawField>,

    #[serde(default)]
    tags: BTreeMap<String, RawTag>,

    #[serde(default)]
    highlight: Vec<RawHighlight>,

    #[serde(default)]
    plugins: Vec<String>,

    #[serde(default)]
    options: BTreeMap<String, YamlValue>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    callback: YamlValue,

    #[serde(default)]
    kwargs: BTreeMap<String, YamlValue>,

    argument: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    pattern: YamlValue,

    #[serde(default, rename = "where")]
    constraints: BTreeMap<String, Vec<YamlValue>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawMatchKind {
    #[default]
    Field,
    Tag,
}

#[derive(Debug, Deserialize)]
struct RawHighlight {
    #[serde(default, rename = "match")]
    kind: RawMatchKind,

    #[serde(alias = "tag")]
    field: String,

    is: Option<YamlValue>,

    #[serde(default)]
    color: Vec<i64>,
}

/// scalar text of `value`, looking through a YAML tag such as `!regexp`
fn scalar_text(value: &YamlValue, context: &str) -> Result<String, LayoutError> {
    match value {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Tagged(tagged) => scalar_text(&tagged.value, context),
        other => Err(LayoutError::unsupported(
            context,
            format!("expected a scalar, got {:?}", other),
        )),
    }
}

/// attribute-compatible value of a YAML scalar
fn to_value(value: &YamlValue, context: &str) -> Result<Value, LayoutError> {
    match value {
        YamlValue::String(s) => Ok(Value::Text(s.clone())),
        YamlValue::Bool(b) => Ok(Value::Bool(*b)),
        YamlValue::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Value::Integer(i)),
            (None, Some(f)) => Ok(Value::Float(f)),
            _ => Err(LayoutError::unsupported(context, format!("number {} out of range", n))),
        },
        YamlValue::Tagged(tagged) => to_value(&tagged.value, context),
        other => Err(LayoutError::unsupported(
            context,
            format!("expected a scalar, got {:?}", other),
        )),
    }
}

/// callback name, either plain text or the last segment of a tag like `!strptime`
fn callback_name(value: &YamlValue, field: &str) -> Result<String, LayoutError> {
    match value {
        YamlValue::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            Ok(tag
                .rsplit(['/', ':', '!'])
                .next()
                .unwrap_or_default()
                .to_string())
        }
        other => scalar_text(other, &format!("fields.{}.callback", field)),
    }
}

fn color_pair(rule: usize, color: &[i64]) -> Result<Option<ColorPair>, LayoutError> {
    let invalid = |reason: String| LayoutError::InvalidColor { rule, reason };

    let [fg, bg] = match color {
        [] => return Ok(None),
        [fg, bg] => [*fg, *bg],
        _ => {
            return Err(invalid(format!(
                "expected [foreground, background], got {} values",
                color.len()
            )));
        }
    };

    let component = |value: i64| {
        i16::try_from(value)
            .ok()
            .filter(|value| (-1..=255).contains(value))
            .ok_or_else(|| invalid(format!("{} is outside -1..=255", value)))
    };
    Ok(Some(ColorPair::new(component(fg)?, component(bg)?)))
}

impl RawLayout {
    pub(crate) fn into_layout(self) -> Result<Layout, LayoutError> {
        let line_start = match &self.line_start {
            Some(value) => BoundaryRule::new(&scalar_text(value, "line_start")?)
                .map_err(LayoutError::pattern("line_start"))?,
            None => BoundaryRule::every_line(),
        };

        let line_format = match &self.line_format {
            Some(value) => RecordPattern::new(&scalar_text(value, "line_format")?)
                .map_err(LayoutError::pattern("line_format"))?,
            None => RecordPattern::match_everything(),
        };

        let mut fields = BTreeMap::new();
        for (name, raw) in &self.fields {
            let callback = callback_name(&raw.callback, name)?;
            let builtin =
                callbacks::lookup(&callback).ok_or_else(|| LayoutError::UnknownCallback {
                    field: name.clone(),
                    callback: callback.clone(),
                })?;

            let argument = raw.argument.as_deref().unwrap_or(builtin.argument);
            let mut spec = FieldSpec::new(builtin.callback, argument);
            for (key, value) in &raw.kwargs {
                let value = to_value(value, &format!("fields.{}.kwargs.{}", name, key))?;
                spec = spec.with_kwarg(key.clone(), value);
            }
            fields.insert(name.clone(), spec);
        }

        let mut tags = BTreeMap::new();
        for (name, raw) in &self.tags {
            let context = format!("tags.{}", name);
            let pattern = scalar_text(&raw.pattern, &context)?;
            let mut spec =
                TagSpec::new(&pattern).map_err(LayoutError::pattern(context.clone()))?;
            for (group, allowed) in &raw.constraints {
                let allowed = allowed
                    .iter()
                    .map(|value| scalar_text(value, &format!("{}.where.{}", context, group)))
                    .collect::<Result<Vec<_>, _>>()?;
                spec = spec.with_constraint(group.clone(), allowed);
            }
            tags.insert(name.clone(), spec);
        }

        let mut highlight = Vec::with_capacity(self.highlight.len());
        for (index, raw) in self.highlight.iter().enumerate() {
            let matcher = match raw.kind {
                RawMatchKind::Field => {
                    let context = format!("highlight[{}].is", index);
                    let is = raw
                        .is
                        .as_ref()
                        .ok_or_else(|| LayoutError::unsupported(&context, "missing value"))?;
                    HighlightMatch::Field {
                        field: raw.field.clone(),
                        is: to_value(is, &context)?,
                    }
                }
                RawMatchKind::Tag => HighlightMatch::Tag {
                    tag: raw.field.clone(),
                },
            };
            highlight.push(HighlightRule {
                matcher,
                color: color_pair(index, &raw.color)?,
            });
        }

        if let Some(unknown) = self.plugins.iter().find(|name| !plugins::is_known(name)) {
            return Err(LayoutError::UnknownPlugin(unknown.clone()));
        }

        let mut options = BTreeMap::new();
        for (key, value) in &self.options {
            options.insert(key.clone(), to_value(value, &format!("options.{}", key))?);
        }

        Ok(Layout {
            line_start,
            line_format,
            fields,
            tags,
            highlight,
            plugins: self.plugins,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_pair_bounds() {
        assert_eq!(color_pair(0, &[]).unwrap(), None);
        assert_eq!(
            color_pair(0, &[-1, 255]).unwrap(),
            Some(ColorPair::new(-1, 255))
        );
        assert!(matches!(
            color_pair(3, &[256, 0]),
            Err(LayoutError::InvalidColor { rule: 3, .. })
        ));
        assert!(color_pair(0, &[-2, 0]).is_err());
        assert!(color_pair(0, &[1]).is_err());
    }

    #[test]
    fn test_callback_name_from_tag() {
        let value: YamlValue = serde_yaml::from_str("!strptime").unwrap();
        assert_eq!(callback_name(&value, "date").unwrap(), "strptime");

        let value: YamlValue = serde_yaml::from_str("int").unwrap();
        assert_eq!(callback_name(&value, "code").unwrap(), "int");
    }

    #[test]
    fn test_scalar_text_rejects_mappings() {
        let value: YamlValue = serde_yaml::from_str("{a: 1}").unwrap();
        assert!(matches!(
            scalar_text(&value, "line_start"),
            Err(LayoutError::UnsupportedValue { .. })
        ));
    }
}
