//! Theme selection and options.

use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;

/// Rendering theme.
///
/// Written either as a bare name (`theme: readthedocs`) or as a mapping
/// with a `name` key plus theme-specific options. The written form is kept
/// so that emission reproduces it.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Theme name. A mapping may omit it when only `custom_dir` is used.
    pub name: Option<String>,
    /// Options other than `name`, in written order.
    pub options: Mapping,
    shorthand: bool,
}

impl Theme {
    /// Theme written as a mapping with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            options: Mapping::new(),
            shorthand: false,
        }
    }

    /// Look up a theme option.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Whether syntax highlighting is switched on (`highlightjs`).
    pub fn highlightjs(&self) -> Option<bool> {
        self.option("highlightjs").and_then(Value::as_bool)
    }

    /// Languages registered for syntax highlighting (`hljs_languages`).
    pub fn hljs_languages(&self) -> Vec<&str> {
        string_list(self.option("hljs_languages"))
    }

    /// Enabled theme feature flags (`features`).
    pub fn features(&self) -> Vec<&str> {
        string_list(self.option("features"))
    }

    pub(crate) fn from_value(value: &Value) -> Result<Self, ManifestError> {
        match value {
            Value::String(name) => Ok(Self {
                name: Some(name.clone()),
                options: Mapping::new(),
                shorthand: true,
            }),
            Value::Mapping(map) => {
                let mut name = None;
                let mut options = Mapping::new();
                for (key, val) in map {
                    if key.as_str() == Some("name") {
                        let Value::String(n) = val else {
                            return Err(ManifestError::shape(
                                "theme > name",
                                "theme name must be a string",
                            ));
                        };
                        name = Some(n.clone());
                    } else {
                        options.insert(key.clone(), val.clone());
                    }
                }
                Ok(Self {
                    name,
                    options,
                    shorthand: false,
                })
            }
            _ => Err(ManifestError::shape(
                "theme",
                "theme must be a name or a mapping",
            )),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        if self.shorthand
            && self.options.is_empty()
            && let Some(name) = &self.name
        {
            return Value::String(name.clone());
        }
        let mut map = Mapping::new();
        if let Some(name) = &self.name {
            map.insert(Value::from("name"), Value::String(name.clone()));
        }
        for (key, val) in &self.options {
            map.insert(key.clone(), val.clone());
        }
        Value::Mapping(map)
    }
}

fn string_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
