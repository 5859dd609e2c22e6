//! Plugin and markdown-extension lists.
//!
//! Both `plugins` and `markdown_extensions` share one shape: a list whose
//! items are either a bare name or a single-key mapping of name to options,
//! or alternatively a mapping of name to options.

use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;

/// A single enabled plugin or markdown extension.
#[derive(Clone, Debug, PartialEq)]
pub struct Extension {
    /// Plugin or extension name (e.g., `mkdocstrings`, `pymdownx.highlight`).
    pub name: String,
    /// Options as written. `None` for a bare name.
    pub options: Option<Value>,
}

impl Extension {
    /// Enabled extension without options.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    /// Enabled extension with options.
    pub fn with_options(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options: Some(options),
        }
    }

    /// Follow a key path through nested option mappings.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(self.options.as_ref()?, |value, key| value.get(*key))
    }

    /// First value stored under `key` anywhere in the options, depth first.
    ///
    /// Handy for keys whose nesting differs between plugin versions, such
    /// as `docstring_style`.
    pub fn find_key(&self, key: &str) -> Option<&Value> {
        fn search<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
            match value {
                Value::Mapping(map) => map.iter().find_map(|(k, v)| {
                    if k.as_str() == Some(key) {
                        Some(v)
                    } else {
                        search(v, key)
                    }
                }),
                Value::Sequence(seq) => seq.iter().find_map(|v| search(v, key)),
                Value::Tagged(tagged) => search(&tagged.value, key),
                _ => None,
            }
        }
        search(self.options.as_ref()?, key)
    }
}

/// How the list was written in the manifest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListStyle {
    /// `- name` / `- name: {options}` items.
    #[default]
    Sequence,
    /// `name: {options}` entries.
    Mapping,
}

/// Ordered list of plugins or markdown extensions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extensions {
    /// Entries in written order.
    pub items: Vec<Extension>,
    /// Written form, reproduced on emission.
    pub style: ListStyle,
}

impl Extensions {
    /// Sequence-style list from items.
    #[must_use]
    pub fn new(items: Vec<Extension>) -> Self {
        Self {
            items,
            style: ListStyle::Sequence,
        }
    }

    /// Find an entry by name.
    pub fn get(&self, name: &str) -> Option<&Extension> {
        self.items.iter().find(|e| e.name == name)
    }

    /// Names in order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|e| e.name.as_str()).collect()
    }

    pub(crate) fn from_value(value: &Value, key: &str) -> Result<Self, ManifestError> {
        match value {
            Value::Sequence(seq) => {
                let items = seq
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| item_from_value(item, &format!("{key}[{idx}]")))
                    .collect::<Result<_, _>>()?;
                Ok(Self {
                    items,
                    style: ListStyle::Sequence,
                })
            }
            Value::Mapping(map) => {
                let items = map
                    .iter()
                    .map(|(name, options)| {
                        let name = name.as_str().ok_or_else(|| {
                            ManifestError::shape(key, "entry names must be strings")
                        })?;
                        Ok(Extension::with_options(name, options.clone()))
                    })
                    .collect::<Result<_, ManifestError>>()?;
                Ok(Self {
                    items,
                    style: ListStyle::Mapping,
                })
            }
            _ => Err(ManifestError::shape(key, "expected a list or a mapping")),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self.style {
            ListStyle::Sequence => Value::Sequence(
                self.items
                    .iter()
                    .map(|e| match &e.options {
                        None => Value::String(e.name.clone()),
                        Some(options) => {
                            let mut map = Mapping::new();
                            map.insert(Value::String(e.name.clone()), options.clone());
                            Value::Mapping(map)
                        }
                    })
                    .collect(),
            ),
            ListStyle::Mapping => Value::Mapping(
                self.items
                    .iter()
                    .map(|e| {
                        (
                            Value::String(e.name.clone()),
                            e.options.clone().unwrap_or(Value::Null),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

fn item_from_value(value: &Value, location: &str) -> Result<Extension, ManifestError> {
    match value {
        Value::String(name) => Ok(Extension::bare(name.clone())),
        Value::Mapping(map) if map.len() == 1 => {
            let Some((Value::String(name), options)) = map.iter().next() else {
                return Err(ManifestError::shape(location, "entry name must be a string"));
            };
            Ok(Extension::with_options(name.clone(), options.clone()))
        }
        Value::Mapping(map) => Err(ManifestError::shape(
            location,
            format!("entry must have exactly one key, found {}", map.len()),
        )),
        _ => Err(ManifestError::shape(
            location,
            "entry must be a name or a single-key mapping",
        )),
    }
}
