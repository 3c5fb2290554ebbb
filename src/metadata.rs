//! Per-field help metadata for array configurations.
//!
//! Every config variant publishes a static table of [`FieldMeta`] entries. The
//! loader uses the table to enforce required fields before deserializing, and
//! the CLI renders it as help text.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::config::{ConstantArrayConfig, DummyArrayConfig, LiteralArrayConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: &'static str,
    pub help_text: &'static str,
    pub required: bool,
    /// Rendered default value, `None` for required fields or derived defaults.
    pub default: Option<&'static str>,
    /// The field holds another array configuration.
    pub nested: bool,
}

impl FieldMeta {
    pub const fn required(name: &'static str, help_text: &'static str) -> Self {
        Self {
            name,
            help_text,
            required: true,
            default: None,
            nested: false,
        }
    }

    pub const fn optional(
        name: &'static str,
        help_text: &'static str,
        default: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            help_text,
            required: false,
            default,
            nested: false,
        }
    }

    pub const fn nested(self) -> Self {
        Self {
            nested: true,
            ..self
        }
    }
}

pub trait ConfigFields {
    const TYPE_NAME: &'static str;

    fn fields() -> &'static [FieldMeta];

    fn field(name: &str) -> Option<&'static FieldMeta> {
        Self::fields().iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayKind {
    Constant,
    Dummy,
    Literal,
}

impl ArrayKind {
    pub fn all() -> &'static [ArrayKind] {
        &[ArrayKind::Constant, ArrayKind::Dummy, ArrayKind::Literal]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayKind::Constant => ConstantArrayConfig::TYPE_NAME,
            ArrayKind::Dummy => DummyArrayConfig::TYPE_NAME,
            ArrayKind::Literal => LiteralArrayConfig::TYPE_NAME,
        }
    }

    pub fn parse(value: &str) -> Option<ArrayKind> {
        ArrayKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
    }

    pub fn fields(&self) -> &'static [FieldMeta] {
        match self {
            ArrayKind::Constant => ConstantArrayConfig::fields(),
            ArrayKind::Dummy => DummyArrayConfig::fields(),
            ArrayKind::Literal => LiteralArrayConfig::fields(),
        }
    }
}

pub fn render_help(kind: ArrayKind) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", kind.as_str());
    for field in kind.fields() {
        let status = match (field.required, field.default) {
            (true, _) => "required".to_string(),
            (false, Some(default)) => format!("default: {default}"),
            (false, None) => "optional".to_string(),
        };
        let _ = writeln!(out, "  {} ({status})", field.name);
        let _ = writeln!(out, "      {}", field.help_text);
    }
    out
}
