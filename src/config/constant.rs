use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    array::{Array, ConstantArray},
    errors::ArrayConfigError,
    metadata::{ArrayKind, ConfigFields, FieldMeta},
};

use super::{ArrayConfig, ArrayRecipe};

pub const DEFAULT_CONSTANT: i64 = 1;

const NAME_SUFFIX: &str = "_constant";

/// Recipe for an array shaped like `source_array_config` with every voxel set
/// to `constant`. Typically used to build masks that cover a whole dataset.
///
/// The record is immutable once built. A missing source is rejected both by
/// [`ConstantArrayConfigBuilder::build`] and by deserialization.
///
/// ```rust
/// use arrayconfig::{ConstantArrayConfig, DummyArrayConfig};
///
/// let mask = ConstantArrayConfig::builder()
///     .name("mask")
///     .source_array_config(DummyArrayConfig::new("raw"))
///     .constant(7)
///     .build()?;
/// assert_eq!(mask.constant(), 7);
///
/// let missing = ConstantArrayConfig::builder().constant(7).build();
/// assert!(missing.unwrap_err().is_missing_field());
/// # Ok::<(), arrayconfig::ArrayConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConstantArrayConfig")]
pub struct ConstantArrayConfig {
    name: String,
    source_array_config: Box<ArrayConfig>,
    constant: i64,
}

#[derive(Deserialize)]
struct RawConstantArrayConfig {
    name: Option<String>,
    source_array_config: Option<Box<ArrayConfig>>,
    constant: Option<i64>,
}

impl TryFrom<RawConstantArrayConfig> for ConstantArrayConfig {
    type Error = ArrayConfigError;

    fn try_from(raw: RawConstantArrayConfig) -> Result<Self, Self::Error> {
        ConstantArrayConfigBuilder {
            name: raw.name,
            source_array_config: raw.source_array_config.map(|source| *source),
            constant: raw.constant,
        }
        .build()
    }
}

impl ConstantArrayConfig {
    /// Fills with [`DEFAULT_CONSTANT`] and names the array after its source.
    pub fn new(source_array_config: impl Into<ArrayConfig>) -> Self {
        let source: ArrayConfig = source_array_config.into();
        Self {
            name: derived_name(&source),
            source_array_config: Box::new(source),
            constant: DEFAULT_CONSTANT,
        }
    }

    pub fn builder() -> ConstantArrayConfigBuilder {
        ConstantArrayConfigBuilder::default()
    }

    pub fn with_constant(self, constant: i64) -> Self {
        Self { constant, ..self }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn source_array_config(&self) -> &ArrayConfig {
        &self.source_array_config
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }
}

fn derived_name(source: &ArrayConfig) -> String {
    format!("{}{NAME_SUFFIX}", source.name())
}

#[derive(Clone, Debug, Default)]
pub struct ConstantArrayConfigBuilder {
    name: Option<String>,
    source_array_config: Option<ArrayConfig>,
    constant: Option<i64>,
}

impl ConstantArrayConfigBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn source_array_config(mut self, source: impl Into<ArrayConfig>) -> Self {
        self.source_array_config = Some(source.into());
        self
    }

    pub fn constant(mut self, constant: i64) -> Self {
        self.constant = Some(constant);
        self
    }

    pub fn build(self) -> Result<ConstantArrayConfig, ArrayConfigError> {
        let Some(source) = self.source_array_config else {
            let node = match self.name {
                Some(name) => format!("constant array config `{name}`"),
                None => "constant array config".to_string(),
            };
            return Err(ArrayConfigError::missing_field("source_array_config", node));
        };
        let config = ConstantArrayConfig::new(source)
            .with_constant(self.constant.unwrap_or(DEFAULT_CONSTANT));
        Ok(match self.name {
            Some(name) => config.with_name(name),
            None => config,
        })
    }
}

const FIELDS: &[FieldMeta] = &[
    FieldMeta::optional(
        "name",
        "A unique name for this array. Defaults to the source array name with a `_constant` suffix.",
        None,
    ),
    FieldMeta::required(
        "source_array_config",
        "The Array that you want to copy and fill with ones.",
    )
    .nested(),
    FieldMeta::optional(
        "constant",
        "The constant value to fill the array with.",
        Some("1"),
    ),
];

impl ConfigFields for ConstantArrayConfig {
    const TYPE_NAME: &'static str = "constant";

    fn fields() -> &'static [FieldMeta] {
        FIELDS
    }
}

impl ArrayRecipe for ConstantArrayConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ArrayKind {
        ArrayKind::Constant
    }

    fn verify(&self) -> Result<(), ArrayConfigError> {
        Ok(())
    }

    fn create_array(&self) -> Result<Arc<dyn Array>, ArrayConfigError> {
        let source = self.source_array_config.create_array()?;
        Ok(Arc::new(ConstantArray::new(self, source)))
    }

    fn source_configs(&self) -> Vec<&ArrayConfig> {
        vec![self.source_array_config.as_ref()]
    }
}
