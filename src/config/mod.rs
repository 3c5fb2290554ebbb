//! Array configurations: declarative recipes for building arrays.
//!
//! [`ArrayConfig`] is the tagged union of every supported variant. It is the
//! unit that gets serialized (`{"type": "constant", ...}`), stored and
//! resolved. Each variant, and the union itself, implements [`ArrayRecipe`],
//! the capability shared by all configs.
//!
//! # Examples
//!
//! ```rust
//! use arrayconfig::{ArrayRecipe, ConstantArrayConfig, DummyArrayConfig};
//!
//! let source = DummyArrayConfig::new("raw").with_shape(vec![10, 10]);
//! let mask = ConstantArrayConfig::new(source);
//! assert_eq!(mask.constant(), 1);
//! assert_eq!(mask.name(), "raw_constant");
//! ```

mod constant;
mod dummy;
mod literal;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{array::Array, errors::ArrayConfigError, metadata::ArrayKind};

pub use constant::{ConstantArrayConfig, ConstantArrayConfigBuilder, DEFAULT_CONSTANT};
pub use dummy::{DEFAULT_DUMMY_SHAPE, DummyArrayConfig};
pub use literal::{LiteralArrayConfig, LiteralData};

/// Capability implemented by every array configuration.
pub trait ArrayRecipe {
    fn name(&self) -> &str;

    fn kind(&self) -> ArrayKind;

    /// Checks this node only. Nested configs are checked by [`ArrayRecipe::verify_tree`].
    fn verify(&self) -> Result<(), ArrayConfigError>;

    /// Builds the array this config describes, including any source arrays.
    fn create_array(&self) -> Result<Arc<dyn Array>, ArrayConfigError>;

    fn source_configs(&self) -> Vec<&ArrayConfig> {
        Vec::new()
    }

    fn verify_tree(&self) -> Result<(), ArrayConfigError> {
        self.verify()?;
        for source in self.source_configs() {
            source.verify_tree()?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArrayConfig {
    Constant(ConstantArrayConfig),
    Dummy(DummyArrayConfig),
    Literal(LiteralArrayConfig),
}

impl ArrayConfig {
    fn recipe(&self) -> &dyn ArrayRecipe {
        match self {
            ArrayConfig::Constant(config) => config,
            ArrayConfig::Dummy(config) => config,
            ArrayConfig::Literal(config) => config,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, ArrayConfigError> {
        serde_json::to_value(self).map_err(|e| ArrayConfigError::serialization(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, ArrayConfigError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ArrayConfigError::serialization(e.to_string()))
    }
}

impl ArrayRecipe for ArrayConfig {
    fn name(&self) -> &str {
        self.recipe().name()
    }

    fn kind(&self) -> ArrayKind {
        self.recipe().kind()
    }

    fn verify(&self) -> Result<(), ArrayConfigError> {
        self.recipe().verify()
    }

    fn create_array(&self) -> Result<Arc<dyn Array>, ArrayConfigError> {
        self.recipe().create_array()
    }

    fn source_configs(&self) -> Vec<&ArrayConfig> {
        self.recipe().source_configs()
    }
}

impl From<ConstantArrayConfig> for ArrayConfig {
    fn from(config: ConstantArrayConfig) -> Self {
        ArrayConfig::Constant(config)
    }
}

impl From<DummyArrayConfig> for ArrayConfig {
    fn from(config: DummyArrayConfig) -> Self {
        ArrayConfig::Dummy(config)
    }
}

impl From<LiteralArrayConfig> for ArrayConfig {
    fn from(config: LiteralArrayConfig) -> Self {
        ArrayConfig::Literal(config)
    }
}

pub(crate) fn default_axes(ndim: usize) -> Vec<String> {
    const SPATIAL: [&str; 3] = ["z", "y", "x"];
    if ndim <= SPATIAL.len() {
        return SPATIAL[SPATIAL.len() - ndim..]
            .iter()
            .map(|s| s.to_string())
            .collect();
    }
    let mut axes: Vec<String> = (0..ndim - SPATIAL.len()).map(|i| format!("d{i}")).collect();
    axes.extend(SPATIAL.iter().map(|s| s.to_string()));
    axes
}

/// Largest voxel count an array may hold; every element type is 8 bytes wide.
pub const MAX_VOXELS: usize = isize::MAX as usize / 8;

/// Number of voxels in `shape`, rejecting shapes that cannot be allocated.
pub(crate) fn voxel_count(name: &str, shape: &[usize]) -> Result<usize, ArrayConfigError> {
    if shape.contains(&0) {
        return Ok(0);
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &len| acc.checked_mul(len))
        .filter(|&count| count <= MAX_VOXELS)
        .ok_or_else(|| {
            ArrayConfigError::invalid_config(format!(
                "array `{name}` with shape {shape:?} exceeds {MAX_VOXELS} voxels"
            ))
        })
}

pub(crate) fn check_geometry(
    name: &str,
    shape: &[usize],
    axes: &[String],
    voxel_size: &[u32],
) -> Result<(), ArrayConfigError> {
    if shape.is_empty() {
        return Err(ArrayConfigError::invalid_config(format!(
            "array `{name}` needs at least one dimension"
        )));
    }
    if axes.len() != shape.len() {
        return Err(ArrayConfigError::invalid_config(format!(
            "array `{name}` has {} dims but {} axes",
            shape.len(),
            axes.len()
        )));
    }
    if voxel_size.len() != shape.len() {
        return Err(ArrayConfigError::invalid_config(format!(
            "array `{name}` has {} dims but voxel size has {}",
            shape.len(),
            voxel_size.len()
        )));
    }
    if voxel_size.iter().any(|&v| v == 0) {
        return Err(ArrayConfigError::invalid_config(format!(
            "array `{name}` has a zero voxel size"
        )));
    }
    for (i, axis) in axes.iter().enumerate() {
        if axes[..i].contains(axis) {
            return Err(ArrayConfigError::invalid_config(format!(
                "array `{name}` repeats axis `{axis}`"
            )));
        }
    }
    voxel_count(name, shape)?;
    Ok(())
}
