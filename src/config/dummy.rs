use std::sync::Arc;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::{
    array::{Array, ArrayData, InMemoryArray},
    errors::ArrayConfigError,
    metadata::{ArrayKind, ConfigFields, FieldMeta},
};

use super::{ArrayRecipe, check_geometry, default_axes};

pub const DEFAULT_DUMMY_SHAPE: [usize; 3] = [100, 50, 50];

fn default_shape() -> Vec<usize> {
    DEFAULT_DUMMY_SHAPE.to_vec()
}

/// A zero-filled `float64` array, mostly useful as a source for tests and
/// derived arrays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DummyArrayConfig {
    name: String,
    #[serde(default = "default_shape")]
    shape: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    axes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voxel_size: Option<Vec<u32>>,
}

impl DummyArrayConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: default_shape(),
            axes: None,
            voxel_size: None,
        }
    }

    pub fn with_shape(self, shape: Vec<usize>) -> Self {
        Self { shape, ..self }
    }

    pub fn with_axes(self, axes: Vec<String>) -> Self {
        Self {
            axes: Some(axes),
            ..self
        }
    }

    pub fn with_voxel_size(self, voxel_size: Vec<u32>) -> Self {
        Self {
            voxel_size: Some(voxel_size),
            ..self
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn axes(&self) -> Vec<String> {
        self.axes
            .clone()
            .unwrap_or_else(|| default_axes(self.shape.len()))
    }

    pub fn voxel_size(&self) -> Vec<u32> {
        self.voxel_size
            .clone()
            .unwrap_or_else(|| vec![1; self.shape.len()])
    }
}

const FIELDS: &[FieldMeta] = &[
    FieldMeta::required("name", "A unique name for this array."),
    FieldMeta::optional(
        "shape",
        "Number of voxels along each axis.",
        Some("[100, 50, 50]"),
    ),
    FieldMeta::optional(
        "axes",
        "Axis names, one per dimension. Defaults to the trailing axes of z, y, x.",
        None,
    ),
    FieldMeta::optional(
        "voxel_size",
        "Voxel size along each axis. Defaults to 1 for every axis.",
        None,
    ),
];

impl ConfigFields for DummyArrayConfig {
    const TYPE_NAME: &'static str = "dummy";

    fn fields() -> &'static [FieldMeta] {
        FIELDS
    }
}

impl ArrayRecipe for DummyArrayConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ArrayKind {
        ArrayKind::Dummy
    }

    fn verify(&self) -> Result<(), ArrayConfigError> {
        check_geometry(&self.name, &self.shape, &self.axes(), &self.voxel_size())
    }

    fn create_array(&self) -> Result<Arc<dyn Array>, ArrayConfigError> {
        self.verify()?;
        let data = ArrayData::Float(ArrayD::zeros(IxDyn(&self.shape)));
        let array = InMemoryArray::new(&self.name, self.axes(), self.voxel_size(), data)?;
        Ok(Arc::new(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ElementType;

    #[test]
    fn test_defaults() {
        let config = DummyArrayConfig::new("raw");
        assert_eq!(config.shape(), &[100, 50, 50]);
        assert_eq!(config.axes(), vec!["z", "y", "x"]);
        assert_eq!(config.voxel_size(), vec![1, 1, 1]);
    }

    #[test]
    fn test_create_array_is_zero_filled() {
        let array = DummyArrayConfig::new("raw")
            .with_shape(vec![4, 6])
            .create_array()
            .unwrap();
        assert_eq!(array.shape(), &[4, 6]);
        assert_eq!(array.dtype(), ElementType::Float64);
        let data = array.read_all().unwrap();
        assert_eq!(data.min_max(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_verify_rejects_wrong_voxel_size() {
        let config = DummyArrayConfig::new("raw")
            .with_shape(vec![4, 6])
            .with_voxel_size(vec![1]);
        assert!(config.verify().is_err());
        assert!(config.create_array().is_err());
    }

    #[test]
    fn test_verify_rejects_unallocatable_shape() {
        let config = DummyArrayConfig::new("raw").with_shape(vec![usize::MAX / 2, 4, 2]);
        assert!(matches!(
            config.verify(),
            Err(ArrayConfigError::InvalidConfig(_))
        ));
        assert!(config.create_array().is_err());
    }
}
