use std::sync::Arc;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::{
    array::{Array, ArrayData, InMemoryArray},
    errors::ArrayConfigError,
    metadata::{ArrayKind, ConfigFields, FieldMeta},
};

use super::{ArrayRecipe, check_geometry, default_axes, voxel_count};

/// Voxel values in row-major order. Integer lists stay `int64`; any
/// fractional value makes the whole list `float64`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralData {
    Int(Vec<i64>),
    Float(Vec<f64>),
}

impl LiteralData {
    pub fn len(&self) -> usize {
        match self {
            LiteralData::Int(values) => values.len(),
            LiteralData::Float(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An array spelled out inline in the configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiteralArrayConfig {
    name: String,
    shape: Vec<usize>,
    data: LiteralData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    axes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voxel_size: Option<Vec<u32>>,
}

impl LiteralArrayConfig {
    pub fn new(name: impl Into<String>, shape: Vec<usize>, data: LiteralData) -> Self {
        Self {
            name: name.into(),
            shape,
            data,
            axes: None,
            voxel_size: None,
        }
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

    pub fn data(&self) -> &LiteralData {
        &self.data
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
    FieldMeta::required("shape", "Number of voxels along each axis."),
    FieldMeta::required("data", "Voxel values in row-major order."),
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

impl ConfigFields for LiteralArrayConfig {
    const TYPE_NAME: &'static str = "literal";

    fn fields() -> &'static [FieldMeta] {
        FIELDS
    }
}

impl ArrayRecipe for LiteralArrayConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ArrayKind {
        ArrayKind::Literal
    }

    fn verify(&self) -> Result<(), ArrayConfigError> {
        check_geometry(&self.name, &self.shape, &self.axes(), &self.voxel_size())?;
        let expected = voxel_count(&self.name, &self.shape)?;
        if self.data.len() != expected {
            return Err(ArrayConfigError::invalid_config(format!(
                "array `{}` has shape {:?} ({expected} voxels) but {} values",
                self.name,
                self.shape,
                self.data.len()
            )));
        }
        Ok(())
    }

    fn create_array(&self) -> Result<Arc<dyn Array>, ArrayConfigError> {
        self.verify()?;
        let dim = IxDyn(&self.shape);
        let data = match &self.data {
            LiteralData::Int(values) => ArrayD::from_shape_vec(dim, values.clone())
                .map(ArrayData::Int),
            LiteralData::Float(values) => ArrayD::from_shape_vec(dim, values.clone())
                .map(ArrayData::Float),
        }
        .map_err(|e| ArrayConfigError::invalid_config(e.to_string()))?;
        let array = InMemoryArray::new(&self.name, self.axes(), self.voxel_size(), data)?;
        Ok(Arc::new(array))
    }
}
