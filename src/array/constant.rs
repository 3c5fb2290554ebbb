use std::sync::Arc;

use ndarray::{ArrayD, IxDyn};

use crate::{
    config::{ArrayRecipe, ConstantArrayConfig},
    errors::ArrayConfigError,
};

use super::{Array, ArrayData, ElementType, Roi, check_roi};

/// Virtual array shaped like its source with every voxel set to one value.
///
/// A read must fit inside the source bounds but never copies source voxels. The fill is always `int64`, whatever the source dtype.
#[derive(Debug)]
pub struct ConstantArray {
    name: String,
    source: Arc<dyn Array>,
    constant: i64,
}

impl ConstantArray {
    pub fn new(config: &ConstantArrayConfig, source: Arc<dyn Array>) -> Self {
        Self {
            name: config.name().to_string(),
            source,
            constant: config.constant(),
        }
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn source(&self) -> &Arc<dyn Array> {
        &self.source
    }
}

impl Array for ConstantArray {
    fn name(&self) -> &str {
        &self.name
    }

    fn axes(&self) -> &[String] {
        self.source.axes()
    }

    fn shape(&self) -> &[usize] {
        self.source.shape()
    }

    fn voxel_size(&self) -> &[u32] {
        self.source.voxel_size()
    }

    fn dtype(&self) -> ElementType {
        ElementType::Int64
    }

    fn writable(&self) -> bool {
        false
    }

    fn read(&self, roi: &Roi) -> Result<ArrayData, ArrayConfigError> {
        check_roi(&self.name, &self.source.roi(), roi)?;
        Ok(ArrayData::Int(ArrayD::from_elem(
            IxDyn(roi.shape()),
            self.constant,
        )))
    }

    fn data(&self) -> Result<ArrayData, ArrayConfigError> {
        Err(ArrayConfigError::read_only(format!(
            "`{}` is a virtual array computed from `{}` on demand",
            self.name,
            self.source.name()
        )))
    }
}
