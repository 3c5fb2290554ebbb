//! Runtime arrays produced by resolving an [`crate::config::ArrayConfig`].
//!
//! Every array exposes the same read surface through the [`Array`] trait, so a
//! derived array (such as [`ConstantArray`]) can wrap any other array without
//! knowing how that array stores its voxels.

mod constant;
mod memory;
mod roi;

use std::fmt;

use ndarray::{ArrayD, Slice};
use serde::{Deserialize, Serialize};

use crate::errors::ArrayConfigError;

pub use constant::ConstantArray;
pub use memory::InMemoryArray;
pub use roi::Roi;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Int64,
    Float64,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Int64 => "int64",
            ElementType::Float64 => "float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    Int(ArrayD<i64>),
    Float(ArrayD<f64>),
}

impl ArrayData {
    pub fn dtype(&self) -> ElementType {
        match self {
            ArrayData::Int(_) => ElementType::Int64,
            ArrayData::Float(_) => ElementType::Float64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            ArrayData::Int(data) => data.shape(),
            ArrayData::Float(data) => data.shape(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayData::Int(data) => data.len(),
            ArrayData::Float(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_int(&self) -> Option<&ArrayD<i64>> {
        match self {
            ArrayData::Int(data) => Some(data),
            ArrayData::Float(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<&ArrayD<f64>> {
        match self {
            ArrayData::Int(_) => None,
            ArrayData::Float(data) => Some(data),
        }
    }

    /// Smallest and largest element, widened to `f64`. `None` when empty.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let values: Box<dyn Iterator<Item = f64> + '_> = match self {
            ArrayData::Int(data) => Box::new(data.iter().map(|&v| v as f64)),
            ArrayData::Float(data) => Box::new(data.iter().copied()),
        };
        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Copies out the region `roi`. The caller checks bounds.
    pub fn slice(&self, roi: &Roi) -> ArrayData {
        match self {
            ArrayData::Int(data) => ArrayData::Int(slice_roi(data, roi)),
            ArrayData::Float(data) => ArrayData::Float(slice_roi(data, roi)),
        }
    }
}

fn slice_roi<A: Clone>(data: &ArrayD<A>, roi: &Roi) -> ArrayD<A> {
    data.slice_each_axis(|desc| {
        let axis = desc.axis.index();
        let start = roi.offset()[axis];
        Slice::from(start..start + roi.shape()[axis])
    })
    .to_owned()
}

pub trait Array: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    fn axes(&self) -> &[String];
    fn shape(&self) -> &[usize];
    fn voxel_size(&self) -> &[u32];
    fn dtype(&self) -> ElementType;

    /// Whether `data()` can hand out the backing voxels.
    fn writable(&self) -> bool;

    fn read(&self, roi: &Roi) -> Result<ArrayData, ArrayConfigError>;

    fn data(&self) -> Result<ArrayData, ArrayConfigError>;

    fn roi(&self) -> Roi {
        Roi::from_shape(self.shape())
    }

    fn dims(&self) -> usize {
        self.shape().len()
    }

    fn num_channels(&self) -> Option<usize> {
        self.axes()
            .iter()
            .position(|axis| axis == "c")
            .map(|index| self.shape()[index])
    }

    fn read_all(&self) -> Result<ArrayData, ArrayConfigError> {
        self.read(&self.roi())
    }
}

pub(crate) fn check_roi(name: &str, bounds: &Roi, roi: &Roi) -> Result<(), ArrayConfigError> {
    if roi.ndim() != bounds.ndim() {
        return Err(ArrayConfigError::read(format!(
            "array `{name}` has {} dims, roi has {}",
            bounds.ndim(),
            roi.ndim()
        )));
    }
    if !bounds.contains(roi) {
        return Err(ArrayConfigError::read(format!(
            "roi {:?}+{:?} is outside array `{name}` with shape {:?}",
            roi.offset(),
            roi.shape(),
            bounds.shape()
        )));
    }
    Ok(())
}
