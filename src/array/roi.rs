use serde::{Deserialize, Serialize};

use crate::errors::ArrayConfigError;

/// Axis-aligned region of interest in voxel coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roi {
    offset: Vec<usize>,
    shape: Vec<usize>,
}

impl Roi {
    pub fn new(offset: Vec<usize>, shape: Vec<usize>) -> Result<Self, ArrayConfigError> {
        if offset.len() != shape.len() {
            return Err(ArrayConfigError::invalid_config(format!(
                "roi offset has {} dims but shape has {}",
                offset.len(),
                shape.len()
            )));
        }
        if let Some(axis) = (0..offset.len()).find(|&i| offset[i].checked_add(shape[i]).is_none()) {
            return Err(ArrayConfigError::invalid_config(format!(
                "roi axis {axis} ends past the addressable range: {} + {}",
                offset[axis], shape[axis]
            )));
        }
        Ok(Self { offset, shape })
    }

    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            offset: vec![0; shape.len()],
            shape: shape.to_vec(),
        }
    }

    pub fn offset(&self) -> &[usize] {
        &self.offset
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Exclusive upper corner. Saturates for deserialized regions that
    /// skipped the bounds check in `new`.
    pub fn end(&self) -> Vec<usize> {
        self.offset
            .iter()
            .zip(&self.shape)
            .map(|(o, s)| o.saturating_add(*s))
            .collect()
    }

    pub fn size(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.shape
            .iter()
            .try_fold(1usize, |acc, &s| acc.checked_mul(s))
            .unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.shape.iter().any(|&s| s == 0)
    }

    pub fn contains(&self, other: &Roi) -> bool {
        if self.ndim() != other.ndim() {
            return false;
        }
        let self_end = self.end();
        let other_end = other.end();
        (0..self.ndim())
            .all(|axis| other.offset[axis] >= self.offset[axis] && other_end[axis] <= self_end[axis])
    }

    pub fn intersect(&self, other: &Roi) -> Option<Roi> {
        if self.ndim() != other.ndim() {
            return None;
        }
        let self_end = self.end();
        let other_end = other.end();
        let mut offset = Vec::with_capacity(self.ndim());
        let mut shape = Vec::with_capacity(self.ndim());
        for axis in 0..self.ndim() {
            let start = self.offset[axis].max(other.offset[axis]);
            let end = self_end[axis].min(other_end[axis]);
            if end <= start {
                return None;
            }
            offset.push(start);
            shape.push(end - start);
        }
        Some(Roi { offset, shape })
    }
}
