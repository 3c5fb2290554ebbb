use crate::errors::ArrayConfigError;

use super::{Array, ArrayData, ElementType, Roi, check_roi};

/// Array whose voxels live in memory.
#[derive(Debug)]
pub struct InMemoryArray {
    name: String,
    axes: Vec<String>,
    voxel_size: Vec<u32>,
    data: ArrayData,
}

impl InMemoryArray {
    pub fn new(
        name: impl Into<String>,
        axes: Vec<String>,
        voxel_size: Vec<u32>,
        data: ArrayData,
    ) -> Result<Self, ArrayConfigError> {
        let name = name.into();
        let ndim = data.shape().len();
        if axes.len() != ndim {
            return Err(ArrayConfigError::invalid_config(format!(
                "array `{name}` has {ndim} dims but {} axes",
                axes.len()
            )));
        }
        if voxel_size.len() != ndim {
            return Err(ArrayConfigError::invalid_config(format!(
                "array `{name}` has {ndim} dims but voxel size has {}",
                voxel_size.len()
            )));
        }
        Ok(Self {
            name,
            axes,
            voxel_size,
            data,
        })
    }
}

impl Array for InMemoryArray {
    fn name(&self) -> &str {
        &self.name
    }

    fn axes(&self) -> &[String] {
        &self.axes
    }

    fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    fn voxel_size(&self) -> &[u32] {
        &self.voxel_size
    }

    fn dtype(&self) -> ElementType {
        self.data.dtype()
    }

    fn writable(&self) -> bool {
        true
    }

    fn read(&self, roi: &Roi) -> Result<ArrayData, ArrayConfigError> {
        check_roi(&self.name, &self.roi(), roi)?;
        Ok(self.data.slice(roi))
    }

    fn data(&self) -> Result<ArrayData, ArrayConfigError> {
        Ok(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{ArrayD, IxDyn};

    use super::*;

    fn axes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rejects_axis_mismatch() {
        let data = ArrayData::Float(ArrayD::zeros(IxDyn(&[2, 2])));
        let err = InMemoryArray::new("a", axes(&["x"]), vec![1, 1], data).unwrap_err();
        assert!(err.to_string().contains("1 axes"));
    }

    #[test]
    fn test_read_region() {
        let values: Vec<i64> = (0..12).collect();
        let data = ArrayData::Int(ArrayD::from_shape_vec(IxDyn(&[3, 4]), values).unwrap());
        let array = InMemoryArray::new("grid", axes(&["y", "x"]), vec![1, 1], data).unwrap();
        let roi = Roi::new(vec![1, 1], vec![2, 2]).unwrap();
        let region = array.read(&roi).unwrap();
        let ints = region.as_int().unwrap();
        assert_eq!(ints.shape(), &[2, 2]);
        assert_eq!(ints.iter().copied().collect::<Vec<_>>(), vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let data = ArrayData::Float(ArrayD::zeros(IxDyn(&[3, 3])));
        let array = InMemoryArray::new("grid", axes(&["y", "x"]), vec![1, 1], data).unwrap();
        let roi = Roi::new(vec![2, 2], vec![2, 2]).unwrap();
        assert!(matches!(array.read(&roi), Err(ArrayConfigError::Read(_))));
    }

    #[test]
    fn test_num_channels() {
        let data = ArrayData::Float(ArrayD::zeros(IxDyn(&[2, 5, 5])));
        let array =
            InMemoryArray::new("rgb", axes(&["c", "y", "x"]), vec![1, 1, 1], data).unwrap();
        assert_eq!(array.num_channels(), Some(2));
    }
}
