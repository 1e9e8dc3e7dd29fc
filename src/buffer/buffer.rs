use crate::error::{VizError, VizResult};

/// Fixed-length, index-addressable storage for raw activation samples.
///
/// The length is set at construction and never changes. Cells start unset
/// and reading one back yields `None` rather than a silent `0.0`, so a
/// partially filled grid cannot masquerade as real data. Out-of-range access
/// fails with `IndexOutOfRange` instead of growing the container.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    cells: Vec<Option<f64>>,
}

impl SampleBuffer {
    /// Allocates `size` unset cells.
    pub fn new(size: usize) -> SampleBuffer {
        SampleBuffer { cells: vec![None; size] }
    }

    /// Builds a fully populated buffer from a slice.
    pub fn from_samples(samples: &[f64]) -> SampleBuffer {
        SampleBuffer {
            cells: samples.iter().map(|&v| Some(v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Writes `value` at `index`, in place. Returns `&mut self` so writes
    /// can be chained.
    pub fn set(&mut self, index: usize, value: f64) -> VizResult<&mut Self> {
        let len = self.cells.len();
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = Some(value);
                Ok(self)
            }
            None => Err(VizError::IndexOutOfRange { index, len }),
        }
    }

    /// Reads the cell at `index`. `None` means the cell was never set.
    pub fn get(&self, index: usize) -> VizResult<Option<f64>> {
        self.cells
            .get(index)
            .copied()
            .ok_or(VizError::IndexOutOfRange { index, len: self.cells.len() })
    }

    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Snapshots every cell into a plain vector, failing with `UnsetCell`
    /// on the first hole. A render must never paint from a partially
    /// filled buffer.
    pub fn samples(&self) -> VizResult<Vec<f64>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| cell.ok_or(VizError::UnsetCell { index }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut buffer = SampleBuffer::new(4);
        buffer.set(2, 0.75).unwrap();
        assert_eq!(buffer.get(2).unwrap(), Some(0.75));
    }

    #[test]
    fn set_chains_on_the_same_buffer() {
        let mut buffer = SampleBuffer::new(3);
        buffer
            .set(0, -1.0)
            .and_then(|b| b.set(1, 0.0))
            .and_then(|b| b.set(2, 1.0))
            .unwrap();
        assert_eq!(buffer.samples().unwrap(), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn unset_cell_reads_back_as_none() {
        let buffer = SampleBuffer::new(2);
        assert_eq!(buffer.get(0).unwrap(), None);
        assert!(!buffer.is_filled());
    }

    #[test]
    fn get_out_of_range_fails() {
        let buffer = SampleBuffer::new(3);
        assert!(matches!(
            buffer.get(3),
            Err(VizError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn set_out_of_range_fails_and_leaves_buffer_untouched() {
        let mut buffer = SampleBuffer::new(2);
        assert!(matches!(
            buffer.set(5, 1.0),
            Err(VizError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert_eq!(buffer, SampleBuffer::new(2));
    }

    #[test]
    fn zero_length_buffer_rejects_all_access() {
        let mut buffer = SampleBuffer::new(0);
        assert!(buffer.get(0).is_err());
        assert!(buffer.set(0, 0.0).is_err());
        assert!(buffer.is_empty());
        assert_eq!(buffer.samples().unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn samples_fails_on_a_hole() {
        let mut buffer = SampleBuffer::new(3);
        buffer.set(0, 1.0).unwrap();
        buffer.set(2, 1.0).unwrap();
        assert!(matches!(
            buffer.samples(),
            Err(VizError::UnsetCell { index: 1 })
        ));
    }

    #[test]
    fn from_samples_is_fully_populated() {
        let buffer = SampleBuffer::from_samples(&[0.1, 0.2]);
        assert!(buffer.is_filled());
        assert_eq!(buffer.samples().unwrap(), vec![0.1, 0.2]);
    }
}
