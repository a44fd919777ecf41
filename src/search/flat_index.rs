//! Exhaustive squared-L2 vector index
//!
//! Position `i` in the index is the `i`-th vector ever added; vectors are
//! only appended. Stored row-major in one buffer and serialized with bincode.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Label reported for an unfilled result slot
pub const NO_MATCH: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn row(&self, idx: usize) -> &[f32] {
        &self.data[idx * self.dimension..(idx + 1) * self.dimension]
    }

    /// Append vectors. Every vector is checked before any is stored.
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<(), StoreError> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimension) {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.len(),
            });
        }

        self.data.reserve(vectors.len() * self.dimension);
        for vector in vectors {
            self.data.extend_from_slice(vector);
        }
        Ok(())
    }

    /// The `k` nearest vectors as `(label, squared distance)`, nearest first.
    ///
    /// Equal distances keep insertion order. When `k` exceeds the index size
    /// the tail is padded with `(NO_MATCH, f32::MAX)`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(i64, f32)>, StoreError> {
        if query.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = (0..self.len())
            .map(|idx| (idx, squared_l2(query, self.row(idx))))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut results: Vec<(i64, f32)> = scored
            .into_iter()
            .take(k)
            .map(|(idx, distance)| (idx as i64, distance))
            .collect();
        results.resize(k, (NO_MATCH, f32::MAX));

        Ok(results)
    }

    pub fn serialize(&self) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, StoreError> {
        let index: Self = bincode::deserialize(data)?;
        if index.dimension == 0 || index.data.len() % index.dimension != 0 {
            return Err(StoreError::Corrupt(format!(
                "index buffer of {} floats does not divide into {}d rows",
                index.data.len(),
                index.dimension
            )));
        }
        Ok(index)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Scale `vector` to unit length in place. Zero vectors are left untouched.
pub fn normalize_l2(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_search() {
        let mut index = FlatIndex::new(3);
        index
            .add(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]])
            .unwrap();
        assert_eq!(index.len(), 3);

        let results = index.search(&[0.0, 0.9, 0.1], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 1);
        assert_eq!(results[1].0, 2);
        assert!(results[0].1 < results[1].1);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut index = FlatIndex::new(2);
        index
            .add(&[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]])
            .unwrap();

        let results = index.search(&[0.0, 1.0], 3).unwrap();
        let labels: Vec<i64> = results.iter().map(|r| r.0).collect();
        assert_eq!(labels, vec![0, 2, 1]);
    }

    #[test]
    fn test_search_pads_with_no_match() {
        let mut index = FlatIndex::new(2);
        index.add(&[vec![1.0, 0.0]]).unwrap();

        let results = index.search(&[1.0, 0.0], 3).unwrap();
        assert_eq!(results[0], (0, 0.0));
        assert_eq!(results[1].0, NO_MATCH);
        assert_eq!(results[2].0, NO_MATCH);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected_atomically() {
        let mut index = FlatIndex::new(2);
        let err = index.add(&[vec![1.0, 0.0], vec![1.0, 0.0, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
        assert!(index.is_empty());

        assert!(index.search(&[1.0], 1).is_err());
    }

    #[test]
    fn test_normalize_l2() {
        let mut v = vec![3.0, 4.0];
        normalize_l2(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0];
        normalize_l2(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_serialization() {
        let mut index = FlatIndex::new(3);
        index.add(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]).unwrap();

        let restored = FlatIndex::deserialize(&index.serialize().unwrap()).unwrap();
        assert_eq!(restored, index);
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(FlatIndex::deserialize(b"not an index").is_err());
    }
}
