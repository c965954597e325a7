/// A dense embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Euclidean norm, accumulated in f64
    #[inline]
    pub fn norm(&self) -> f64 {
        self.data
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt()
    }

    /// Squared Euclidean distance, accumulated in f64.
    /// Mismatched dimensions are infinitely far apart.
    #[inline]
    pub fn squared_l2_distance(&self, other: &Vector) -> f64 {
        if self.dim() != other.dim() {
            return f64::INFINITY;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| {
                let d = f64::from(a) - f64::from(b);
                d * d
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_l2_distance() {
        let v1 = Vector::new(vec![0.0, 0.0]);
        let v2 = Vector::new(vec![3.0, 4.0]);
        assert!((v1.squared_l2_distance(&v2) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch_is_infinitely_far() {
        let v1 = Vector::new(vec![0.0, 0.0]);
        let v2 = Vector::new(vec![0.0, 0.0, 0.0]);
        assert!(v1.squared_l2_distance(&v2).is_infinite());
    }

    #[test]
    fn test_zero_vector_norm() {
        assert_eq!(Vector::zeros(4).norm(), 0.0);
    }
}
