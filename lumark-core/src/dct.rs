//! Two-dimensional discrete cosine transform over square sample blocks.
//!
//! Orthonormal DCT-II (forward) and its DCT-III inverse, applied separably
//! along rows then columns. Coefficients within a block are stored in
//! natural row-major order, index = row * n + col.

/// Precomputed transform for an `n`×`n` block.
///
/// The cosine basis is built at construction; `cos` is not const-evaluable.
pub struct Dct {
    n: usize,
    /// `basis[k * n + x] = scale(k) * cos((2x + 1) * k * PI / 2n)`
    basis: Vec<f32>,
}

impl Dct {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "block size must be nonzero");
        let mut basis = vec![0.0f32; n * n];
        for k in 0..n {
            let scale = if k == 0 {
                (1.0 / n as f64).sqrt()
            } else {
                (2.0 / n as f64).sqrt()
            };
            for x in 0..n {
                let angle =
                    (2 * x + 1) as f64 * k as f64 * std::f64::consts::PI / (2 * n) as f64;
                basis[k * n + x] = (scale * angle.cos()) as f32;
            }
        }
        Self { n, basis }
    }

    pub fn block_size(&self) -> usize {
        self.n
    }

    /// Forward transform: spatial samples to frequency coefficients.
    pub fn forward(&self, samples: &[f32], coeffs: &mut [f32]) {
        self.apply(samples, coeffs, false);
    }

    /// Inverse transform: frequency coefficients back to spatial samples.
    pub fn inverse(&self, coeffs: &[f32], samples: &mut [f32]) {
        self.apply(coeffs, samples, true);
    }

    fn apply(&self, input: &[f32], output: &mut [f32], inverse: bool) {
        let n = self.n;
        debug_assert_eq!(input.len(), n * n);
        debug_assert_eq!(output.len(), n * n);

        // The basis matrix is orthogonal, so the inverse pass is the
        // transposed product of the same table.
        let coef = |k: usize, x: usize| {
            if inverse {
                self.basis[x * n + k]
            } else {
                self.basis[k * n + x]
            }
        };

        let mut tmp = vec![0.0f32; n * n];
        for r in 0..n {
            for k in 0..n {
                let mut acc = 0.0f32;
                for x in 0..n {
                    acc += input[r * n + x] * coef(k, x);
                }
                tmp[r * n + k] = acc;
            }
        }
        for c in 0..n {
            for k in 0..n {
                let mut acc = 0.0f32;
                for x in 0..n {
                    acc += tmp[x * n + c] * coef(k, x);
                }
                output[k * n + c] = acc;
            }
        }
    }
}
