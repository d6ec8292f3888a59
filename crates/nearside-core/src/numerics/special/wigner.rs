#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Wigner3jError {
    #[error("wigner 3j recursion for (j2={j2}, j3={j3}) hit a vanishing coupling polynomial at alpha={alpha}")]
    VanishingCoupling { j2: usize, j3: usize, alpha: i64 },
    #[error("wigner 3j normalization for (j2={j2}, j3={j3}) is not positive and finite: {sum:e}")]
    Normalization { j2: usize, j3: usize, sum: f64 },
}

/// Squared Wigner 3j symbols `(j1 j2 j3; 0 0 0)^2` for every admissible `j1`.
///
/// Entry `m` of the result belongs to `j1 = |j2 - j3| + 2m`, so the last entry
/// (index `min(j2, j3)`) is the stretched triad `j1 = j2 + j3`. Odd `j1 + j2 + j3`
/// vanish at zero magnetic quantum numbers and are not stored.
///
/// The values come from a downward three-term recursion seeded with `1` at the
/// top index and normalized so that `sum (2 j1 + 1) v[m] == 1`.
pub fn wigner3j_mzero_squared(j2: usize, j3: usize) -> Result<Vec<f64>, Wigner3jError> {
    let top = j2.min(j3);
    let mut values = vec![0.0; top + 1];
    values[top] = 1.0;

    let mut alpha = (j2 + j3) as i64;
    let mut sum = (2 * alpha + 1) as f64;

    for m in (0..top).rev() {
        let denominator = coupling_polynomial(alpha - 1, j2, j3);
        if denominator == 0.0 {
            return Err(Wigner3jError::VanishingCoupling { j2, j3, alpha });
        }

        values[m] = coupling_polynomial(alpha, j2, j3) / denominator * values[m + 1];
        alpha -= 2;
        sum += (2 * alpha + 1) as f64 * values[m];
    }

    if !sum.is_finite() || sum <= 0.0 {
        return Err(Wigner3jError::Normalization { j2, j3, sum });
    }

    for value in &mut values {
        *value /= sum;
    }

    Ok(values)
}

fn coupling_polynomial(alpha: i64, j2: usize, j3: usize) -> f64 {
    let alpha = alpha as f64;
    let difference = j2 as f64 - j3 as f64;
    let stretched = (j2 + j3 + 1) as f64;

    (alpha * alpha - difference * difference) * (stretched * stretched - alpha * alpha)
}
