use super::TranslationError;
use crate::common::constants::FOUR_PI;
use crate::numerics::special::wigner3j_mzero_squared;

/// Scalar weights of the spherical-wave translation sum for source degree `nu`
/// and target degree `n`.
///
/// The result has `nu + n + 1` entries indexed by the coupled degree `alpha`;
/// entries below `|nu - n|` are zero. The top entry and every even offset below
/// it use `(alpha (alpha + 1) - c2)^2`, odd offsets use `(beta - c4)(c5 - beta)`
/// with `beta = (alpha + 1)^2`.
pub fn bc(nu: usize, n: usize) -> Result<Vec<f64>, TranslationError> {
    if nu == 0 || n == 0 {
        return Err(TranslationError::ZeroDegree { nu, n });
    }

    let nu_weight = (nu * (nu + 1)) as f64;
    let n_weight = (n * (n + 1)) as f64;
    let c1 = 1.0 / (4.0 * nu_weight * n_weight);
    let c2 = nu_weight + n_weight;
    let c3 = (((2 * nu + 1) * (2 * n + 1)) as f64 / FOUR_PI).sqrt();
    let c4 = nu.abs_diff(n).pow(2) as f64;
    let c5 = ((nu + n + 1) * (nu + n + 1)) as f64;

    let t = wigner3j_mzero_squared(nu, n)
        .map_err(|source| TranslationError::Wigner3j { nu, n, source })?;
    let top = nu.min(n);

    let even_weight = |alpha: usize| {
        let coupled = (alpha * (alpha + 1)) as f64 - c2;
        ((2 * alpha + 1) as f64).sqrt() * c3 * coupled * coupled * c1
    };

    let mut values = vec![0.0; nu + n + 1];
    let mut alpha = nu + n;
    values[alpha] = even_weight(alpha) * t[top];

    for m in (0..top).rev() {
        alpha -= 2;
        let beta = ((alpha + 1) * (alpha + 1)) as f64;
        values[alpha + 1] =
            ((2 * alpha + 3) as f64).sqrt() * c3 * (beta - c4) * (c5 - beta) * c1 * t[m];
        values[alpha] = even_weight(alpha) * t[m];
    }

    Ok(values)
}
