use crate::{BfError, BfResult};

/// Floating point type used for capacities and flows.
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> BfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BfError::NonFinite { what, value: v })
    }
}

/// Capacities and flows must be finite and `>= 0`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> BfResult<Real> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(BfError::Negative { what, value: v });
    }
    Ok(v)
}
