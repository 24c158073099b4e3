use crate::error::DecayError;

/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;
}

/// v(t) = max(v<sub>i</sub> - t / h, v<sub>f</sub>)
///
/// The value falls by `1/h` per unit of time, so after `h` steps it has dropped by exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    horizon: f64,
    vi: f64,
    vf: f64,
}

impl Linear {
    pub fn new(horizon: f64, vi: f64, vf: f64) -> Result<Self, DecayError> {
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(DecayError::InvalidHorizon(horizon));
        }
        if vi < vf {
            return Err(DecayError::Increasing { vi, vf });
        }
        Ok(Self { horizon, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { horizon, vi, vf } = self;
        // t == horizon must land exactly on vi - 1
        (vi - t / horizon).max(vf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_validation() {
        assert!(Linear::new(10.0, 1.0, 0.0).is_ok());
        assert!(Linear::new(10.0, 0.5, 0.5).is_ok());
        assert_eq!(
            Linear::new(0.0, 1.0, 0.0),
            Err(DecayError::InvalidHorizon(0.0))
        );
        assert_eq!(
            Linear::new(10.0, 0.0, 1.0),
            Err(DecayError::Increasing { vi: 0.0, vf: 1.0 })
        );
        assert!(Linear::new(f64::NAN, 1.0, 0.0).is_err());
    }

    #[test]
    fn linear_decay() {
        let x = Linear::new(4.0, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 1.75);
        assert_eq!(x.evaluate(10.0), 0.5, "floored at final value");
    }

    #[test]
    fn linear_decay_lands_exactly() {
        for n in [3u32, 7, 10, 49, 100, 1000] {
            let x = Linear::new(n as f64, 1.0, 0.0).unwrap();
            assert_eq!(x.evaluate(n as f64), 0.0, "horizon {n} reaches zero exactly");
        }
    }
}
