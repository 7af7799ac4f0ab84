use crate::config::{ArcStyleConfig, DEFAULT_SIZE};
use crate::error::GaugeError;

fn check_size(size: f64) -> Result<f64, GaugeError> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(GaugeError::invalid_config(format!(
            "canvas size must be a positive number, got {size}"
        )))
    }
}

/// Scales `base`, expressed for the reference canvas, to a canvas of
/// `requested` size. `None` keeps the base untouched.
pub fn resolve(
    base: &ArcStyleConfig,
    requested: Option<f64>,
) -> Result<ArcStyleConfig, GaugeError> {
    resolve_against(base, DEFAULT_SIZE, requested)
}

pub fn resolve_against(
    base: &ArcStyleConfig,
    reference: f64,
    requested: Option<f64>,
) -> Result<ArcStyleConfig, GaugeError> {
    let Some(size) = requested else {
        return Ok(*base);
    };
    let reference = check_size(reference)?;
    let size = check_size(size)?;

    let scaled = if size == reference {
        *base
    } else {
        let magnitude = size.max(reference) / size.min(reference);
        log::debug!("Scaling style from {reference} to {size} (x{magnitude})");
        if size < reference {
            base.map(|v| v / magnitude)
        } else {
            base.map(|v| v * magnitude)
        }
    };

    scaled.validate()?;
    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_style_close(a: &ArcStyleConfig, b: &ArcStyleConfig) {
        for ((name, x), (_, y)) in a.fields().into_iter().zip(b.fields()) {
            assert!((x - y).abs() <= 1e-9 * x.abs().max(1.0), "{name}: {x} != {y}");
        }
    }

    #[test]
    fn test_no_request_returns_base() {
        let base = ArcStyleConfig::default();
        assert_eq!(resolve(&base, None).unwrap(), base);
    }

    #[test]
    fn test_reference_size_is_identity() {
        let base = ArcStyleConfig::default();
        assert_eq!(resolve(&base, Some(DEFAULT_SIZE)).unwrap(), base);
    }

    #[test]
    fn test_double_size_doubles_every_constant() {
        let base = ArcStyleConfig::default();
        let scaled = resolve(&base, Some(600.0)).unwrap();
        assert_style_close(&scaled, &base.map(|v| v * 2.0));
        assert_eq!(scaled.total_arc_radius, 256.0);
    }

    #[test]
    fn test_half_size_halves_every_constant() {
        let base = ArcStyleConfig::default();
        let scaled = resolve(&base, Some(150.0)).unwrap();
        assert_style_close(&scaled, &base.map(|v| v / 2.0));
        assert_eq!(scaled.glow_offset, 2.0);
    }

    #[test]
    fn test_invalid_sizes() {
        let base = ArcStyleConfig::default();
        for size in [0.0, -300.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                resolve(&base, Some(size)),
                Err(GaugeError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let base = ArcStyleConfig {
            inner_arc_width: 0.0,
            ..Default::default()
        };
        assert!(resolve(&base, Some(450.0)).is_err());
    }

    proptest! {
        #[test]
        fn scaling_round_trips(size in 1.0f64..5000.0) {
            let base = ArcStyleConfig::default();
            let there = resolve(&base, Some(size)).unwrap();
            let back = resolve(&there, Some(DEFAULT_SIZE * DEFAULT_SIZE / size)).unwrap();
            for ((name, x), (_, y)) in base.fields().into_iter().zip(back.fields()) {
                prop_assert!((x - y).abs() <= 1e-9 * x.abs().max(1.0), "{}: {} != {}", name, x, y);
            }
        }

        #[test]
        fn scaled_constants_stay_positive(size in 0.001f64..100_000.0) {
            let scaled = resolve(&ArcStyleConfig::default(), Some(size)).unwrap();
            prop_assert!(scaled.fields().iter().all(|(_, v)| v.is_finite() && *v > 0.0));
        }
    }
}
