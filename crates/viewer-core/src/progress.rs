use crate::constants::{BYTES_PER_MB, MAX_PREALLOC_BYTES};

/// Loader progress as shown to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressReport {
    /// Always within `[0, 100]`.
    pub percent: f32,
    pub message: String,
}

/// Percentage for a partial download. With no usable total the loaded bytes
/// are measured against `assumed_max_bytes` instead.
pub fn progress_percent(loaded: u64, total: Option<u64>, assumed_max_bytes: u64) -> f32 {
    let raw = match total {
        Some(t) if t > 0 => loaded as f64 / t as f64 * 100.0,
        _ if assumed_max_bytes > 0 => loaded as f64 / assumed_max_bytes as f64 * 100.0,
        _ => 0.0,
    };
    clamp_percent(raw as f32)
}

#[inline]
pub fn clamp_percent(percent: f32) -> f32 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

pub fn progress_report(
    label: &str,
    loaded: u64,
    total: Option<u64>,
    assumed_max_bytes: u64,
) -> ProgressReport {
    let percent = progress_percent(loaded, total, assumed_max_bytes);
    let message = match total {
        Some(t) if t > 0 => format!("{}: {}%", label, percent.round() as u32),
        _ => format!(
            "{}: {:.1} MB",
            label,
            loaded as f64 / BYTES_PER_MB as f64
        ),
    };
    ProgressReport { percent, message }
}

/// Download buffer capacity for an advertised `Content-Length`.
#[inline]
pub fn prealloc_bytes(total: Option<u64>) -> usize {
    total.unwrap_or(0).min(MAX_PREALLOC_BYTES) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prealloc_is_capped() {
        assert_eq!(prealloc_bytes(None), 0);
        assert_eq!(prealloc_bytes(Some(1024)), 1024);
        assert_eq!(prealloc_bytes(Some(u64::MAX)), MAX_PREALLOC_BYTES as usize);
    }

    #[test]
    fn known_total_uses_ratio() {
        let r = progress_report("Loading model", 50, Some(200), 0);
        assert_eq!(r.percent, 25.0);
        assert_eq!(r.message, "Loading model: 25%");
    }

    #[test]
    fn unknown_total_shows_megabytes() {
        let r = progress_report("Loading demo", 3 * BYTES_PER_MB / 2, None, 10 * BYTES_PER_MB);
        assert!((r.percent - 15.0).abs() < 1e-4);
        assert_eq!(r.message, "Loading demo: 1.5 MB");
    }

    #[test]
    fn zero_total_falls_back_to_estimate() {
        assert!((progress_percent(BYTES_PER_MB, Some(0), 5 * BYTES_PER_MB) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn percent_never_leaves_range() {
        assert_eq!(progress_percent(500, Some(100), 0), 100.0);
        assert_eq!(progress_percent(u64::MAX, None, 1), 100.0);
        assert_eq!(progress_percent(10, None, 0), 0.0);
        assert_eq!(clamp_percent(f32::NAN), 0.0);
        assert_eq!(clamp_percent(-3.0), 0.0);
    }
}
