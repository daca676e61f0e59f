use crate::constants::MOBILE_MAX_WIDTH;

/// Live viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        (self.width / self.height.max(1.0)) as f32
    }

    #[inline]
    pub fn class(&self) -> DeviceClass {
        classify(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    MobileOrVertical,
    Desktop,
}

impl DeviceClass {
    #[inline]
    pub fn is_mobile_or_vertical(self) -> bool {
        matches!(self, DeviceClass::MobileOrVertical)
    }
}

/// Narrow screens and portrait screens both count as mobile.
///
/// Not cached: callers re-classify at every decision point so a resize or
/// orientation change is picked up immediately.
#[inline]
pub fn classify(width: f64, height: f64) -> DeviceClass {
    if width <= MOBILE_MAX_WIDTH || height > width {
        DeviceClass::MobileOrVertical
    } else {
        DeviceClass::Desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_width_is_mobile() {
        assert_eq!(classify(768.0, 400.0), DeviceClass::MobileOrVertical);
        assert_eq!(classify(769.0, 400.0), DeviceClass::Desktop);
    }

    #[test]
    fn portrait_desktop_width_is_vertical() {
        assert_eq!(classify(1200.0, 1201.0), DeviceClass::MobileOrVertical);
        assert_eq!(classify(1200.0, 1200.0), DeviceClass::Desktop);
    }
}
