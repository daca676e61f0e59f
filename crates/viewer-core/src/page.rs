//! Page-level decisions that do not need the DOM: which nav item is
//! active and how the hero background reacts to the call-to-action button.

pub const NAV_ITEM_SELECTOR: &str = ".nav-item";
pub const NAV_ACTIVE_CLASSES: [&str; 2] = ["nav-link-active", "text-gray-900"];
pub const NAV_INACTIVE_CLASS: &str = "text-gray-500";
pub const REVEAL_SELECTOR: &str = ".animate-on-scroll";
pub const REVEAL_VISIBLE_CLASS: &str = "is-visible";
pub const HERO_SECTION_SELECTOR: &str = ".hero-section";
pub const HERO_FADE_IN_CLASS: &str = "animate-fade-in";
pub const HERO_FADE_UP_SELECTOR: &str = ".animate-fade-up";
pub const HERO_BUTTON_ID: &str = "hero-btn";
pub const HERO_BG_SELECTOR: &str = ".hero-bg";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Index,
    About,
}

impl Page {
    /// Value of the `data-page` attribute on matching nav items.
    pub fn data_page(self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::About => "about",
        }
    }
}

/// Only the last path segment matters; anything but `about.html` is the
/// index page.
pub fn active_page(pathname: &str) -> Page {
    match pathname.rsplit('/').next() {
        Some("about.html") => Page::About,
        _ => Page::Index,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroEvent {
    MouseEnter,
    MouseLeave,
    MouseDown,
    MouseUp,
    TouchStart,
    TouchEnd,
}

impl HeroEvent {
    pub const ALL: [HeroEvent; 6] = [
        HeroEvent::MouseEnter,
        HeroEvent::MouseLeave,
        HeroEvent::MouseDown,
        HeroEvent::MouseUp,
        HeroEvent::TouchStart,
        HeroEvent::TouchEnd,
    ];

    pub fn dom_name(self) -> &'static str {
        match self {
            HeroEvent::MouseEnter => "mouseenter",
            HeroEvent::MouseLeave => "mouseleave",
            HeroEvent::MouseDown => "mousedown",
            HeroEvent::MouseUp => "mouseup",
            HeroEvent::TouchStart => "touchstart",
            HeroEvent::TouchEnd => "touchend",
        }
    }

    /// Touch handlers cancel the default so the browser does not follow up
    /// with emulated mouse events.
    pub fn prevents_default(self) -> bool {
        matches!(self, HeroEvent::TouchStart | HeroEvent::TouchEnd)
    }
}

/// Inline style applied to the hero background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroStyle {
    pub scale: f32,
    pub blur_px: f32,
    /// `None` keeps whatever transition the stylesheet sets.
    pub transition_secs: Option<f32>,
}

impl HeroStyle {
    pub fn transform(&self) -> String {
        format!("scale({})", self.scale)
    }

    pub fn filter(&self) -> String {
        format!("blur({}px)", self.blur_px)
    }

    pub fn transition_duration(&self) -> Option<String> {
        self.transition_secs.map(|s| format!("{s}s"))
    }
}

pub fn hero_style(event: HeroEvent) -> HeroStyle {
    let (scale, blur_px, transition_secs) = match event {
        HeroEvent::MouseEnter => (1.05, 2.0, None),
        HeroEvent::MouseLeave => (1.0, 0.0, None),
        HeroEvent::MouseDown | HeroEvent::TouchStart => (1.03, 1.0, Some(0.3)),
        HeroEvent::MouseUp => (1.05, 2.0, Some(1.2)),
        HeroEvent::TouchEnd => (1.0, 0.0, Some(1.2)),
    };
    HeroStyle {
        scale,
        blur_px,
        transition_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_page_needs_exact_file_name() {
        assert_eq!(active_page("/site/about.html"), Page::About);
        assert_eq!(active_page("about.html"), Page::About);
        assert_eq!(active_page("/about"), Page::Index);
        assert_eq!(active_page("/"), Page::Index);
        assert_eq!(active_page(""), Page::Index);
    }

    #[test]
    fn press_and_release_styles() {
        let down = hero_style(HeroEvent::MouseDown);
        assert_eq!(down.transform(), "scale(1.03)");
        assert_eq!(down.filter(), "blur(1px)");
        assert_eq!(down.transition_duration().as_deref(), Some("0.3s"));
        assert_eq!(hero_style(HeroEvent::TouchStart), down);

        let up = hero_style(HeroEvent::MouseUp);
        assert_eq!(up.transition_duration().as_deref(), Some("1.2s"));
        assert_eq!(hero_style(HeroEvent::MouseLeave).filter(), "blur(0px)");
        assert_eq!(hero_style(HeroEvent::MouseEnter).transition_secs, None);
    }

    #[test]
    fn only_touch_events_cancel_default() {
        let cancelling: Vec<_> = HeroEvent::ALL
            .into_iter()
            .filter(|e| e.prevents_default())
            .map(|e| e.dom_name())
            .collect();
        assert_eq!(cancelling, ["touchstart", "touchend"]);
    }
}
