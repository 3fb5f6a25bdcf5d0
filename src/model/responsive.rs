//! Responsive presentation of the primary call-to-action button

use super::viewport::ViewportClass;

/// Classes the button carries in its default inline presentation
const INLINE_CLASSES: [&str; 2] = ["button", "is-primary"];

/// Inline overrides turning the button into a floating action button
const FLOATING_OVERRIDES: [(&str, &str); 13] = [
    ("position", "fixed"),
    ("bottom", "25px"),
    ("right", "25px"),
    ("background-color", "#00d1b2"),
    ("color", "#fff"),
    ("width", "60px"),
    ("height", "60px"),
    ("border-radius", "50%"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("z-index", "9999"),
    ("border", "none"),
];

/// Presentation state of the call-to-action button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaStyle {
    pub classes: Vec<String>,
    pub label_visible: bool,
    pub overrides: Vec<(String, String)>,
}

impl Default for CtaStyle {
    fn default() -> Self {
        Self {
            classes: INLINE_CLASSES.iter().map(|c| c.to_string()).collect(),
            label_visible: true,
            overrides: Vec::new(),
        }
    }
}

impl CtaStyle {
    pub fn is_floating(&self) -> bool {
        self.overrides
            .iter()
            .any(|(property, value)| property == "position" && value == "fixed")
    }

    fn apply_mobile(&mut self) {
        self.classes.retain(|c| !INLINE_CLASSES.contains(&c.as_str()));
        self.label_visible = false;
        self.overrides = FLOATING_OVERRIDES
            .iter()
            .map(|(p, v)| (p.to_string(), v.to_string()))
            .collect();
    }

    fn apply_desktop(&mut self) {
        for class in INLINE_CLASSES {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self.label_visible = true;
        self.overrides.clear();
    }
}

/// Re-evaluates presentation on load and on every resize
#[derive(Debug, Default)]
pub struct ResponsiveController {
    class: Option<ViewportClass>,
    cta: CtaStyle,
}

impl ResponsiveController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current classification, `None` before the first evaluation
    pub fn class(&self) -> Option<ViewportClass> {
        self.class
    }

    pub fn cta(&self) -> &CtaStyle {
        &self.cta
    }

    /// Apply the classification for `width`.
    ///
    /// Returns the new class when it differs from the previous one; the
    /// button style is rewritten either way, so repeated calls settle on
    /// the same state.
    pub fn apply(&mut self, width: u32) -> Option<ViewportClass> {
        let class = ViewportClass::classify(width);
        match class {
            ViewportClass::Mobile => self.cta.apply_mobile(),
            ViewportClass::Desktop => self.cta.apply_desktop(),
        }

        if self.class == Some(class) {
            return None;
        }
        tracing::debug!(width, class = class.name(), "viewport reclassified");
        self.class = Some(class);
        Some(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_turns_button_into_fab() {
        let mut controller = ResponsiveController::new();
        assert_eq!(controller.apply(500), Some(ViewportClass::Mobile));

        let cta = controller.cta();
        assert!(cta.is_floating());
        assert!(!cta.label_visible);
        assert!(cta.classes.is_empty());
    }

    #[test]
    fn test_desktop_keeps_default_style() {
        let mut controller = ResponsiveController::new();
        assert_eq!(controller.apply(1024), Some(ViewportClass::Desktop));
        assert_eq!(controller.cta(), &CtaStyle::default());
    }

    #[test]
    fn test_round_trip_restores_original_style() {
        let mut controller = ResponsiveController::new();
        controller.apply(1024);
        let original = controller.cta().clone();

        controller.apply(500);
        assert_ne!(controller.cta(), &original);

        controller.apply(1024);
        assert_eq!(controller.cta(), &original);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut controller = ResponsiveController::new();
        controller.apply(500);
        let once = controller.cta().clone();

        assert_eq!(controller.apply(500), None);
        assert_eq!(controller.apply(320), None);
        assert_eq!(controller.cta(), &once);
        assert_eq!(controller.cta().overrides.len(), FLOATING_OVERRIDES.len());
    }

    #[test]
    fn test_extra_classes_survive_round_trip() {
        let mut controller = ResponsiveController::new();
        controller.cta.classes.insert(0, "cta".to_string());
        let original = controller.cta().clone();

        controller.apply(500);
        assert_eq!(controller.cta().classes, vec!["cta".to_string()]);
        controller.apply(1024);
        assert_eq!(controller.cta(), &original);
    }
}
