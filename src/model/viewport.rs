//! Viewport classification shared by the panel and responsive controllers

/// Width (in viewport units) separating mobile from desktop layouts
pub const VIEWPORT_BREAKPOINT: u32 = 768;

/// Width units a single terminal column stands for unless configured otherwise
pub const DEFAULT_CELL_WIDTH: u16 = 8;

/// Viewport classification derived from the current width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    /// Classify a width in viewport units against [`VIEWPORT_BREAKPOINT`]
    pub fn classify(width: u32) -> Self {
        if width < VIEWPORT_BREAKPOINT {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, ViewportClass::Mobile)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewportClass::Mobile => "mobile",
            ViewportClass::Desktop => "desktop",
        }
    }
}

/// Convert terminal columns into viewport units
pub fn viewport_width(columns: u16, cell_width: u16) -> u32 {
    u32::from(columns) * u32::from(cell_width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_around_breakpoint() {
        assert_eq!(ViewportClass::classify(500), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(767), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(768), ViewportClass::Desktop);
        assert_eq!(ViewportClass::classify(1024), ViewportClass::Desktop);
    }

    #[test]
    fn test_terminal_columns_map_to_width_units() {
        assert_eq!(viewport_width(96, DEFAULT_CELL_WIDTH), 768);
        assert_eq!(
            ViewportClass::classify(viewport_width(95, DEFAULT_CELL_WIDTH)),
            ViewportClass::Mobile
        );
        assert_eq!(
            ViewportClass::classify(viewport_width(96, DEFAULT_CELL_WIDTH)),
            ViewportClass::Desktop
        );
    }

    #[test]
    fn test_zero_cell_width_is_clamped() {
        assert_eq!(viewport_width(80, 0), 80);
    }
}
