//! UI Theme - Design system constants
//!
//! Colors, icons and column widths shared by every renderer, so the
//! plan, the live execution log and the final report look alike.

use crossterm::style::Color;
use sysmaint_core::Tier;

/// Default theme for sysmaint output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Status icons
    pub icons: Icons,
    /// Column widths
    pub layout: Layout,
}

impl Theme {
    /// Color used for a tier label.
    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Safe => self.colors.success,
            Tier::Warning => self.colors.warning,
            Tier::Unsafe => self.colors.error,
        }
    }
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Action names (primary content)
    pub action_name: Color,
    /// Commands, details and secondary info
    pub secondary: Color,
    /// Section headers
    pub header: Color,
    /// Success states
    pub success: Color,
    /// Warning states
    pub warning: Color,
    /// Error states
    pub error: Color,
    /// Active/in-progress items
    pub active: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            action_name: Color::Cyan,
            secondary: Color::DarkGrey,
            header: Color::DarkGrey,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            active: Color::Blue,
        }
    }
}

/// Status icons for different states
#[derive(Debug, Clone)]
pub struct Icons {
    /// Active/in-progress state (●)
    pub active: &'static str,
    /// Success/completed state (✓)
    pub success: &'static str,
    /// Error/failed state (✗)
    pub error: &'static str,
    /// Warning state (⚠)
    pub warning: &'static str,
    /// Skipped state (○)
    pub skipped: &'static str,
    /// Info/detail state (ℹ)
    pub info: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            active: "●",
            success: "✓",
            error: "✗",
            warning: "⚠",
            skipped: "○",
            info: "ℹ",
        }
    }
}

/// Column widths for tabular output
#[derive(Debug, Clone)]
pub struct Layout {
    /// Width allocated for the action name column
    pub name_width: usize,
    /// Width allocated for the tier column
    pub tier_width: usize,
    /// Width allocated for the outcome column
    pub outcome_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            name_width: 36,
            tier_width: 9,
            outcome_width: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.icons.success, "✓");
        assert_eq!(theme.icons.error, "✗");
        assert_eq!(theme.layout.name_width, 36);
    }

    #[test]
    fn test_tier_colors_distinct() {
        let theme = Theme::default();
        assert_ne!(theme.tier_color(Tier::Safe), theme.tier_color(Tier::Warning));
        assert_ne!(theme.tier_color(Tier::Warning), theme.tier_color(Tier::Unsafe));
    }
}
