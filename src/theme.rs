//! Light/dark palettes for the distribution view
//! Category colors follow the Tailwind 400/500 scale so the terminal view
//! matches the web dashboards that write our snapshots.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::stats::Category;

// Tailwind palette
const PURPLE_400: Color = Color::Rgb(192, 132, 252);
const PURPLE_500: Color = Color::Rgb(168, 85, 247);
const PURPLE_600: Color = Color::Rgb(147, 51, 234);
const GREEN_400: Color = Color::Rgb(74, 222, 128);
const GREEN_500: Color = Color::Rgb(34, 197, 94);
const YELLOW_400: Color = Color::Rgb(250, 204, 21);
const YELLOW_500: Color = Color::Rgb(234, 179, 8);
const RED_400: Color = Color::Rgb(248, 113, 113);
const RED_500: Color = Color::Rgb(239, 68, 68);
const BLUE_300: Color = Color::Rgb(147, 197, 253);
const BLUE_400: Color = Color::Rgb(96, 165, 250);
const BLUE_500: Color = Color::Rgb(59, 130, 246);
const GRAY_50: Color = Color::Rgb(249, 250, 251);
const GRAY_300: Color = Color::Rgb(209, 213, 219);
const GRAY_400: Color = Color::Rgb(156, 163, 175);
const GRAY_600: Color = Color::Rgb(75, 85, 99);
const GRAY_700: Color = Color::Rgb(55, 65, 81);
const GRAY_900: Color = Color::Rgb(17, 24, 39);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn chrome(self) -> Chrome {
        match self {
            ThemeMode::Dark => Chrome {
                background: GRAY_900,
                text: GRAY_300,
                heading: GRAY_400,
                active_text: PURPLE_400,
                accent: BLUE_400,
            },
            ThemeMode::Light => Chrome {
                background: GRAY_50,
                text: GRAY_700,
                heading: GRAY_600,
                active_text: PURPLE_600,
                accent: BLUE_500,
            },
        }
    }
}

/// Colors for everything that is not an indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    pub background: Color,
    pub text: Color,
    pub heading: Color,      // Row headings ("Digits 0-4")
    pub active_text: Color,  // Live digit marker and its count label
    pub accent: Color,       // Key hints, popup borders
}

/// Style token for one indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStyle {
    pub fill: Color,
    pub border: Color,
    /// Glow strength, 0.0 for none
    pub glow: f32,
    /// Extra ring around the indicator (live digit only)
    pub ring: bool,
}

impl CategoryStyle {
    pub fn for_category(category: Category, mode: ThemeMode) -> Self {
        let dark = mode == ThemeMode::Dark;
        match category {
            Category::Active => Self {
                fill: PURPLE_500,
                border: PURPLE_400,
                glow: if dark { 0.8 } else { 0.6 },
                ring: true,
            },
            Category::Top => Self {
                fill: GREEN_500,
                border: GREEN_400,
                glow: if dark { 0.6 } else { 0.5 },
                ring: false,
            },
            Category::Second => Self {
                fill: YELLOW_500,
                border: YELLOW_400,
                glow: if dark { 0.6 } else { 0.5 },
                ring: false,
            },
            Category::Bottom => Self {
                fill: RED_500,
                border: RED_400,
                glow: if dark { 0.6 } else { 0.5 },
                ring: false,
            },
            Category::Default => {
                if dark {
                    Self { fill: BLUE_500, border: BLUE_400, glow: 0.0, ring: false }
                } else {
                    Self { fill: BLUE_400, border: BLUE_300, glow: 0.0, ring: false }
                }
            }
        }
    }
}

/// Legend swatch (fill, border). Same in both themes.
pub fn swatch(category: Category) -> (Color, Color) {
    match category {
        Category::Top => (GREEN_500, GREEN_400),
        Category::Second => (YELLOW_500, YELLOW_400),
        Category::Bottom => (RED_500, RED_400),
        Category::Active => (PURPLE_500, PURPLE_400),
        Category::Default => (BLUE_500, BLUE_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }

    #[test]
    fn active_has_ring_and_strongest_glow() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let active = CategoryStyle::for_category(Category::Active, mode);
            assert!(active.ring);
            for other in [Category::Top, Category::Second, Category::Bottom, Category::Default] {
                let style = CategoryStyle::for_category(other, mode);
                assert!(!style.ring);
                assert!(style.glow < active.glow);
            }
        }
    }

    #[test]
    fn ranked_colors_do_not_depend_on_theme() {
        for category in [Category::Active, Category::Top, Category::Second, Category::Bottom] {
            let light = CategoryStyle::for_category(category, ThemeMode::Light);
            let dark = CategoryStyle::for_category(category, ThemeMode::Dark);
            assert_eq!(light.fill, dark.fill);
            assert!(dark.glow > light.glow);
        }
    }

    #[test]
    fn default_category_dims_in_light_theme() {
        let light = CategoryStyle::for_category(Category::Default, ThemeMode::Light);
        let dark = CategoryStyle::for_category(Category::Default, ThemeMode::Dark);
        assert_ne!(light.fill, dark.fill);
        assert_eq!(light.glow, 0.0);
    }

    #[test]
    fn theme_mode_parses_from_toml_strings() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: ThemeMode,
        }
        let w: Wrapper = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(w.theme, ThemeMode::Light);
    }
}
