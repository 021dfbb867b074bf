//! Bracket color themes
//!
//! Provides YAML-based palettes with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/rainbow-parens/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const RAINBOW_DARK_YAML: &str = include_str!("../themes/rainbow-dark.yaml");
pub const RAINBOW_LIGHT_YAML: &str = include_str!("../themes/rainbow-light.yaml");
pub const CLASSIC_YAML: &str = include_str!("../themes/classic.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "rainbow-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "rainbow-dark",
        yaml: RAINBOW_DARK_YAML,
    },
    BuiltinTheme {
        id: "rainbow-light",
        yaml: RAINBOW_LIGHT_YAML,
    },
    BuiltinTheme {
        id: "classic",
        yaml: CLASSIC_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string());
        match s.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// ANSI truecolor foreground escape sequence
    pub fn ansi_fg(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

/// Display attribute attached to a highlighted bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextAttributes {
    pub foreground: Color,
}

impl TextAttributes {
    pub const fn new(foreground: Color) -> Self {
        Self { foreground }
    }
}

/// Maps a nesting level to a display attribute
pub trait ColorScheme {
    /// Attribute for `level`, wrapping around the palette
    fn attribute_for(&self, level: usize) -> TextAttributes;
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub brackets: Vec<String>,
}

fn default_version() -> u32 {
    1
}

/// A resolved bracket theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub palette: BracePalette,
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let colors = data
            .brackets
            .iter()
            .map(|hex| Color::from_hex(hex))
            .collect::<Result<Vec<_>, _>>()?;
        let palette = BracePalette::new(colors)
            .ok_or_else(|| format!("Theme '{}' has no bracket colors", data.name))?;
        Ok(Theme {
            name: data.name,
            palette,
        })
    }

    /// Hardcoded fallback used when no theme can be loaded
    pub fn default_dark() -> Self {
        Self {
            name: "Rainbow Dark".to_string(),
            palette: BracePalette::default(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

/// Fixed-size bracket palette; levels wrap by modulo
#[derive(Debug, Clone, PartialEq)]
pub struct BracePalette {
    colors: Vec<TextAttributes>,
}

impl BracePalette {
    /// Returns `None` for an empty color list
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        Some(Self {
            colors: colors.into_iter().map(TextAttributes::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette index used for `level`
    pub fn index_for(&self, level: usize) -> usize {
        level % self.colors.len()
    }
}

impl Default for BracePalette {
    fn default() -> Self {
        Self {
            colors: [
                Color::rgb(0xE5, 0xC0, 0x7B),
                Color::rgb(0xC6, 0x78, 0xDD),
                Color::rgb(0x56, 0xB6, 0xC2),
                Color::rgb(0x98, 0xC3, 0x79),
                Color::rgb(0xE0, 0x6C, 0x75),
                Color::rgb(0x61, 0xAF, 0xEF),
            ]
            .into_iter()
            .map(TextAttributes::new)
            .collect(),
        }
    }
}

impl ColorScheme for BracePalette {
    fn attribute_for(&self, level: usize) -> TextAttributes {
        self.colors[self.index_for(level)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps_by_modulo() {
        let palette = BracePalette::new(vec![
            Color::rgb(1, 0, 0),
            Color::rgb(2, 0, 0),
            Color::rgb(3, 0, 0),
        ])
        .unwrap();
        assert_eq!(palette.attribute_for(0).foreground.r, 1);
        assert_eq!(palette.attribute_for(4).foreground.r, 2);
        assert_eq!(palette.index_for(5), 2);
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(BracePalette::new(vec![]).is_none());
        let err = Theme::from_yaml("name: Empty\nbrackets: []\n").unwrap_err();
        assert!(err.contains("no bracket colors"));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }
}
