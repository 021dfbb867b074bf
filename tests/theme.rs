//! Theme loading and palette tests

use rainbow_parens::theme::{
    load_theme, BracePalette, Color, ColorScheme, Theme, BUILTIN_THEMES, CLASSIC_YAML,
    RAINBOW_DARK_YAML, RAINBOW_LIGHT_YAML,
};

#[test]
fn test_color_from_hex_6() {
    let color = Color::from_hex("#D19A66").unwrap();
    assert_eq!((color.r, color.g, color.b, color.a), (0xD1, 0x9A, 0x66, 255));
}

#[test]
fn test_color_from_hex_8() {
    let color = Color::from_hex("#1E1E1E80").unwrap();
    assert_eq!(color.a, 0x80);
}

#[test]
fn test_color_from_hex_rejects_garbage() {
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#GG0000").is_err());
    assert!(Color::from_hex("#ééé").is_err());
}

#[test]
fn test_builtin_yaml_parses() {
    assert_eq!(Theme::from_yaml(RAINBOW_DARK_YAML).unwrap().name, "Rainbow Dark");
    assert_eq!(Theme::from_yaml(RAINBOW_LIGHT_YAML).unwrap().name, "Rainbow Light");
    assert_eq!(Theme::from_yaml(CLASSIC_YAML).unwrap().palette.len(), 3);
}

#[test]
fn test_all_builtins_load_by_id() {
    for builtin in BUILTIN_THEMES {
        let theme = Theme::from_builtin(builtin.id).unwrap();
        assert!(!theme.palette.is_empty(), "{} has no colors", builtin.id);
    }
}

#[test]
fn test_unknown_theme_id_is_an_error() {
    assert!(Theme::from_builtin("no-such-theme").is_err());
    assert!(load_theme("no-such-theme").is_err());
}

#[test]
fn test_empty_palette_is_rejected() {
    let err = Theme::from_yaml("name: Empty\nbrackets: []\n").unwrap_err();
    assert!(err.contains("no bracket colors"));
}

#[test]
fn test_levels_wrap_by_palette_length() {
    let palette = BracePalette::new(vec![
        Color::rgb(1, 0, 0),
        Color::rgb(2, 0, 0),
        Color::rgb(3, 0, 0),
    ])
    .unwrap();
    assert_eq!(palette.attribute_for(0), palette.attribute_for(3));
    assert_eq!(palette.attribute_for(4).foreground.r, 2);
    assert_ne!(palette.attribute_for(1), palette.attribute_for(2));
}

#[test]
fn test_default_theme_has_a_palette() {
    assert_eq!(Theme::default().palette.len(), 6);
}
