use super::*;
use crate::schema::ColorMode;
use backdrop_common::Hsl;

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

// -- resolve_palette --

#[test]
fn named_modes_return_fixed_entries() {
    let dark = resolve_palette(ColorMode::Cyber, "#ffffff", true);
    assert_eq!(dark.primary, "#00ffff");
    assert_eq!(dark.background, "#0a0a0f");

    let light = resolve_palette(ColorMode::Cyber, "#ffffff", false);
    assert_eq!(light.primary, "#0891b2");
}

#[test]
fn every_named_mode_has_valid_slots_in_both_brightnesses() {
    for mode in ColorMode::ALL {
        if mode == ColorMode::Custom {
            continue;
        }
        for dark in [true, false] {
            let palette = resolve_palette(mode, "", dark);
            for slot in palette.slots() {
                assert!(
                    crate::colors::is_literal_hex(slot),
                    "{mode} (dark={dark}) has bad slot {slot}"
                );
            }
        }
        assert_ne!(
            resolve_palette(mode, "", true),
            resolve_palette(mode, "", false)
        );
    }
}

#[test]
fn custom_mode_derives_alpha_variants() {
    let palette = resolve_palette(ColorMode::Custom, "#123456", true);
    assert_eq!(palette.primary, "#123456");
    assert_eq!(palette.secondary, "#123456cc");
    assert_eq!(palette.accent, "#12345688");
    assert_eq!(palette.background, "#0a0a0f");

    let resolved = ResolvedPalette::from_palette(&palette);
    assert_eq!(resolved.secondary, Color::from_rgba(0x12, 0x34, 0x56, 0xcc));
    assert_eq!(resolved.accent.a, 0x88);
}

#[test]
fn custom_color_with_alpha_is_replaced_not_extended() {
    let palette = resolve_palette(ColorMode::Custom, "#336699ff", true);
    assert_eq!(palette.primary, "#336699ff");
    assert_eq!(palette.secondary, "#336699cc");
    assert_eq!(palette.accent, "#33669988");

    let resolved = ResolvedPalette::from_palette(&palette);
    assert_eq!(resolved.secondary, Color::from_rgba(0x33, 0x66, 0x99, 0xcc));
    assert_eq!(resolved.accent, Color::from_rgba(0x33, 0x66, 0x99, 0x88));
}

#[test]
fn custom_mode_uses_cyber_background_for_brightness() {
    let light = resolve_palette(ColorMode::Custom, "#123456", false);
    assert_eq!(
        light.background,
        resolve_palette(ColorMode::Cyber, "", false).background
    );
}

// -- ResolvedPalette --

#[test]
fn css_variable_falls_back_in_every_derived_slot() {
    let resolved = ResolvedPalette::resolve(ColorMode::Custom, "var(--some-token)", true);
    assert_eq!(resolved.primary, FALLBACK_PRIMARY);
    assert_eq!(resolved.secondary, FALLBACK_SECONDARY);
    assert_eq!(resolved.accent, FALLBACK_ACCENT);
    assert_eq!(resolved.background, Color::from_rgb(0x0a, 0x0a, 0x0f));
}

#[test]
fn garbage_custom_color_falls_back() {
    let resolved = ResolvedPalette::resolve(ColorMode::Custom, "not-a-color", true);
    assert_eq!(resolved.primary, FALLBACK_PRIMARY);
}

#[test]
fn short_hex_is_not_accepted() {
    let resolved = ResolvedPalette::resolve(ColorMode::Custom, "#fff", true);
    assert_eq!(resolved.primary, FALLBACK_PRIMARY);
}

#[test]
fn default_resolved_palette_is_fallbacks() {
    let palette = ResolvedPalette::default();
    assert_eq!(palette.cycle(), [FALLBACK_PRIMARY, FALLBACK_SECONDARY, FALLBACK_ACCENT]);
}

// -- hue averaging --

#[test]
fn mean_hue_wraps_around_zero() {
    let h = mean_hue(&[350.0, 10.0]).unwrap();
    assert!(hue_distance(h, 0.0) < 5.0, "got {h}");
}

#[test]
fn mean_hue_simple_cases() {
    assert!(mean_hue(&[]).is_none());
    let h = mean_hue(&[90.0]).unwrap();
    assert!((h - 90.0).abs() < 1e-9);
    let h = mean_hue(&[80.0, 100.0]).unwrap();
    assert!((h - 90.0).abs() < 1e-9);
}

#[test]
fn opposing_hues_resolve_to_zero() {
    assert_eq!(mean_hue(&[0.0, 180.0]), Some(0.0));
}

#[test]
fn hsl_mean_of_reds_across_wrap_stays_red() {
    let a = Color::from_hsl(Hsl::new(350.0, 1.0, 0.5));
    let b = Color::from_hsl(Hsl::new(10.0, 1.0, 0.5));
    let avg = average_of(&[a, b], AverageMethod::HslMean).unwrap();
    assert!(avg.r > 200, "{avg:?}");
    assert!(avg.g < 60 && avg.b < 60, "{avg:?}");
    assert!(hue_distance(avg.to_hsl().h, 0.0) < 5.0);
}

#[test]
fn achromatic_colors_do_not_vote_on_hue() {
    let red = Color::from_rgb(255, 0, 0);
    let grey = Color::from_rgb(128, 128, 128);
    let avg = average_of(&[red, grey], AverageMethod::HslMean).unwrap();
    // Hue comes from red alone, saturation is halved.
    assert!(avg.r > avg.g);
    assert_eq!(avg.g, avg.b);
    assert!((avg.to_hsl().s - 0.5).abs() < 0.05);
}

#[test]
fn all_achromatic_gives_grey() {
    let avg = average_of(&[Color::BLACK, Color::WHITE], AverageMethod::HslMean).unwrap();
    assert_eq!(avg.r, avg.g);
    assert_eq!(avg.g, avg.b);
}

#[test]
fn rgb_mean_averages_channels() {
    let avg = average_of(&[Color::BLACK, Color::WHITE], AverageMethod::RgbMean).unwrap();
    assert_eq!(avg.to_rgb_hex(), "#808080");
}

#[test]
fn dominant_picks_most_saturated_first_on_tie() {
    let colors = [
        Color::from_rgb(128, 128, 128),
        Color::from_rgb(255, 0, 0),
        Color::from_rgb(0, 255, 0),
    ];
    let avg = average_of(&colors, AverageMethod::DominantSaturation).unwrap();
    assert_eq!(avg.to_rgb_hex(), "#ff0000");
}

#[test]
fn average_of_empty_is_none() {
    assert!(average_of(&[], AverageMethod::RgbMean).is_none());
}

// -- average_colors --

#[test]
fn average_colors_respects_include_background() {
    let palette = resolve_palette(ColorMode::Cyber, "", true);
    assert_eq!(
        average_colors(&palette, AverageMethod::RgbMean, false),
        "#55aad7"
    );
    assert_eq!(
        average_colors(&palette, AverageMethod::RgbMean, true),
        "#4282a5"
    );
}

#[test]
fn average_colors_skips_invalid_slots() {
    let palette = Palette {
        primary: "#ff0000".into(),
        secondary: "var(--x)".into(),
        accent: "nope".into(),
        background: "#000000".into(),
    };
    assert_eq!(
        average_colors(&palette, AverageMethod::RgbMean, false),
        "#ff0000"
    );
}

#[test]
fn average_colors_all_invalid_returns_fallback() {
    let palette = Palette {
        primary: "a".into(),
        secondary: "b".into(),
        accent: "c".into(),
        background: "d".into(),
    };
    assert_eq!(
        average_colors(&palette, AverageMethod::HslMean, true),
        FALLBACK_PRIMARY.to_rgb_hex()
    );
}

#[test]
fn average_method_parses_aliases() {
    assert_eq!("rgb".parse::<AverageMethod>().unwrap(), AverageMethod::RgbMean);
    assert_eq!(
        "HSL-MEAN".parse::<AverageMethod>().unwrap(),
        AverageMethod::HslMean
    );
    assert_eq!(
        "dominant".parse::<AverageMethod>().unwrap(),
        AverageMethod::DominantSaturation
    );
    assert!("median".parse::<AverageMethod>().is_err());
}

#[test]
fn accent_colors_light_is_lighter_than_dark() {
    let palette = resolve_palette(ColorMode::Ocean, "", true);
    let accents = accent_colors(&palette);
    let light = Color::from_hex(&accents.light).unwrap().to_hsl().l;
    let base = Color::from_hex(&accents.base).unwrap().to_hsl().l;
    let dark = Color::from_hex(&accents.dark).unwrap().to_hsl().l;
    assert!(light > base && base > dark);
}
