use approx::assert_relative_eq;
use chainhue::color::{
    Hsv, ParseError, contrast_ratio, hsv_to_rgb, parse_color, parse_triple, relative_luminance,
    rgb_to_hsv, to_byte, to_unit, unit,
};
use palette::Srgb;

#[test]
fn test_byte_unit_round_trip() {
    for r in (0u8..=255).step_by(5) {
        for g in (0u8..=255).step_by(17) {
            for b in [0u8, 1, 127, 128, 254, 255] {
                let c = Srgb::new(r, g, b);
                assert_eq!(to_byte(to_unit(c)), c, "round trip failed for {c:?}");
            }
        }
    }
}

#[test]
fn test_unit_channels_stay_in_range() {
    let c = unit(-0.5, 0.5, 3.0);
    assert_eq!((c.red, c.green, c.blue), (0.0, 0.5, 1.0));
}

#[test]
fn test_hsv_round_trip_is_stable() {
    let samples = [
        unit(0.13, 0.55, 0.9),
        unit(0.9, 0.2, 0.1),
        unit(0.3, 0.8, 0.35),
        unit(0.95, 0.95, 0.2),
        unit(0.5, 0.1, 0.7),
    ];
    for color in samples {
        let hsv = rgb_to_hsv(color);
        let again = rgb_to_hsv(hsv_to_rgb(hsv));
        assert_relative_eq!(hsv.hue, again.hue, epsilon = 1e-9);
        assert_relative_eq!(hsv.saturation, again.saturation, epsilon = 1e-9);
        assert_relative_eq!(hsv.value, again.value, epsilon = 1e-9);
    }
}

#[test]
fn test_hue_rotation_wraps() {
    let hsv = Hsv::new(0.75, 1.0, 1.0).rotate(0.5);
    assert_relative_eq!(hsv.hue, 0.25);
    assert!(Hsv::new(-0.1, 0.5, 0.5).hue >= 0.0);
    assert!(Hsv::new(3.0, 0.5, 0.5).hue < 1.0);
}

#[test]
fn test_luminance_endpoints() {
    assert_eq!(relative_luminance(unit(0.0, 0.0, 0.0)), 0.0);
    assert_relative_eq!(relative_luminance(unit(1.0, 1.0, 1.0)), 1.0, epsilon = 1e-12);
}

#[test]
fn test_contrast_ratio_identity_and_symmetry() {
    for l in [0.0, 0.05, 0.214, 0.5, 1.0] {
        assert_eq!(contrast_ratio(l, l), 1.0);
    }
    let pairs = [(0.0, 1.0), (0.2, 0.7), (0.9, 0.01)];
    for (a, b) in pairs {
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }
    assert_relative_eq!(contrast_ratio(0.0, 1.0), 21.0, epsilon = 1e-12);
}

#[test]
fn test_parse_triple_rejects_malformed_input() {
    assert_eq!(parse_triple("1,2"), Err(ParseError::WrongArity(2)));
    assert_eq!(parse_triple("1,2,3,4"), Err(ParseError::WrongArity(4)));
    assert_eq!(parse_triple(""), Err(ParseError::Empty));
    assert_eq!(
        parse_triple("a,b,c"),
        Err(ParseError::NotNumeric("a".to_string()))
    );
    assert!(parse_triple("1,,3").is_err());
    assert!(parse_triple("NaN, 1, 2").is_err());
}

#[test]
fn test_parse_triple_trims_and_clamps() {
    assert_eq!(parse_triple("10, 20, 30"), Ok(Srgb::new(10u8, 20, 30)));
    assert_eq!(parse_triple("  300 ,-4,  7.6 "), Ok(Srgb::new(255u8, 0, 8)));
}

#[test]
fn test_hsv_of_gray_has_no_hue() {
    for v in [0.0, 0.35, 1.0] {
        let hsv = rgb_to_hsv(unit(v, v, v));
        assert_eq!(hsv.hue, 0.0);
        assert_eq!(hsv.saturation, 0.0);
        assert_relative_eq!(hsv.value, v, epsilon = 1e-12);
    }
}

#[test]
fn test_hsv_of_primaries() {
    let blue = rgb_to_hsv(unit(0.0, 0.0, 1.0));
    assert_relative_eq!(blue.hue, 2.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(blue.saturation, 1.0, epsilon = 1e-12);

    let yellow = hsv_to_rgb(Hsv::new(1.0 / 6.0, 1.0, 0.95));
    assert_relative_eq!(yellow.red, 0.95, epsilon = 1e-9);
    assert_relative_eq!(yellow.green, 0.95, epsilon = 1e-9);
    assert_relative_eq!(yellow.blue, 0.0, epsilon = 1e-9);
}

#[test]
fn test_parse_color_keeps_arity_error_for_bare_numbers() {
    assert_eq!(parse_color("123"), Err(ParseError::WrongArity(1)));
    assert_eq!(parse_color("1,2"), Err(ParseError::WrongArity(2)));
    assert_eq!(parse_color("#123"), Ok(Srgb::new(17u8, 34, 51)));
    assert_eq!(parse_color("#228be6"), Ok(Srgb::new(34u8, 139, 230)));
    assert_eq!(parse_color("red"), Ok(Srgb::new(255u8, 0, 0)));
    assert_eq!(parse_color("rgb(1, 2, 3)"), Ok(Srgb::new(1u8, 2, 3)));
}
