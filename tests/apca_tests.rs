use approx::assert_relative_eq;
use chainhue::apca::apca_contrast;
use chainhue::color::unit;

#[test]
fn test_black_on_white() {
    let lc = apca_contrast(unit(0.0, 0.0, 0.0), unit(1.0, 1.0, 1.0));

    // Dark text on a light background reads as positive polarity
    assert_relative_eq!(lc, 106.0, epsilon = 3.0);
    assert!(lc > 0.0);
}

#[test]
fn test_white_on_black() {
    let lc = apca_contrast(unit(1.0, 1.0, 1.0), unit(0.0, 0.0, 0.0));

    assert_relative_eq!(lc, -107.0, epsilon = 3.0);
    assert!(lc < 0.0);
}

#[test]
fn test_same_color_zero_contrast() {
    for c in [unit(0.5, 0.5, 0.5), unit(0.13, 0.55, 0.9), unit(1.0, 0.0, 0.0)] {
        assert_eq!(apca_contrast(c, c), 0.0);
    }
}

#[test]
fn test_darker_text_scores_higher_on_light_background() {
    let bg = unit(0.95, 0.95, 0.9);
    let mid = apca_contrast(unit(0.4, 0.4, 0.4), bg);
    let dark = apca_contrast(unit(0.1, 0.1, 0.1), bg);
    assert!(dark > mid);
}
