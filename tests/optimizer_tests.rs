use chainhue::color::{sigmoid_color, unit};
use chainhue::gradient::{Differencing, FiniteDifference};
use chainhue::optimizer::{
    DescentSettings, Objective, TEXT_INITIAL_PARAMS, TextObjective, minimize, optimize_text,
};

fn sample_backgrounds() -> Vec<chainhue::color::Color01> {
    vec![
        unit(0.0, 0.0, 0.0),
        unit(1.0, 1.0, 1.0),
        unit(0.13, 0.55, 0.9),
        unit(1.0, 0.0, 0.0),
        unit(0.5, 0.5, 0.5),
        unit(0.95, 0.9, 0.3),
        unit(0.1, 0.3, 0.1),
    ]
}

#[test]
fn test_text_loss_does_not_increase() {
    for bg in sample_backgrounds() {
        let result = optimize_text(bg, &TEXT_INITIAL_PARAMS, &DescentSettings::text(), 6.0);
        assert!(
            result.loss <= result.initial_loss,
            "loss rose for {bg:?}: {} -> {}",
            result.initial_loss,
            result.loss
        );
    }
}

#[test]
fn test_forward_differencing_also_descends() {
    let settings = DescentSettings {
        gradient: FiniteDifference {
            differencing: Differencing::Forward,
            ..Default::default()
        },
        ..DescentSettings::text()
    };
    for bg in sample_backgrounds() {
        let result = optimize_text(bg, &TEXT_INITIAL_PARAMS, &settings, 6.0);
        assert!(result.loss <= result.initial_loss);
    }
}

#[test]
fn test_result_value_matches_params() {
    let bg = unit(0.13, 0.55, 0.9);
    let result = optimize_text(bg, &TEXT_INITIAL_PARAMS, &DescentSettings::text(), 6.0);
    assert_eq!(result.value, sigmoid_color(&result.params));

    let objective = TextObjective {
        background: bg,
        target_contrast: 6.0,
    };
    assert_eq!(objective.loss(&result.params), result.loss);
}

#[test]
fn test_minimize_is_deterministic() {
    let objective = TextObjective {
        background: unit(0.7, 0.2, 0.4),
        target_contrast: 6.0,
    };
    let a = minimize(&objective, &[0.3, -0.2, 0.1], &DescentSettings::text());
    let b = minimize(&objective, &[0.3, -0.2, 0.1], &DescentSettings::text());
    assert_eq!(a, b);
}

#[test]
fn test_iteration_budget_is_reported() {
    let f = |x: &[f64]| x[0].abs();
    let settings = DescentSettings {
        iterations: 7,
        ..DescentSettings::text()
    };
    assert_eq!(minimize(&f, &[1.0], &settings).iterations, 7);
}
