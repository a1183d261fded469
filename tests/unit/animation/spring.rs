use super::*;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn future_and_trigger_frames_are_zero() {
    for cfg in [SpringConfig::POP_IN, SpringConfig::SCROLL] {
        assert_eq!(spring_progress(-1, fps(), cfg), 0.0);
        assert_eq!(spring_progress(-300, fps(), cfg), 0.0);
        assert!(spring_progress(0, fps(), cfg).abs() < 1e-12);
    }
}

#[test]
fn pop_in_overshoots_then_settles() {
    let peak = (0..60)
        .map(|f| spring_progress(f, fps(), SpringConfig::POP_IN))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0, "peak {peak}");
    assert!((spring_progress(90, fps(), SpringConfig::POP_IN) - 1.0).abs() < 1e-3);
}

#[test]
fn scroll_profile_is_monotone_and_bounded() {
    assert!(SpringConfig::SCROLL.damping_ratio() > 1.0);
    let mut prev = 0.0;
    for f in 0..240 {
        let v = spring_progress(f, fps(), SpringConfig::SCROLL);
        assert!(v >= prev - 1e-12, "frame {f}: {v} < {prev}");
        assert!(v <= 1.0 + 1e-12);
        prev = v;
    }
    assert!((prev - 1.0).abs() < 1e-3);
}

#[test]
fn critically_damped_branch_is_monotone() {
    let cfg = SpringConfig {
        stiffness: 100.0,
        damping: 20.0,
        mass: 1.0,
    };
    assert!((cfg.damping_ratio() - 1.0).abs() < 1e-9);
    let a = spring_progress(5, fps(), cfg);
    let b = spring_progress(6, fps(), cfg);
    assert!(0.0 < a && a < b && b < 1.0);
}

#[test]
fn identical_inputs_give_identical_bits() {
    for f in [0, 1, 7, 29, 30, 31, 1000] {
        let a = spring_progress(f, fps(), SpringConfig::POP_IN);
        let b = spring_progress(f, fps(), SpringConfig::POP_IN);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn config_validation() {
    assert!(SpringConfig::POP_IN.is_valid());
    assert!(
        !SpringConfig {
            stiffness: 0.0,
            ..SpringConfig::POP_IN
        }
        .is_valid()
    );
    assert!(
        !SpringConfig {
            mass: f64::NAN,
            ..SpringConfig::POP_IN
        }
        .is_valid()
    );
}

#[test]
fn mass_defaults_to_one_in_json() {
    let cfg: SpringConfig = serde_json::from_str(r#"{"stiffness": 50, "damping": 5}"#).unwrap();
    assert_eq!(cfg.mass, 1.0);
}
