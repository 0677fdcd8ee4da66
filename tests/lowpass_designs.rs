use remez_fir_calc::{
    ExchangeSettings, FilterSpec, design_lowpass, design_lowpass_with_settings, error::Error,
    evaluate_response,
};

const RESPONSE_POINTS: usize = 2000;

fn reference_spec() -> FilterSpec {
    FilterSpec::new(8000.0, 1000.0, 200.0, 31).unwrap()
}

// Convert a gain in dB back to linear scale.
fn linear(gain_db: f64) -> f64 {
    10.0f64.powf(gain_db / 20.0)
}

// Check a lowpass response in linear scale against the ripple achieved by
// the design. The relative tolerance absorbs the flatness the exchange stops
// at.
fn check_lowpass_response(spec: &FilterSpec, taps: &[f64], ripple: f64) {
    let tolerance = 1e-2;
    let curve = evaluate_response(taps, RESPONSE_POINTS, spec.sample_rate()).unwrap();
    let stopband_start = spec.cutoff() + spec.transition_width();
    for &(freq, gain_db) in &curve.points {
        let h = linear(gain_db);
        assert!(h <= (1.0 + ripple) * (1.0 + tolerance));
        if freq <= spec.cutoff() {
            assert!(
                (h - 1.0).abs() <= ripple * (1.0 + tolerance),
                "passband deviation at {freq} Hz: {h}"
            );
        } else if freq >= stopband_start {
            assert!(
                h <= ripple * (1.0 + tolerance),
                "stopband leakage at {freq} Hz: {h}"
            );
        }
    }
}

#[test]
fn reference_lowpass() {
    let spec = reference_spec();
    let design = design_lowpass(&spec).unwrap();
    assert_eq!(design.taps.len(), 31);
    // a linear phase lowpass design is symmetric
    for (a, b) in design.taps.iter().zip(design.taps.iter().rev()) {
        assert!((a - b).abs() <= 1e-12);
    }
    assert!(design.weighted_error < 0.15);
    check_lowpass_response(&spec, &design.taps, design.weighted_error);
    // the stopband is meaningfully attenuated in absolute terms too
    let curve = evaluate_response(&design.taps, RESPONSE_POINTS, spec.sample_rate()).unwrap();
    for &(freq, gain_db) in &curve.points {
        if freq >= 1200.0 {
            assert!(gain_db <= -15.0, "at {freq} Hz: {gain_db} dB");
        }
    }
}

#[test]
fn longer_filter_attenuates_more() {
    let spec = FilterSpec::new(8000.0, 1000.0, 400.0, 53).unwrap();
    let design = design_lowpass(&spec).unwrap();
    assert_eq!(design.taps.len(), 53);
    assert!(design.weighted_error < 0.01);
    check_lowpass_response(&spec, &design.taps, design.weighted_error);
    let curve = evaluate_response(&design.taps, RESPONSE_POINTS, spec.sample_rate()).unwrap();
    for &(freq, gain_db) in &curve.points {
        if freq >= 1400.0 {
            assert!(gain_db <= -40.0, "at {freq} Hz: {gain_db} dB");
        }
    }
}

#[test]
fn even_tap_count() {
    let spec = FilterSpec::new(8000.0, 1000.0, 400.0, 32).unwrap();
    let design = design_lowpass(&spec).unwrap();
    assert_eq!(design.taps.len(), 32);
    for (a, b) in design.taps.iter().zip(design.taps.iter().rev()) {
        assert!((a - b).abs() <= 1e-12);
    }
    check_lowpass_response(&spec, &design.taps, design.weighted_error);
}

#[test]
fn response_grid() {
    let design = design_lowpass(&reference_spec()).unwrap();
    let curve = evaluate_response(&design.taps, RESPONSE_POINTS, 8000.0).unwrap();
    assert_eq!(curve.points.len(), RESPONSE_POINTS);
    assert_eq!(curve.points[0].0, 0.0);
    for pair in curve.points.windows(2) {
        assert!(pair[1].0 > pair[0].0);
    }
    assert!(curve.points.last().unwrap().0 < 4000.0);
}

#[test]
fn design_is_deterministic() {
    let spec = reference_spec();
    let first = design_lowpass(&spec).unwrap();
    let second = design_lowpass(&spec).unwrap();
    assert_eq!(first.taps.len(), second.taps.len());
    for (a, b) in first.taps.iter().zip(second.taps.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn single_tap_design() {
    let spec = FilterSpec::new(8000.0, 1000.0, 200.0, 1).unwrap();
    let design = design_lowpass(&spec).unwrap();
    assert_eq!(design.taps, [1.0]);
}

#[test]
fn two_taps_are_too_few() {
    let spec = FilterSpec::new(8000.0, 1000.0, 200.0, 2).unwrap();
    assert!(matches!(
        design_lowpass(&spec),
        Err(Error::TooFewTaps { num_taps: 2 })
    ));
}

#[test]
fn exhausted_iterations_surface_as_error() {
    let mut settings = ExchangeSettings::default();
    settings.set_max_iterations(1);
    assert!(matches!(
        design_lowpass_with_settings(&reference_spec(), &settings),
        Err(Error::DidNotConverge { iterations: 1, .. })
    ));
}
