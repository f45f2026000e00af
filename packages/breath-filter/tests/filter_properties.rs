use breath_filter::{apply_filter, normalize, process_payload, FilterKind, FilterParams};
use serde_json::json;

const ALL_KINDS: [FilterKind; 4] = [
    FilterKind::None,
    FilterKind::MovingAverage,
    FilterKind::Lowpass,
    FilterKind::Adaptive,
];

/// A breathing-like RMS trace: slow oscillation plus a bit of jitter
fn breathing_trace(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 * 0.1;
            0.5 + 0.3 * (t * 1.2).sin() + 0.05 * ((i * 7919) % 13) as f64 / 13.0
        })
        .collect()
}

// =============================================================================
// LENGTH INVARIANT
// =============================================================================

#[test]
fn test_output_length_matches_input_for_every_kind() {
    for len in [13, 14, 50, 257] {
        let input = breathing_trace(len);
        for kind in ALL_KINDS {
            for window in [1, 3, 5, 21, 400] {
                let out = apply_filter(&input, kind, window).unwrap();
                assert_eq!(out.len(), input.len(), "{} window {}", kind, window);
            }
        }
    }
}

#[test]
fn test_short_inputs_keep_length_except_lowpass() {
    for len in 1..13 {
        let input = breathing_trace(len);
        for kind in [FilterKind::None, FilterKind::MovingAverage, FilterKind::Adaptive] {
            assert_eq!(apply_filter(&input, kind, 5).unwrap().len(), len);
        }
        assert!(apply_filter(&input, FilterKind::Lowpass, 5).is_err());
    }
}

// =============================================================================
// SELECTION
// =============================================================================

#[test]
fn test_unrecognized_filter_is_identity() {
    let input = breathing_trace(30);
    let kind = FilterKind::from_selector(Some("kalman"));
    assert_eq!(apply_filter(&input, kind, 5).unwrap(), input);
}

#[test]
fn test_moving_average_window_beyond_length_is_identity() {
    let input = breathing_trace(9);
    assert_eq!(
        apply_filter(&input, FilterKind::MovingAverage, 10).unwrap(),
        input
    );
}

#[test]
fn test_adaptive_seed_is_exact() {
    let input = breathing_trace(25);
    let out = apply_filter(&input, FilterKind::Adaptive, 5).unwrap();
    assert_eq!(out[0], input[0]);
}

// =============================================================================
// CONSTANT INPUT IS A FIXED POINT
// =============================================================================

#[test]
fn test_constant_five_samples() {
    let payload = json!({
        "timestamps": [0, 1, 2, 3, 4],
        "rms_values": [1, 1, 1, 1, 1]
    });
    for kind in [FilterKind::None, FilterKind::MovingAverage, FilterKind::Adaptive] {
        let (_, output) = process_payload(&payload, &FilterParams::new(kind, 5)).unwrap();
        assert_eq!(output.filtered_values, vec![1.0; 5], "{}", kind);
    }
}

#[test]
fn test_constant_long_enough_for_lowpass() {
    let input = vec![1.0; 16];
    let out = apply_filter(&input, FilterKind::Lowpass, 5).unwrap();
    for v in out {
        assert!((v - 1.0).abs() < 1e-9);
    }
}

// =============================================================================
// SMOOTHING ACTUALLY SMOOTHS
// =============================================================================

fn roughness(values: &[f64]) -> f64 {
    values.windows(2).map(|w| (w[1] - w[0]).abs()).sum()
}

#[test]
fn test_filters_reduce_roughness() {
    let noisy: Vec<f64> = breathing_trace(120)
        .iter()
        .enumerate()
        .map(|(i, v)| v + if i % 2 == 0 { 0.1 } else { -0.1 })
        .collect();

    for kind in [FilterKind::MovingAverage, FilterKind::Lowpass, FilterKind::Adaptive] {
        let out = apply_filter(&noisy, kind, 5).unwrap();
        assert!(
            roughness(&out) < roughness(&noisy),
            "{} did not smooth",
            kind
        );
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

#[test]
fn test_both_shapes_filter_identically() {
    let direct = json!({
        "timestamps": [0.0, 0.1, 0.2, 0.3],
        "rms_values": [0.2, 0.9, 0.1, 0.4]
    });
    let keyed = json!({
        "keys": ["timestamps", "rms_values"],
        "values": [[0.0, 0.1, 0.2, 0.3], [0.2, 0.9, 0.1, 0.4]]
    });
    let params = FilterParams::new(FilterKind::Adaptive, 5);
    assert_eq!(
        process_payload(&direct, &params).unwrap().1,
        process_payload(&keyed, &params).unwrap().1
    );
}

#[test]
fn test_empty_sequences_are_input_errors() {
    let payloads = [
        json!({"timestamps": [], "rms_values": []}),
        json!({"keys": ["timestamps", "rms_values"], "values": [[], []]}),
        json!({"keys": [], "values": []}),
        json!({"unrelated": true}),
    ];
    for payload in payloads {
        let err = normalize(&payload).unwrap_err();
        assert!(err.is_input_error(), "{}", payload);
    }
}
