//! Butterworth lowpass built from second-order sections (biquads), applied
//! forward and backward for zero phase shift.

use crate::error::{FilterError, Result};
use std::f64::consts::PI;

/// Order of the fixed lowpass
pub const LOWPASS_ORDER: usize = 3;

/// Cutoff of the fixed lowpass as a fraction of Nyquist
pub const LOWPASS_CUTOFF: f64 = 0.1;

/// Second-order section coefficients
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Gain at z = 1
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }
}

/// Delay-line state for one section (Direct Form II Transposed)
#[derive(Debug, Clone, Default)]
struct BiquadState {
    z1: f64,
    z2: f64,
}

/// Single biquad section
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    state: BiquadState,
}

impl BiquadFilter {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            state: BiquadState::default(),
        }
    }

    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + self.state.z1;
        self.state.z1 = c.b1 * input - c.a1 * output + self.state.z2;
        self.state.z2 = c.b2 * input - c.a2 * output;
        output
    }

    /// Load the state this section would hold after an infinitely long
    /// constant `input`. Returns the matching constant output.
    fn settle(&mut self, input: f64) -> f64 {
        let c = self.coeffs;
        let output = c.dc_gain() * input;
        self.state.z1 = output - c.b0 * input;
        self.state.z2 = c.b2 * input - c.a2 * output;
        output
    }

    pub fn reset(&mut self) {
        self.state = BiquadState::default();
    }
}

/// Cascaded second-order sections
#[derive(Debug, Clone)]
pub struct SosFilter {
    sections: Vec<BiquadFilter>,
    order: usize,
}

impl SosFilter {
    pub fn new(sections: Vec<BiquadCoeffs>, order: usize) -> Self {
        Self {
            sections: sections.into_iter().map(BiquadFilter::new).collect(),
            order,
        }
    }

    pub fn sections(&self) -> &[BiquadFilter] {
        &self.sections
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Samples reflected onto each end before zero-phase filtering:
    /// three times the length of the transfer-function coefficient vectors.
    pub fn padlen(&self) -> usize {
        3 * (self.order + 1)
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(input, |sample, section| section.process(sample))
    }

    pub fn filter(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&s| self.process(s)).collect()
    }

    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }

    /// Put every section in its steady state for a constant input `level`,
    /// so filtering starts without a transient.
    fn settle(&mut self, level: f64) {
        self.sections
            .iter_mut()
            .fold(level, |sample, section| section.settle(sample));
    }

    /// Zero-phase filtering: odd-reflect the ends, filter forward, then filter
    /// the reversed result again and reverse back.
    pub fn filtfilt(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let padlen = self.padlen();
        if signal.len() <= padlen {
            return Err(FilterError::SignalTooShort {
                len: signal.len(),
                padlen,
            });
        }

        let extended = odd_extend(signal, padlen);

        let mut pass = self.clone();
        pass.settle(extended[0]);
        let mut forward = pass.filter(&extended);
        forward.reverse();

        pass.reset();
        pass.settle(forward[0]);
        let mut backward = pass.filter(&forward);
        backward.reverse();

        Ok(backward[padlen..padlen + signal.len()].to_vec())
    }
}

/// Extend `signal` by `padlen` samples on each side with its point reflection
/// about the end samples. Requires `signal.len() > padlen`.
fn odd_extend(signal: &[f64], padlen: usize) -> Vec<f64> {
    let n = signal.len();
    let (first, last) = (signal[0], signal[n - 1]);

    let mut extended = Vec::with_capacity(n + 2 * padlen);
    extended.extend((1..=padlen).rev().map(|i| 2.0 * first - signal[i]));
    extended.extend_from_slice(signal);
    extended.extend((1..=padlen).map(|i| 2.0 * last - signal[n - 1 - i]));
    extended
}

/// Butterworth filter designer
pub struct ButterworthFilter;

impl ButterworthFilter {
    /// Design a lowpass with `cutoff` given as a fraction of Nyquist (0 < cutoff < 1)
    pub fn lowpass(cutoff: f64, order: usize) -> Result<SosFilter> {
        if !(cutoff > 0.0 && cutoff < 1.0) {
            return Err(FilterError::InvalidParameter(format!(
                "Normalized cutoff must be between 0 and 1 (exclusive), got {}",
                cutoff
            )));
        }
        if order == 0 {
            return Err(FilterError::InvalidParameter(
                "Filter order must be at least 1".to_string(),
            ));
        }

        let wn = Self::prewarp(cutoff);
        Ok(SosFilter::new(Self::design_lowpass(wn, order), order))
    }

    /// Prewarp a Nyquist-normalized frequency for the bilinear transform
    fn prewarp(cutoff: f64) -> f64 {
        (PI * cutoff / 2.0).tan()
    }

    fn design_lowpass(wn: f64, order: usize) -> Vec<BiquadCoeffs> {
        let num_sections = (order + 1) / 2;
        let mut sections = Vec::with_capacity(num_sections);

        for k in 0..num_sections {
            // Odd order: the real pole gets a first-order section, H(s) = wn / (s + wn)
            if order % 2 == 1 && k == num_sections - 1 {
                let gain = wn / (1.0 + wn);
                sections.push(BiquadCoeffs {
                    b0: gain,
                    b1: gain,
                    b2: 0.0,
                    a1: (wn - 1.0) / (wn + 1.0),
                    a2: 0.0,
                });
                continue;
            }

            // Conjugate pole pair: H(s) = wn^2 / (s^2 + 2 sin(theta) wn s + wn^2)
            let theta = PI * (2.0 * k as f64 + 1.0) / (2.0 * order as f64);
            let damping = 2.0 * theta.sin();
            let wn2 = wn * wn;
            let denom = 1.0 + damping * wn + wn2;

            sections.push(BiquadCoeffs {
                b0: wn2 / denom,
                b1: 2.0 * wn2 / denom,
                b2: wn2 / denom,
                a1: 2.0 * (wn2 - 1.0) / denom,
                a2: (1.0 - damping * wn + wn2) / denom,
            });
        }

        sections
    }
}

/// The fixed zero-phase lowpass: order 3, cutoff 0.1 of Nyquist
pub fn lowpass(values: &[f64]) -> Result<Vec<f64>> {
    ButterworthFilter::lowpass(LOWPASS_CUTOFF, LOWPASS_ORDER)?.filtfilt(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly_mul(p: &[f64], q: &[f64]) -> Vec<f64> {
        let mut r = vec![0.0; p.len() + q.len() - 1];
        for (i, x) in p.iter().enumerate() {
            for (j, y) in q.iter().enumerate() {
                r[i + j] += x * y;
            }
        }
        r
    }

    /// Multiply out the sections into transfer-function polynomials
    fn transfer_function(filter: &SosFilter) -> (Vec<f64>, Vec<f64>) {
        filter
            .sections()
            .iter()
            .fold((vec![1.0], vec![1.0]), |(b, a), s| {
                let c = s.coeffs();
                (
                    poly_mul(&b, &[c.b0, c.b1, c.b2]),
                    poly_mul(&a, &[1.0, c.a1, c.a2]),
                )
            })
    }

    #[test]
    fn test_third_order_design_coefficients() {
        let filter = ButterworthFilter::lowpass(0.1, 3).unwrap();
        let (b, a) = transfer_function(&filter);

        let expected_b = [0.00289819463, 0.00869458390, 0.00869458390, 0.00289819463];
        let expected_a = [1.0, -2.37409474371, 1.92935566909, -0.53207536831];
        for (got, want) in b.iter().zip(expected_b.iter()) {
            assert!((got - want).abs() < 1e-9, "b: {:?}", b);
        }
        for (got, want) in a.iter().zip(expected_a.iter()) {
            assert!((got - want).abs() < 1e-9, "a: {:?}", a);
        }
    }

    #[test]
    fn test_unity_dc_gain() {
        let filter = ButterworthFilter::lowpass(0.1, 3).unwrap();
        let gain: f64 = filter
            .sections()
            .iter()
            .map(|s| s.coeffs().dc_gain())
            .product();
        assert!((gain - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_design_parameters() {
        assert!(ButterworthFilter::lowpass(0.0, 3).is_err());
        assert!(ButterworthFilter::lowpass(1.0, 3).is_err());
        assert!(ButterworthFilter::lowpass(0.2, 0).is_err());
    }

    #[test]
    fn test_odd_extend() {
        let ext = odd_extend(&[1.0, 2.0, 4.0, 7.0], 2);
        assert_eq!(ext, vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0]);
    }

    #[test]
    fn test_minimum_length() {
        let filter = ButterworthFilter::lowpass(LOWPASS_CUTOFF, LOWPASS_ORDER).unwrap();
        assert_eq!(filter.padlen(), 12);

        let err = filter.filtfilt(&[1.0; 12]).unwrap_err();
        assert!(matches!(
            err,
            FilterError::SignalTooShort { len: 12, padlen: 12 }
        ));
        assert_eq!(filter.filtfilt(&[1.0; 13]).unwrap().len(), 13);
    }

    #[test]
    fn test_constant_signal_passes_unchanged() {
        let out = lowpass(&[0.8; 20]).unwrap();
        for v in out {
            assert!((v - 0.8).abs() < 1e-9);
        }
    }

    #[test]
    fn test_matches_reference_filtfilt() {
        // filtfilt(*butter(3, 0.1), x) with odd padding and lfilter_zi priming
        let expected = [
            0.011840685365, 0.103584379705, 0.191445018830, 0.273802732633,
            0.349677442275, 0.418839135725, 0.481784293792, 0.539604429816,
            0.593796447960, 0.646088678294, 0.698326320831, 0.752387091814,
            0.810070782162, 0.872936396695, 0.942092309750, 1.017978335886,
            1.100213500910, 1.187563901356, 1.278021781026, 1.368967484466,
        ];
        let signal: Vec<f64> = (0..20usize)
            .map(|i| (i * i % 7) as f64 * 0.1 + i as f64 * 0.05)
            .collect();

        let out = lowpass(&signal).unwrap();
        assert_eq!(out.len(), expected.len());
        for (i, (got, want)) in out.iter().zip(expected.iter()).enumerate() {
            assert!((got - want).abs() < 1e-9, "index {}: {} vs {}", i, got, want);
        }
    }

    #[test]
    fn test_removes_nyquist_oscillation() {
        let signal: Vec<f64> = (0..200)
            .map(|i| 2.0 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        let out = lowpass(&signal).unwrap();
        assert_eq!(out.len(), signal.len());
        for v in &out[40..160] {
            assert!((v - 2.0).abs() < 0.01, "residual ripple {}", v);
        }
    }

    #[test]
    fn test_zero_phase_keeps_peak_position() {
        let signal: Vec<f64> = (0..101)
            .map(|i| {
                let t = (i as f64 - 50.0) / 10.0;
                (-t * t).exp()
            })
            .collect();
        let out = lowpass(&signal).unwrap();
        let peak = out
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 50);
    }
}
