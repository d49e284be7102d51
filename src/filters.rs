/*
 * // Copyright (c) Radzivon Bartoshyk 10/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
#![allow(clippy::excessive_precision)]

/// Immutable filter with its tap geometry.
///
/// `tap_left` and `tap_right` count the coefficients on each side of the reference tap,
/// excluding the reference tap itself. Coefficients are applied as a correlation window
/// starting `tap_left` samples before the reference sample.
///
/// Filters can only be built through the `const fn` [`FilterBank::new`], so a table whose
/// length disagrees with its geometry fails to compile when it is declared as a constant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FilterBank {
    tap_left: usize,
    tap_right: usize,
    coefficients: &'static [f64],
}

impl FilterBank {
    pub const fn new(tap_left: usize, tap_right: usize, coefficients: &'static [f64]) -> Self {
        assert!(
            coefficients.len() == tap_left + tap_right + 1,
            "filter coefficient count must equal tap_left + tap_right + 1"
        );
        Self {
            tap_left,
            tap_right,
            coefficients,
        }
    }

    #[inline]
    pub const fn tap_left(&self) -> usize {
        self.tap_left
    }

    #[inline]
    pub const fn tap_right(&self) -> usize {
        self.tap_right
    }

    /// Total number of coefficients, the reference tap included.
    #[inline]
    pub const fn tap_size(&self) -> usize {
        self.tap_left + self.tap_right + 1
    }

    /// Reach to the left of an even output when convolving with upsampled input.
    #[inline]
    pub const fn tap_half_size_left(&self) -> usize {
        self.tap_left / 2
    }

    /// Reach to the right of an even output when convolving with upsampled input.
    #[inline]
    pub const fn tap_half_size_right(&self) -> usize {
        self.tap_right / 2
    }

    /// Reach to the left of an odd output when convolving with upsampled input.
    #[inline]
    pub const fn tap_half_floor_size_left(&self) -> usize {
        self.tap_left.saturating_sub(1) / 2
    }

    /// Reach to the right of an odd output when convolving with upsampled input.
    #[inline]
    pub const fn tap_half_ceil_size_right(&self) -> usize {
        self.tap_right.div_ceil(2)
    }

    /// First coefficient index that lands on a non-zero sample for even outputs.
    #[inline]
    pub const fn even_subsampling_offset(&self) -> usize {
        self.tap_left & 1
    }

    /// First coefficient index that lands on a non-zero sample for odd outputs.
    #[inline]
    pub const fn odd_subsampling_offset(&self) -> usize {
        1 - (self.tap_left & 1)
    }

    /// How many registers of `lanes` elements are needed to hold one filter support.
    #[inline]
    pub const fn vectors_per_filter(&self, lanes: usize) -> usize {
        self.tap_size().div_ceil(lanes)
    }

    #[inline]
    pub const fn coefficients(&self) -> &'static [f64] {
        self.coefficients
    }

    pub fn sum(&self) -> f64 {
        self.coefficients.iter().sum()
    }
}

/// Analysis and synthesis filters forming one perfect reconstruction system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FilterBankGroup {
    pub name: &'static str,
    pub forward_low: FilterBank,
    pub forward_high: FilterBank,
    pub inverse_low: FilterBank,
    pub inverse_high: FilterBank,
}

impl FilterBankGroup {
    /// Largest tap size among the four filters.
    pub const fn max_tap_size(&self) -> usize {
        let mut max = self.forward_low.tap_size();
        let sizes = [
            self.forward_high.tap_size(),
            self.inverse_low.tap_size(),
            self.inverse_high.tap_size(),
        ];
        let mut i = 0;
        while i < sizes.len() {
            if sizes[i] > max {
                max = sizes[i];
            }
            i += 1;
        }
        max
    }
}

/// Filter groups of a dual-tree complex wavelet transform.
///
/// The first decomposition level uses the stage 0 groups, all further levels use the
/// stage n groups. Real and imaginary trees are run independently.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DualTreeFilterBankGroup {
    pub name: &'static str,
    pub stage0_real: FilterBankGroup,
    pub stage0_imag: FilterBankGroup,
    pub stagen_real: FilterBankGroup,
    pub stagen_imag: FilterBankGroup,
}

impl DualTreeFilterBankGroup {
    pub const fn max_tap_size(&self) -> usize {
        let sizes = [
            self.stage0_real.max_tap_size(),
            self.stage0_imag.max_tap_size(),
            self.stagen_real.max_tap_size(),
            self.stagen_imag.max_tap_size(),
        ];
        let mut max = 0;
        let mut i = 0;
        while i < sizes.len() {
            if sizes[i] > max {
                max = sizes[i];
            }
            i += 1;
        }
        max
    }
}

// Daubechies, coefficients from http://wavelets.pybytes.com

const DB2_L: [f64; 4] = [
    -0.12940952255092145,
    0.22414386804185735,
    0.836516303737469,
    0.48296291314469025,
];
const DB2_H: [f64; 4] = [
    -0.48296291314469025,
    0.836516303737469,
    -0.22414386804185735,
    -0.12940952255092145,
];
const DB2_I_L: [f64; 4] = [
    0.48296291314469025,
    0.836516303737469,
    0.22414386804185735,
    -0.12940952255092145,
];
const DB2_I_H: [f64; 4] = [
    -0.12940952255092145,
    -0.22414386804185735,
    0.836516303737469,
    -0.48296291314469025,
];

pub const DAUB2: FilterBankGroup = FilterBankGroup {
    name: "Daub2",
    forward_low: FilterBank::new(1, 2, &DB2_L),
    forward_high: FilterBank::new(1, 2, &DB2_H),
    inverse_low: FilterBank::new(2, 1, &DB2_I_L),
    inverse_high: FilterBank::new(2, 1, &DB2_I_H),
};

const DB3_L: [f64; 6] = [
    0.035226291882100656,
    -0.08544127388224149,
    -0.13501102001039084,
    0.4598775021193313,
    0.8068915093133388,
    0.3326705529509569,
];
const DB3_H: [f64; 6] = [
    -0.3326705529509569,
    0.8068915093133388,
    -0.4598775021193313,
    -0.13501102001039084,
    0.08544127388224149,
    0.035226291882100656,
];
const DB3_I_L: [f64; 6] = [
    0.3326705529509569,
    0.8068915093133388,
    0.4598775021193313,
    -0.13501102001039084,
    -0.08544127388224149,
    0.035226291882100656,
];
const DB3_I_H: [f64; 6] = [
    0.035226291882100656,
    0.08544127388224149,
    -0.13501102001039084,
    -0.4598775021193313,
    0.8068915093133388,
    -0.3326705529509569,
];

pub const DAUB3: FilterBankGroup = FilterBankGroup {
    name: "Daub3",
    forward_low: FilterBank::new(2, 3, &DB3_L),
    forward_high: FilterBank::new(2, 3, &DB3_H),
    inverse_low: FilterBank::new(3, 2, &DB3_I_L),
    inverse_high: FilterBank::new(3, 2, &DB3_I_H),
};

const DB4_L: [f64; 8] = [
    -0.010597401784997278,
    0.032883011666982945,
    0.030841381835986965,
    -0.18703481171888114,
    -0.02798376941698385,
    0.6308807679295904,
    0.7148465705525415,
    0.23037781330885523,
];
const DB4_H: [f64; 8] = [
    -0.23037781330885523,
    0.7148465705525415,
    -0.6308807679295904,
    -0.02798376941698385,
    0.18703481171888114,
    0.030841381835986965,
    -0.032883011666982945,
    -0.010597401784997278,
];
const DB4_I_L: [f64; 8] = [
    0.23037781330885523,
    0.7148465705525415,
    0.6308807679295904,
    -0.02798376941698385,
    -0.18703481171888114,
    0.030841381835986965,
    0.032883011666982945,
    -0.010597401784997278,
];
const DB4_I_H: [f64; 8] = [
    -0.010597401784997278,
    -0.032883011666982945,
    0.030841381835986965,
    0.18703481171888114,
    -0.02798376941698385,
    -0.6308807679295904,
    0.7148465705525415,
    -0.23037781330885523,
];

pub const DAUB4: FilterBankGroup = FilterBankGroup {
    name: "Daub4",
    forward_low: FilterBank::new(3, 4, &DB4_L),
    forward_high: FilterBank::new(3, 4, &DB4_H),
    inverse_low: FilterBank::new(4, 3, &DB4_I_L),
    inverse_high: FilterBank::new(4, 3, &DB4_I_H),
};

const DB5_L: [f64; 10] = [
    0.003335725285001549,
    -0.012580751999015526,
    -0.006241490213011705,
    0.07757149384006515,
    -0.03224486958502952,
    -0.24229488706619015,
    0.13842814590110342,
    0.7243085284385744,
    0.6038292697974729,
    0.160102397974125,
];
const DB5_H: [f64; 10] = [
    -0.160102397974125,
    0.6038292697974729,
    -0.7243085284385744,
    0.13842814590110342,
    0.24229488706619015,
    -0.03224486958502952,
    -0.07757149384006515,
    -0.006241490213011705,
    0.012580751999015526,
    0.003335725285001549,
];
const DB5_I_L: [f64; 10] = [
    0.160102397974125,
    0.6038292697974729,
    0.7243085284385744,
    0.13842814590110342,
    -0.24229488706619015,
    -0.03224486958502952,
    0.07757149384006515,
    -0.006241490213011705,
    -0.012580751999015526,
    0.003335725285001549,
];
const DB5_I_H: [f64; 10] = [
    0.003335725285001549,
    0.012580751999015526,
    -0.006241490213011705,
    -0.07757149384006515,
    -0.03224486958502952,
    0.24229488706619015,
    0.13842814590110342,
    -0.7243085284385744,
    0.6038292697974729,
    -0.160102397974125,
];

pub const DAUB5: FilterBankGroup = FilterBankGroup {
    name: "Daub5",
    forward_low: FilterBank::new(4, 5, &DB5_L),
    forward_high: FilterBank::new(4, 5, &DB5_H),
    inverse_low: FilterBank::new(5, 4, &DB5_I_L),
    inverse_high: FilterBank::new(5, 4, &DB5_I_H),
};

// Antonini 9/7, scaled so the analysis low pass sums to sqrt(2)

const ANTO9_L: [f64; 9] = [
    0.03782845550726404,
    -0.023849465019556843,
    -0.11062440441843718,
    0.37740285561283066,
    0.8526986790088938,
    0.37740285561283066,
    -0.11062440441843718,
    -0.023849465019556843,
    0.03782845550726404,
];
const ANTO7_H: [f64; 7] = [
    0.06453888262869706,
    -0.04068941760916406,
    -0.41809227322161724,
    0.7884856164055829,
    -0.41809227322161724,
    -0.04068941760916406,
    0.06453888262869706,
];
const ANTO7_I_L: [f64; 7] = [
    -0.06453888262869706,
    -0.04068941760916406,
    0.41809227322161724,
    0.7884856164055829,
    0.41809227322161724,
    -0.04068941760916406,
    -0.06453888262869706,
];
const ANTO9_I_H: [f64; 9] = [
    0.03782845550726404,
    0.023849465019556843,
    -0.11062440441843718,
    -0.37740285561283066,
    0.8526986790088938,
    -0.37740285561283066,
    -0.11062440441843718,
    0.023849465019556843,
    0.03782845550726404,
];

pub const ANTO97_BIORTH: FilterBankGroup = FilterBankGroup {
    name: "Anto97",
    forward_low: FilterBank::new(4, 4, &ANTO9_L),
    forward_high: FilterBank::new(2, 4, &ANTO7_H),
    inverse_low: FilterBank::new(3, 3, &ANTO7_I_L),
    inverse_high: FilterBank::new(5, 3, &ANTO9_I_H),
};

// Kingsbury Q-shift, 6 non-zero taps padded to 8

const QSHIFT6_L: [f64; 8] = [
    0.03516384, 0.0, -0.08832942, 0.23389032, 0.76027237, 0.58751830, 0.0, -0.11430184,
];
const QSHIFT6_H: [f64; 8] = [
    -0.11430184,
    0.0,
    0.58751830,
    -0.76027237,
    0.23389032,
    0.08832942,
    0.0,
    -0.03516384,
];
const QSHIFT6_I_L: [f64; 8] = [
    -0.11430184,
    0.0,
    0.58751830,
    0.76027237,
    0.23389032,
    -0.08832942,
    0.0,
    0.03516384,
];
const QSHIFT6_I_H: [f64; 8] = [
    -0.03516384,
    0.0,
    0.08832942,
    0.23389032,
    -0.76027237,
    0.58751830,
    0.0,
    -0.11430184,
];

pub const QSHIFT6_ORTH: FilterBankGroup = FilterBankGroup {
    name: "QShift6",
    forward_low: FilterBank::new(4, 3, &QSHIFT6_L),
    forward_high: FilterBank::new(2, 5, &QSHIFT6_H),
    inverse_low: FilterBank::new(3, 4, &QSHIFT6_I_L),
    inverse_high: FilterBank::new(5, 2, &QSHIFT6_I_H),
};

/// Time reversed Q-shift, analysis and synthesis tables swap roles.
pub const REVERSE_QSHIFT6_ORTH: FilterBankGroup = FilterBankGroup {
    name: "ReverseQShift6",
    forward_low: FilterBank::new(2, 5, &QSHIFT6_I_L),
    forward_high: FilterBank::new(4, 3, &QSHIFT6_I_H),
    inverse_low: FilterBank::new(5, 2, &QSHIFT6_L),
    inverse_high: FilterBank::new(3, 4, &QSHIFT6_H),
};

pub const DTW_ANTO97_QSHIFT6: DualTreeFilterBankGroup = DualTreeFilterBankGroup {
    name: "DTCWT",
    stage0_real: ANTO97_BIORTH,
    stage0_imag: ANTO97_BIORTH,
    stagen_real: QSHIFT6_ORTH,
    stagen_imag: REVERSE_QSHIFT6_ORTH,
};

#[cfg(test)]
mod tests {
    use super::*;

    const SEPARABLE: [FilterBankGroup; 7] = [
        DAUB2,
        DAUB3,
        DAUB4,
        DAUB5,
        ANTO97_BIORTH,
        QSHIFT6_ORTH,
        REVERSE_QSHIFT6_ORTH,
    ];

    #[test]
    fn test_low_pass_sums_to_sqrt2() {
        for group in SEPARABLE.iter() {
            // Q-shift tables are published with 8 decimals
            let tolerance = if group.name.contains("QShift") {
                1e-7
            } else {
                1e-12
            };
            let sum = group.forward_low.sum();
            assert!(
                (sum - std::f64::consts::SQRT_2).abs() < tolerance,
                "{} low pass sum expected to be sqrt(2), but it was {}",
                group.name,
                sum
            );
        }
    }

    #[test]
    fn test_high_pass_sums_to_zero() {
        for group in SEPARABLE.iter() {
            let sum = group.forward_high.sum();
            assert!(
                sum.abs() < 1e-7,
                "{} high pass sum expected to be 0, but it was {}",
                group.name,
                sum
            );
        }
    }

    #[test]
    fn test_geometry() {
        let filter = ANTO97_BIORTH.inverse_high;
        assert_eq!(filter.tap_size(), 9);
        assert_eq!(filter.tap_half_size_left(), 2);
        assert_eq!(filter.tap_half_size_right(), 1);
        assert_eq!(filter.tap_half_floor_size_left(), 2);
        assert_eq!(filter.tap_half_ceil_size_right(), 2);
        assert_eq!(filter.even_subsampling_offset(), 1);
        assert_eq!(filter.odd_subsampling_offset(), 0);
        assert_eq!(filter.vectors_per_filter(4), 3);
        assert_eq!(filter.vectors_per_filter(8), 2);
        assert_eq!(DAUB5.max_tap_size(), 10);
        assert_eq!(DTW_ANTO97_QSHIFT6.max_tap_size(), 9);
    }

    #[test]
    fn test_orthogonal_inverse_is_time_reversed() {
        for group in [DAUB2, DAUB3, DAUB4, DAUB5, QSHIFT6_ORTH].iter() {
            let forward = group.forward_low.coefficients();
            let inverse = group.inverse_low.coefficients();
            for (a, b) in forward.iter().zip(inverse.iter().rev()) {
                assert_eq!(a, b, "{} inverse low pass is not reversed", group.name);
            }
            assert_eq!(group.forward_low.tap_left(), group.inverse_low.tap_right());
        }
    }

    #[test]
    fn test_double_shift_orthogonality() {
        // sum_k h[k] h[k + 2j] = delta(j)
        for group in [DAUB2, DAUB3, DAUB4, DAUB5].iter() {
            let h = group.forward_low.coefficients();
            for shift in (0..h.len()).step_by(2) {
                let mut acc = 0f64;
                for k in 0..h.len() - shift {
                    acc += h[k] * h[k + shift];
                }
                let expected = if shift == 0 { 1. } else { 0. };
                assert!(
                    (acc - expected).abs() < 1e-10,
                    "{} shift {} expected {}, but it was {}",
                    group.name,
                    shift,
                    expected,
                    acc
                );
            }
        }
    }
}
