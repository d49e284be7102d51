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
use crate::coeffs::{Tree, TreeShape};
use crate::err::WaveletError;
use crate::filters::{
    ANTO97_BIORTH, DAUB2, DAUB3, DAUB4, DAUB5, DTW_ANTO97_QSHIFT6, DualTreeFilterBankGroup,
    FilterBankGroup, QSHIFT6_ORTH, REVERSE_QSHIFT6_ORTH,
};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Names of the catalogued wavelet families.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum WaveletFamily {
    Daubechies2,
    Daubechies3,
    Daubechies4,
    Daubechies5,
    Antonini97,
    QShift6,
    ReverseQShift6,
    DualTreeComplex,
}

impl WaveletFamily {
    pub const ALL: [WaveletFamily; 8] = [
        WaveletFamily::Daubechies2,
        WaveletFamily::Daubechies3,
        WaveletFamily::Daubechies4,
        WaveletFamily::Daubechies5,
        WaveletFamily::Antonini97,
        WaveletFamily::QShift6,
        WaveletFamily::ReverseQShift6,
        WaveletFamily::DualTreeComplex,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            WaveletFamily::Daubechies2 => "Daub2",
            WaveletFamily::Daubechies3 => "Daub3",
            WaveletFamily::Daubechies4 => "Daub4",
            WaveletFamily::Daubechies5 => "Daub5",
            WaveletFamily::Antonini97 => "Anto97",
            WaveletFamily::QShift6 => "QShift6",
            WaveletFamily::ReverseQShift6 => "ReverseQShift6",
            WaveletFamily::DualTreeComplex => "DTCWT",
        }
    }

    pub const fn shape(&self) -> TreeShape {
        match self {
            WaveletFamily::DualTreeComplex => TreeShape::DualTree,
            _ => TreeShape::Single,
        }
    }
}

impl Display for WaveletFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveletFamily {
    type Err = WaveletError;

    /// Parses a family name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveletFamily::ALL
            .iter()
            .find(|x| x.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                WaveletError::UnsupportedConfiguration(format!("unknown wavelet family `{s}`"))
            })
    }
}

/// Filters a scheme runs with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FilterScheme {
    Separable(&'static FilterBankGroup),
    DualTree(&'static DualTreeFilterBankGroup),
}

impl FilterScheme {
    pub const fn shape(&self) -> TreeShape {
        match self {
            FilterScheme::Separable(_) => TreeShape::Single,
            FilterScheme::DualTree(_) => TreeShape::DualTree,
        }
    }

    /// Group filtering `tree` at decomposition `level`; dual trees switch groups after
    /// the first level.
    pub fn group(&self, tree: Tree, level: usize) -> &'static FilterBankGroup {
        match *self {
            FilterScheme::Separable(group) => group,
            FilterScheme::DualTree(dual) => match (tree, level) {
                (Tree::Real, 0) => &dual.stage0_real,
                (Tree::Imaginary, 0) => &dual.stage0_imag,
                (Tree::Real, _) => &dual.stagen_real,
                (Tree::Imaginary, _) => &dual.stagen_imag,
            },
        }
    }

    /// Smallest extent an active axis may have when entering `level`.
    pub fn minimal_extent(&self, level: usize) -> usize {
        let max_tap = self
            .shape()
            .tree_iter()
            .map(|tree| self.group(tree, level).max_tap_size())
            .max()
            .unwrap_or(2);
        max_tap.div_ceil(2).max(2)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Compile-time selection of a wavelet family.
///
/// Implemented only by the marker types of this crate.
pub trait WaveletScheme: sealed::Sealed + Send + Sync + 'static {
    const FAMILY: WaveletFamily;
    const FILTERS: FilterScheme;
}

macro_rules! define_scheme {
    ($(#[$meta: meta])* $naming: ident, $family: expr, $filters: expr) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
        pub struct $naming;

        impl sealed::Sealed for $naming {}

        impl WaveletScheme for $naming {
            const FAMILY: WaveletFamily = $family;
            const FILTERS: FilterScheme = $filters;
        }
    };
}

define_scheme!(
    /// Daubechies wavelet with 2 vanishing moments, 4 taps.
    Daubechies2,
    WaveletFamily::Daubechies2,
    FilterScheme::Separable(&DAUB2)
);
define_scheme!(
    Daubechies3,
    WaveletFamily::Daubechies3,
    FilterScheme::Separable(&DAUB3)
);
define_scheme!(
    Daubechies4,
    WaveletFamily::Daubechies4,
    FilterScheme::Separable(&DAUB4)
);
define_scheme!(
    Daubechies5,
    WaveletFamily::Daubechies5,
    FilterScheme::Separable(&DAUB5)
);
define_scheme!(
    /// Antonini (CDF) 9/7 biorthogonal wavelet.
    Antonini97,
    WaveletFamily::Antonini97,
    FilterScheme::Separable(&ANTO97_BIORTH)
);
define_scheme!(
    /// Kingsbury Q-shift orthogonal wavelet, 6 non-zero taps.
    QShift6,
    WaveletFamily::QShift6,
    FilterScheme::Separable(&QSHIFT6_ORTH)
);
define_scheme!(
    ReverseQShift6,
    WaveletFamily::ReverseQShift6,
    FilterScheme::Separable(&REVERSE_QSHIFT6_ORTH)
);
define_scheme!(
    /// Dual-tree complex wavelet: Antonini 9/7 on the first level, Q-shift on the real
    /// tree and time reversed Q-shift on the imaginary tree afterwards.
    DualTreeAnto97QShift6,
    WaveletFamily::DualTreeComplex,
    FilterScheme::DualTree(&DTW_ANTO97_QSHIFT6)
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_names_round_trip() {
        for family in WaveletFamily::ALL.iter() {
            let parsed: WaveletFamily = family.to_string().parse().unwrap();
            assert_eq!(parsed, *family);
        }
        assert_eq!(
            "dtcwt".parse::<WaveletFamily>(),
            Ok(WaveletFamily::DualTreeComplex)
        );
        assert!("Haar".parse::<WaveletFamily>().is_err());
    }

    #[test]
    fn test_scheme_shapes() {
        assert_eq!(Daubechies2::FILTERS.shape(), Daubechies2::FAMILY.shape());
        assert_eq!(
            DualTreeAnto97QShift6::FILTERS.shape(),
            DualTreeAnto97QShift6::FAMILY.shape()
        );
        assert_eq!(QShift6::FILTERS.shape(), TreeShape::Single);
    }

    #[test]
    fn test_dual_tree_stages() {
        let filters = DualTreeAnto97QShift6::FILTERS;
        assert_eq!(filters.group(Tree::Real, 0).name, "Anto97");
        assert_eq!(filters.group(Tree::Imaginary, 0).name, "Anto97");
        assert_eq!(filters.group(Tree::Real, 2).name, "QShift6");
        assert_eq!(filters.group(Tree::Imaginary, 1).name, "ReverseQShift6");
    }

    #[test]
    fn test_minimal_extent() {
        assert_eq!(Daubechies2::FILTERS.minimal_extent(0), 2);
        assert_eq!(Daubechies5::FILTERS.minimal_extent(3), 5);
        assert_eq!(DualTreeAnto97QShift6::FILTERS.minimal_extent(0), 5);
        assert_eq!(DualTreeAnto97QShift6::FILTERS.minimal_extent(2), 4);
    }
}
