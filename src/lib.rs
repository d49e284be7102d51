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
//! Multi level discrete wavelet transforms over 1D, 2D and 3D sample buffers.
//!
//! Separable orthogonal and biorthogonal filter banks are available together with a
//! dual tree complex wavelet transform. Boundaries are always periodic. Decomposition
//! is driven by [`WaveletTransform`], which borrows the caller's samples and owns the
//! resulting [`CoeffContainer`].
//!
//! ```
//! use dwtree::{DualTreeAnto97QShift6, SubbandKind, Tree, WaveletTransform};
//!
//! let mut image: Vec<f64> = (0..256).map(|i| ((i % 16) + 8 * (i / 16)) as f64).collect();
//! let mut transform = WaveletTransform::<f64, DualTreeAnto97QShift6>::new(
//!     &mut image, 16, 16, 1, false, "DTCWT", 3,
//! )
//! .unwrap();
//! transform.forward().unwrap();
//! let coeffs = transform.coeff().unwrap();
//! assert!(coeffs.tree_subband(Tree::Imaginary, 2, SubbandKind::HIGH_HIGH).is_some());
//! transform.inverse().unwrap();
//! ```

use num_traits::{AsPrimitive, MulAdd};
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

mod arena;
#[cfg(all(target_arch = "x86_64", feature = "avx"))]
mod avx;
mod coeffs;
mod convolve;
mod err;
mod factory;
mod family;
mod filters;
mod lanes;
mod mla;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
mod runtime;
mod separable;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
mod sse;
mod transform;
mod workload;

use crate::arena::ArenaFactoryProvider;
use crate::factory::EngineFactory;
pub use coeffs::{Band, CoeffContainer, SubbandKind, Tree, TreeShape};
pub use err::{Operation, WaveletError};
pub use family::{
    Antonini97, Daubechies2, Daubechies3, Daubechies4, Daubechies5, DualTreeAnto97QShift6,
    FilterScheme, QShift6, ReverseQShift6, WaveletFamily, WaveletScheme,
};
pub use filters::{
    ANTO97_BIORTH, DAUB2, DAUB3, DAUB4, DAUB5, DTW_ANTO97_QSHIFT6, DualTreeFilterBankGroup,
    FilterBank, FilterBankGroup, QSHIFT6_ORTH, REVERSE_QSHIFT6_ORTH,
};
pub use runtime::{DeviceRuntime, HostRuntime, STATUS_SUCCESS};
pub use transform::{TransformState, WaveletTransform};
pub use workload::WorkloadDescriptor;

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Element type a transform can run on, implemented for `f32` and `f64`.
pub trait WaveletSample:
    sealed::Sealed
    + EngineFactory<Self>
    + ArenaFactoryProvider<Self>
    + Copy
    + Default
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Neg<Output = Self>
    + MulAdd<Self, Output = Self>
    + AsPrimitive<f64>
{
}

impl WaveletSample for f32 {}
impl WaveletSample for f64 {}
