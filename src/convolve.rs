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
use crate::WaveletSample;
use crate::err::WaveletError;
use crate::filters::FilterBank;
use crate::lanes::{LaneShifter, SimdLanes};
use crate::mla::fmla;
use num_traits::AsPrimitive;
use std::marker::PhantomData;

/// Upper bound on taps feeding one output stream.
pub(crate) const MAX_TAPS: usize = 16;
/// Upper bound on cached registers per input stream, sized for one lane registers.
pub(crate) const MAX_REGISTERS: usize = 16;
/// Widest register any backend uses, in elements.
pub(crate) const MAX_LANES: usize = 8;

/// One coefficient of a polyphase correlation.
///
/// `offset` is relative to the output index inside the padded arena of `stream`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Tap<T> {
    pub(crate) stream: usize,
    pub(crate) offset: usize,
    pub(crate) coeff: T,
}

/// Filters compiled into a two input, two output unit stride correlation.
///
/// Analysis reads the even and odd phases of the signal and writes low and high
/// coefficients. Synthesis reads low and high coefficients and writes the even and
/// odd output samples. Both directions then become
/// `out[o][j] = sum(coeff * arena[stream][j + offset])` over the taps of `o`.
#[derive(Clone, Debug, PartialEq)]
pub struct TapPlan<T> {
    outputs: [Vec<Tap<T>>; 2],
    pad_left: [usize; 2],
    pad_right: [usize; 2],
}

impl<T: WaveletSample> TapPlan<T>
where
    f64: AsPrimitive<T>,
{
    /// `a[j] = sum_c f[c] * e[2j + c - tap_left]`
    pub(crate) fn analysis(low: &FilterBank, high: &FilterBank) -> Result<Self, WaveletError> {
        let mut outputs: [Vec<(usize, isize, f64)>; 2] = [Vec::new(), Vec::new()];
        for (output, filter) in outputs.iter_mut().zip([low, high]) {
            for (c, &coeff) in filter.coefficients().iter().enumerate() {
                let d = c as isize - filter.tap_left() as isize;
                output.push((d.rem_euclid(2) as usize, d.div_euclid(2), coeff));
            }
        }
        Self::from_shifts(outputs)
    }

    /// `y[2p + q] = sum_c g[c] * up(a)[2p + q + c - tap_left]` for both inverse filters,
    /// only taps landing on a non-zero upsampled sample are kept.
    pub(crate) fn synthesis(low: &FilterBank, high: &FilterBank) -> Result<Self, WaveletError> {
        let mut outputs: [Vec<(usize, isize, f64)>; 2] = [Vec::new(), Vec::new()];
        for (q, output) in outputs.iter_mut().enumerate() {
            for (stream, filter) in [low, high].into_iter().enumerate() {
                let start = if q == 0 {
                    filter.even_subsampling_offset()
                } else {
                    filter.odd_subsampling_offset()
                };
                for c in (start..filter.tap_size()).step_by(2) {
                    let d = q as isize + c as isize - filter.tap_left() as isize;
                    output.push((stream, d.div_euclid(2), filter.coefficients()[c]));
                }
            }
        }
        Self::from_shifts(outputs)
    }

    fn from_shifts(outputs: [Vec<(usize, isize, f64)>; 2]) -> Result<Self, WaveletError> {
        let mut min_shift = [0isize; 2];
        let mut max_shift = [0isize; 2];
        for &(stream, shift, _) in outputs.iter().flatten() {
            min_shift[stream] = min_shift[stream].min(shift);
            max_shift[stream] = max_shift[stream].max(shift);
        }
        let pad_left = min_shift.map(|x| x.unsigned_abs());
        let pad_right = max_shift.map(|x| x as usize);

        let mut compiled: [Vec<Tap<T>>; 2] = [Vec::new(), Vec::new()];
        for (dst, src) in compiled.iter_mut().zip(outputs.iter()) {
            *dst = src
                .iter()
                .filter(|x| x.2 != 0.)
                .map(|&(stream, shift, coeff)| Tap {
                    stream,
                    offset: (shift + pad_left[stream] as isize) as usize,
                    coeff: coeff.as_(),
                })
                .collect();
            if dst.len() > MAX_TAPS {
                return Err(WaveletError::UnsupportedConfiguration(format!(
                    "filter yields {} taps per output, at most {MAX_TAPS} are supported",
                    dst.len()
                )));
            }
        }
        for stream in 0..2 {
            if pad_left[stream] + pad_right[stream] + 2 > MAX_REGISTERS {
                return Err(WaveletError::UnsupportedConfiguration(format!(
                    "filter support {} exceeds register cache",
                    pad_left[stream] + pad_right[stream]
                )));
            }
        }

        Ok(TapPlan {
            outputs: compiled,
            pad_left,
            pad_right,
        })
    }
}

impl<T> TapPlan<T> {
    #[inline]
    pub(crate) fn taps(&self, output: usize) -> &[Tap<T>] {
        &self.outputs[output]
    }

    #[inline]
    pub(crate) fn pad_left(&self, stream: usize) -> usize {
        self.pad_left[stream]
    }

    #[inline]
    pub(crate) fn pad_right(&self, stream: usize) -> usize {
        self.pad_right[stream]
    }

    /// Arena length needed to produce `len` outputs, including the tail every register
    /// load may overrun by.
    #[inline]
    pub(crate) fn arena_length(&self, stream: usize, len: usize) -> usize {
        self.pad_left[stream] + len + self.pad_right[stream] + MAX_LANES
    }

    /// Registers loaded per block so every tap window is one `concat_and_cut` away.
    #[inline]
    pub(crate) fn registers(&self, stream: usize, lanes: usize) -> usize {
        (self.pad_left[stream] + self.pad_right[stream]) / lanes + 2
    }

    pub(crate) fn validate(
        &self,
        streams: [&[T]; 2],
        first: &[T],
        second: &[T],
    ) -> Result<(), WaveletError> {
        if first.len() != second.len() {
            return Err(WaveletError::BufferTooSmall(
                first.len().min(second.len()),
                first.len().max(second.len()),
            ));
        }
        for (stream, arena) in streams.iter().enumerate() {
            let required = self.arena_length(stream, first.len());
            if arena.len() < required {
                return Err(WaveletError::BufferTooSmall(arena.len(), required));
            }
        }
        Ok(())
    }
}

/// Polyphase correlation over padded arenas, vectorized with `V` and finished in scalar.
///
/// # Safety
///
/// The instruction set of `V` must be available and `plan.validate` must have accepted
/// the buffers.
#[inline(always)]
pub(crate) unsafe fn correlate_polyphase<V: LaneShifter>(
    plan: &TapPlan<V::Scalar>,
    streams: [&[V::Scalar]; 2],
    first: &mut [V::Scalar],
    second: &mut [V::Scalar],
) {
    unsafe {
        let lanes = V::LANES;
        let len = first.len();

        let mut coeffs = [[V::zero(); MAX_TAPS]; 2];
        let mut windows = [[(0usize, 0usize, 0usize); MAX_TAPS]; 2];
        for output in 0..2 {
            for (i, tap) in plan.taps(output).iter().enumerate() {
                coeffs[output][i] = V::splat(tap.coeff);
                windows[output][i] = (tap.stream, tap.offset / lanes, tap.offset % lanes);
            }
        }
        let registers = [plan.registers(0, lanes), plan.registers(1, lanes)];
        let mut cache = [[V::zero(); MAX_REGISTERS]; 2];

        let mut x = 0usize;

        while x + lanes <= len {
            for (stream, regs) in cache.iter_mut().enumerate() {
                let src = streams[stream].get_unchecked(x..);
                for (k, reg) in regs.iter_mut().take(registers[stream]).enumerate() {
                    *reg = V::load(src.get_unchecked(k * lanes..).as_ptr());
                }
            }

            let mut acc = [V::zero(); 2];
            for (output, sum) in acc.iter_mut().enumerate() {
                let count = plan.taps(output).len();
                for (&(stream, reg, k), &c) in windows[output]
                    .iter()
                    .zip(coeffs[output].iter())
                    .take(count)
                {
                    let regs = cache.get_unchecked(stream);
                    let window =
                        V::concat_and_cut(*regs.get_unchecked(reg), *regs.get_unchecked(reg + 1), k);
                    *sum = V::mul_add(window, c, *sum);
                }
            }

            acc[0].store(first.get_unchecked_mut(x..).as_mut_ptr());
            acc[1].store(second.get_unchecked_mut(x..).as_mut_ptr());
            x += lanes;
        }

        while x < len {
            for (output, dst) in [&mut *first, &mut *second].into_iter().enumerate() {
                let mut sum = V::Scalar::default();
                for tap in plan.taps(output).iter() {
                    let v = *streams
                        .get_unchecked(tap.stream)
                        .get_unchecked(x + tap.offset);
                    sum = fmla(v, tap.coeff, sum);
                }
                *dst.get_unchecked_mut(x) = sum;
            }
            x += 1;
        }
    }
}

/// Executes compiled [`TapPlan`]s on one instruction set.
pub trait ConvolutionEngine<T>: Send + Sync {
    /// Writes `first.len()` outputs of both plan outputs.
    fn correlate(
        &self,
        plan: &TapPlan<T>,
        streams: [&[T]; 2],
        first: &mut [T],
        second: &mut [T],
    ) -> Result<(), WaveletError>;
    fn lanes(&self) -> usize;
    fn name(&self) -> &'static str;
}

/// Defines a [`ConvolutionEngine`] whose kernel is compiled with `$features` enabled.
macro_rules! engine_definition {
    ($naming: ident, $lanes: ty, $scalar: ty, $features: literal, $label: literal) => {
        pub(crate) struct $naming {}

        impl $naming {
            #[target_feature(enable = $features)]
            fn correlate_impl(
                &self,
                plan: &$crate::convolve::TapPlan<$scalar>,
                streams: [&[$scalar]; 2],
                first: &mut [$scalar],
                second: &mut [$scalar],
            ) {
                unsafe {
                    $crate::convolve::correlate_polyphase::<$lanes>(plan, streams, first, second)
                }
            }
        }

        impl $crate::convolve::ConvolutionEngine<$scalar> for $naming {
            fn correlate(
                &self,
                plan: &$crate::convolve::TapPlan<$scalar>,
                streams: [&[$scalar]; 2],
                first: &mut [$scalar],
                second: &mut [$scalar],
            ) -> Result<(), $crate::err::WaveletError> {
                plan.validate(streams, first, second)?;
                unsafe {
                    self.correlate_impl(plan, streams, first, second);
                }
                Ok(())
            }

            fn lanes(&self) -> usize {
                <$lanes as $crate::lanes::SimdLanes>::LANES
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use engine_definition;

pub(crate) struct ScalarEngine<T> {
    pub(crate) phantom_data: PhantomData<T>,
}

impl<T: WaveletSample + LaneShifter<Scalar = T>> ConvolutionEngine<T> for ScalarEngine<T> {
    fn correlate(
        &self,
        plan: &TapPlan<T>,
        streams: [&[T]; 2],
        first: &mut [T],
        second: &mut [T],
    ) -> Result<(), WaveletError> {
        plan.validate(streams, first, second)?;
        unsafe {
            correlate_polyphase::<T>(plan, streams, first, second);
        }
        Ok(())
    }

    fn lanes(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "scalar"
    }
}
