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
use crate::mla::fmla;

/// Minimal register abstraction the polyphase kernel is written against.
///
/// Every method is `unsafe` because implementations call instruction set intrinsics;
/// callers must guarantee the instruction set is available and that pointers cover
/// [`SimdLanes::LANES`] elements.
pub(crate) trait SimdLanes: Copy {
    type Scalar: WaveletSample;
    const LANES: usize;

    unsafe fn zero() -> Self;
    unsafe fn splat(value: Self::Scalar) -> Self;
    unsafe fn load(ptr: *const Self::Scalar) -> Self;
    unsafe fn store(self, ptr: *mut Self::Scalar);
    /// `a * b + acc`
    unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self;
}

/// Lane level data movement used to build shifted convolution windows.
///
/// Lane `0` is the lowest address. Shift amounts are in lanes, vacated lanes are zero.
pub(crate) trait LaneShifter: SimdLanes {
    /// Moves lanes toward lane `0`: `out[i] = v[i + k]`.
    unsafe fn shift_right(v: Self, k: usize) -> Self;
    /// Moves lanes away from lane `0`: `out[i] = v[i - k]`.
    unsafe fn shift_left(v: Self, k: usize) -> Self;
    /// Window `[left[k..], right[..k]]` of the concatenation `left ++ right`.
    ///
    /// `k == 0` yields `left`, `k == LANES` yields `right`.
    unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self;
}

macro_rules! scalar_lanes {
    ($t: ty) => {
        impl SimdLanes for $t {
            type Scalar = $t;
            const LANES: usize = 1;

            #[inline(always)]
            unsafe fn zero() -> Self {
                0.
            }

            #[inline(always)]
            unsafe fn splat(value: Self::Scalar) -> Self {
                value
            }

            #[inline(always)]
            unsafe fn load(ptr: *const Self::Scalar) -> Self {
                unsafe { ptr.read() }
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut Self::Scalar) {
                unsafe { ptr.write(self) }
            }

            #[inline(always)]
            unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self {
                fmla(a, b, acc)
            }
        }

        impl LaneShifter for $t {
            #[inline(always)]
            unsafe fn shift_right(v: Self, k: usize) -> Self {
                if k == 0 { v } else { 0. }
            }

            #[inline(always)]
            unsafe fn shift_left(v: Self, k: usize) -> Self {
                if k == 0 { v } else { 0. }
            }

            #[inline(always)]
            unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self {
                if k == 0 { left } else { right }
            }
        }
    };
}

scalar_lanes!(f32);
scalar_lanes!(f64);

/// Checks a shifter against plain slice concatenation for every `k` in `0..=LANES`,
/// comparing bit patterns so signed zeros must survive.
#[cfg(test)]
pub(crate) fn assert_lane_shifter<V: LaneShifter>()
where
    f64: num_traits::AsPrimitive<V::Scalar>,
{
    use num_traits::AsPrimitive;

    let lanes = V::LANES;
    let left: Vec<V::Scalar> = (0..lanes).map(|i| (i as f64 + 1.25).as_()).collect();
    let mut right: Vec<V::Scalar> = (0..lanes).map(|i| (-(i as f64) - 3.5).as_()).collect();
    right[0] = (-0f64).as_();

    let bits = |v: &[V::Scalar]| -> Vec<u64> {
        v.iter()
            .map(|&x| {
                let q: f64 = x.as_();
                q.to_bits()
            })
            .collect()
    };

    unsafe {
        let l = V::load(left.as_ptr());
        let r = V::load(right.as_ptr());
        let zero: V::Scalar = 0f64.as_();
        for k in 0..=lanes {
            let mut out = vec![zero; lanes];

            V::concat_and_cut(l, r, k).store(out.as_mut_ptr());
            let expected: Vec<V::Scalar> = left[k..].iter().chain(right[..k].iter()).copied().collect();
            assert_eq!(bits(&out), bits(&expected), "concat_and_cut mismatch at k = {k}");

            V::shift_right(r, k).store(out.as_mut_ptr());
            let expected: Vec<V::Scalar> = right[k..]
                .iter()
                .copied()
                .chain(std::iter::repeat_n(zero, k))
                .collect();
            assert_eq!(bits(&out), bits(&expected), "shift_right mismatch at k = {k}");

            V::shift_left(r, k).store(out.as_mut_ptr());
            let expected: Vec<V::Scalar> = std::iter::repeat_n(zero, k)
                .chain(right[..lanes - k].iter().copied())
                .collect();
            assert_eq!(bits(&out), bits(&expected), "shift_left mismatch at k = {k}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_shifter() {
        assert_lane_shifter::<f32>();
        assert_lane_shifter::<f64>();
    }

    #[test]
    fn test_scalar_mul_add() {
        let r = unsafe { <f64 as SimdLanes>::mul_add(1.5, 2., 0.25) };
        assert!((r - 3.25).abs() < 1e-14, "Expected 3.25, but it was {r}");
    }
}
