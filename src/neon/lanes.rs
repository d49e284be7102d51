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
use crate::lanes::{LaneShifter, SimdLanes};
use std::arch::aarch64::*;

#[allow(unused_unsafe)]
impl SimdLanes for float32x4_t {
    type Scalar = f32;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { vdupq_n_f32(0.) }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        unsafe { vdupq_n_f32(value) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { vld1q_f32(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { vst1q_f32(ptr, self) }
    }

    #[inline(always)]
    unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self {
        unsafe { vfmaq_f32(acc, a, b) }
    }
}

#[allow(unused_unsafe)]
impl LaneShifter for float32x4_t {
    #[inline(always)]
    unsafe fn shift_right(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(v, vdupq_n_f32(0.), k) }
    }

    #[inline(always)]
    unsafe fn shift_left(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(vdupq_n_f32(0.), v, 4usize.saturating_sub(k)) }
    }

    #[inline(always)]
    unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self {
        unsafe {
            match k {
                0 => left,
                1 => vextq_f32::<1>(left, right),
                2 => vextq_f32::<2>(left, right),
                3 => vextq_f32::<3>(left, right),
                _ => right,
            }
        }
    }
}

#[allow(unused_unsafe)]
impl SimdLanes for float64x2_t {
    type Scalar = f64;
    const LANES: usize = 2;

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { vdupq_n_f64(0.) }
    }

    #[inline(always)]
    unsafe fn splat(value: f64) -> Self {
        unsafe { vdupq_n_f64(value) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        unsafe { vld1q_f64(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        unsafe { vst1q_f64(ptr, self) }
    }

    #[inline(always)]
    unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self {
        unsafe { vfmaq_f64(acc, a, b) }
    }
}

#[allow(unused_unsafe)]
impl LaneShifter for float64x2_t {
    #[inline(always)]
    unsafe fn shift_right(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(v, vdupq_n_f64(0.), k) }
    }

    #[inline(always)]
    unsafe fn shift_left(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(vdupq_n_f64(0.), v, 2usize.saturating_sub(k)) }
    }

    #[inline(always)]
    unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self {
        unsafe {
            match k {
                0 => left,
                1 => vextq_f64::<1>(left, right),
                _ => right,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::assert_lane_shifter;

    #[test]
    fn test_neon_shifter() {
        assert_lane_shifter::<float32x4_t>();
        assert_lane_shifter::<float64x2_t>();
    }
}
