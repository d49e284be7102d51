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
use std::arch::x86_64::*;

// `concat_and_cut` over 256 bits is split by k into {0}, {1..half - 1}, {half},
// {half + 1..width - 1} and {width}. The cross lane permute builds [left.hi, right.lo],
// then a per lane byte align finishes the windows that straddle a 128 bit half.

impl SimdLanes for __m256 {
    type Scalar = f32;
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { _mm256_setzero_ps() }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        unsafe { _mm256_set1_ps(value) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { _mm256_loadu_ps(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { _mm256_storeu_ps(ptr, self) }
    }

    #[inline(always)]
    unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self {
        unsafe { _mm256_fmadd_ps(a, b, acc) }
    }
}

impl LaneShifter for __m256 {
    #[inline(always)]
    unsafe fn shift_right(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(v, _mm256_setzero_ps(), k) }
    }

    #[inline(always)]
    unsafe fn shift_left(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(_mm256_setzero_ps(), v, 8usize.saturating_sub(k)) }
    }

    #[inline(always)]
    unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self {
        unsafe {
            match k {
                0 => left,
                4 => _mm256_permute2f128_ps::<0x21>(left, right),
                1..8 => {
                    let mid = _mm256_castps_si256(_mm256_permute2f128_ps::<0x21>(left, right));
                    let l = _mm256_castps_si256(left);
                    let r = _mm256_castps_si256(right);
                    _mm256_castsi256_ps(match k {
                        1 => _mm256_alignr_epi8::<4>(mid, l),
                        2 => _mm256_alignr_epi8::<8>(mid, l),
                        3 => _mm256_alignr_epi8::<12>(mid, l),
                        5 => _mm256_alignr_epi8::<4>(r, mid),
                        6 => _mm256_alignr_epi8::<8>(r, mid),
                        _ => _mm256_alignr_epi8::<12>(r, mid),
                    })
                }
                _ => right,
            }
        }
    }
}

impl SimdLanes for __m256d {
    type Scalar = f64;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { _mm256_setzero_pd() }
    }

    #[inline(always)]
    unsafe fn splat(value: f64) -> Self {
        unsafe { _mm256_set1_pd(value) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        unsafe { _mm256_loadu_pd(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        unsafe { _mm256_storeu_pd(ptr, self) }
    }

    #[inline(always)]
    unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self {
        unsafe { _mm256_fmadd_pd(a, b, acc) }
    }
}

impl LaneShifter for __m256d {
    #[inline(always)]
    unsafe fn shift_right(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(v, _mm256_setzero_pd(), k) }
    }

    #[inline(always)]
    unsafe fn shift_left(v: Self, k: usize) -> Self {
        unsafe { Self::concat_and_cut(_mm256_setzero_pd(), v, 4usize.saturating_sub(k)) }
    }

    #[inline(always)]
    unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self {
        unsafe {
            match k {
                0 => left,
                2 => _mm256_permute2f128_pd::<0x21>(left, right),
                1 | 3 => {
                    let mid = _mm256_castpd_si256(_mm256_permute2f128_pd::<0x21>(left, right));
                    _mm256_castsi256_pd(if k == 1 {
                        _mm256_alignr_epi8::<8>(mid, _mm256_castpd_si256(left))
                    } else {
                        _mm256_alignr_epi8::<8>(_mm256_castpd_si256(right), mid)
                    })
                }
                _ => right,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::has_valid_avx;
    use crate::lanes::assert_lane_shifter;

    #[test]
    fn test_avx_shifter() {
        if !has_valid_avx() {
            return;
        }
        assert_lane_shifter::<__m256>();
        assert_lane_shifter::<__m256d>();
    }
}
