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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// Byte shifts keep the result bit exact, OR merges the two halves without touching signs.

#[allow(unused_unsafe)]
impl SimdLanes for __m128 {
    type Scalar = f32;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { _mm_setzero_ps() }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        unsafe { _mm_set1_ps(value) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { _mm_loadu_ps(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { _mm_storeu_ps(ptr, self) }
    }

    #[inline(always)]
    unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self {
        unsafe { _mm_add_ps(_mm_mul_ps(a, b), acc) }
    }
}

#[allow(unused_unsafe)]
impl LaneShifter for __m128 {
    #[inline(always)]
    unsafe fn shift_right(v: Self, k: usize) -> Self {
        unsafe {
            let v = _mm_castps_si128(v);
            _mm_castsi128_ps(match k {
                0 => v,
                1 => _mm_srli_si128::<4>(v),
                2 => _mm_srli_si128::<8>(v),
                3 => _mm_srli_si128::<12>(v),
                _ => _mm_setzero_si128(),
            })
        }
    }

    #[inline(always)]
    unsafe fn shift_left(v: Self, k: usize) -> Self {
        unsafe {
            let v = _mm_castps_si128(v);
            _mm_castsi128_ps(match k {
                0 => v,
                1 => _mm_slli_si128::<4>(v),
                2 => _mm_slli_si128::<8>(v),
                3 => _mm_slli_si128::<12>(v),
                _ => _mm_setzero_si128(),
            })
        }
    }

    #[inline(always)]
    unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self {
        unsafe {
            match k {
                0 => left,
                1..4 => _mm_or_ps(Self::shift_right(left, k), Self::shift_left(right, 4 - k)),
                _ => right,
            }
        }
    }
}

#[allow(unused_unsafe)]
impl SimdLanes for __m128d {
    type Scalar = f64;
    const LANES: usize = 2;

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { _mm_setzero_pd() }
    }

    #[inline(always)]
    unsafe fn splat(value: f64) -> Self {
        unsafe { _mm_set1_pd(value) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        unsafe { _mm_loadu_pd(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f64) {
        unsafe { _mm_storeu_pd(ptr, self) }
    }

    #[inline(always)]
    unsafe fn mul_add(a: Self, b: Self, acc: Self) -> Self {
        unsafe { _mm_add_pd(_mm_mul_pd(a, b), acc) }
    }
}

#[allow(unused_unsafe)]
impl LaneShifter for __m128d {
    #[inline(always)]
    unsafe fn shift_right(v: Self, k: usize) -> Self {
        unsafe {
            let v = _mm_castpd_si128(v);
            _mm_castsi128_pd(match k {
                0 => v,
                1 => _mm_srli_si128::<8>(v),
                _ => _mm_setzero_si128(),
            })
        }
    }

    #[inline(always)]
    unsafe fn shift_left(v: Self, k: usize) -> Self {
        unsafe {
            let v = _mm_castpd_si128(v);
            _mm_castsi128_pd(match k {
                0 => v,
                1 => _mm_slli_si128::<8>(v),
                _ => _mm_setzero_si128(),
            })
        }
    }

    #[inline(always)]
    unsafe fn concat_and_cut(left: Self, right: Self, k: usize) -> Self {
        unsafe {
            match k {
                0 => left,
                1 => _mm_or_pd(Self::shift_right(left, 1), Self::shift_left(right, 1)),
                _ => right,
            }
        }
    }
}
