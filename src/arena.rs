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
use crate::err::WaveletError;

#[allow(unused)]
macro_rules! arena_definition {
    ($naming: ident, $features: literal) => {
        #[target_feature(enable = $features)]
        fn $naming<T: Copy + 'static>(
            data: &[T],
            padded: &mut [T],
            pad_left: usize,
        ) -> Result<(), WaveletError> {
            write_periodic_arena_impl(data, padded, pad_left)
        }
    };
}

#[cfg(all(target_arch = "x86_64", feature = "avx"))]
arena_definition!(write_periodic_arena_avx, "avx2");
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
arena_definition!(write_periodic_arena_sse4_1, "sse4.1");

pub type WriteArenaFn<T> = unsafe fn(&[T], &mut [T], usize) -> Result<(), WaveletError>;

pub trait ArenaFactoryProvider<T: Copy + 'static> {
    fn make_periodic_arena_writer() -> WriteArenaFn<T>;
}

macro_rules! arena_provider {
    ($t: ty) => {
        impl ArenaFactoryProvider<$t> for $t {
            fn make_periodic_arena_writer() -> WriteArenaFn<$t> {
                use std::sync::OnceLock;
                static PERIODIC_ARENA_DISPATCH: OnceLock<WriteArenaFn<$t>> = OnceLock::new();
                *PERIODIC_ARENA_DISPATCH.get_or_init(|| {
                    #[cfg(all(target_arch = "x86_64", feature = "avx"))]
                    {
                        if std::is_x86_feature_detected!("avx2") {
                            return write_periodic_arena_avx::<$t>;
                        }
                    }
                    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
                    {
                        if std::is_x86_feature_detected!("sse4.1") {
                            return write_periodic_arena_sse4_1::<$t>;
                        }
                    }
                    write_periodic_arena_impl::<$t>
                })
            }
        }
    };
}

arena_provider!(f32);
arena_provider!(f64);

/// Fills the whole of `padded` with the periodic extension of `data`, so that
/// `padded[pad_left + i] == data[i]` and every other slot wraps around.
pub(crate) fn write_periodic_arena<T: Copy + 'static + ArenaFactoryProvider<T>>(
    data: &[T],
    padded: &mut [T],
    pad_left: usize,
) -> Result<(), WaveletError> {
    let executor = T::make_periodic_arena_writer();
    unsafe { executor(data, padded, pad_left) }
}

#[inline(always)]
fn write_periodic_arena_impl<T: Copy + 'static>(
    data: &[T],
    padded: &mut [T],
    pad_left: usize,
) -> Result<(), WaveletError> {
    if data.is_empty() {
        return Err(WaveletError::BufferTooSmall(0, 1));
    }
    let n = data.len();
    let mut start = (n - pad_left % n) % n;
    let mut dst = padded;
    while !dst.is_empty() {
        let chunk = (n - start).min(dst.len());
        let (head, tail) = std::mem::take(&mut dst).split_at_mut(chunk);
        head.copy_from_slice(&data[start..start + chunk]);
        dst = tail;
        start = 0;
    }
    Ok(())
}

/// Splits a periodized line into its even and odd phases.
///
/// `line` must have even length; `even` and `odd` receive `line.len() / 2` samples each.
pub(crate) fn deinterleave<T: Copy>(line: &[T], even: &mut [T], odd: &mut [T]) {
    for ((pair, e), o) in line
        .chunks_exact(2)
        .zip(even.iter_mut())
        .zip(odd.iter_mut())
    {
        *e = pair[0];
        *o = pair[1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_arena() {
        let data = [1f32, 2., 3.];
        let mut padded = [0f32; 10];
        write_periodic_arena(&data, &mut padded, 2).unwrap();
        assert_eq!(padded, [2., 3., 1., 2., 3., 1., 2., 3., 1., 2.]);
    }

    #[test]
    fn test_periodic_arena_wraps_more_than_period() {
        let data = [5f64];
        let mut padded = [0f64; 6];
        write_periodic_arena(&data, &mut padded, 4).unwrap();
        assert!(padded.iter().all(|&x| x == 5.));

        let data = [1f64, 2.];
        let mut padded = [0f64; 7];
        write_periodic_arena(&data, &mut padded, 5).unwrap();
        assert_eq!(padded, [2., 1., 2., 1., 2., 1., 2.]);
    }

    #[test]
    fn test_periodic_arena_rejects_empty() {
        let mut padded = [0f32; 4];
        assert!(write_periodic_arena::<f32>(&[], &mut padded, 1).is_err());
    }

    #[test]
    fn test_deinterleave() {
        let line = [0, 1, 2, 3, 4, 5];
        let mut even = [0; 3];
        let mut odd = [0; 3];
        deinterleave(&line, &mut even, &mut odd);
        assert_eq!(even, [0, 2, 4]);
        assert_eq!(odd, [1, 3, 5]);
    }
}
