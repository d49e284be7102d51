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
use crate::convolve::ConvolutionEngine;
#[allow(unused_imports)]
use crate::convolve::ScalarEngine;
#[allow(unused_imports)]
use std::marker::PhantomData;

#[inline]
#[cfg(all(target_arch = "x86_64", feature = "avx"))]
pub(crate) fn has_valid_avx() -> bool {
    std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")
}

#[inline]
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
pub(crate) fn has_valid_sse() -> bool {
    std::arch::is_x86_feature_detected!("sse2")
}

pub trait EngineFactory<T> {
    /// Picks the widest engine the running CPU supports among the compiled backends.
    fn make_engine() -> Box<dyn ConvolutionEngine<T> + Send + Sync>;
}

fn announce<T>(
    engine: Box<dyn ConvolutionEngine<T> + Send + Sync>,
) -> Box<dyn ConvolutionEngine<T> + Send + Sync> {
    log::debug!(
        "polyphase engine {} selected, {} lanes",
        engine.name(),
        engine.lanes()
    );
    engine
}

impl EngineFactory<f32> for f32 {
    fn make_engine() -> Box<dyn ConvolutionEngine<f32> + Send + Sync> {
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        {
            use crate::neon::NeonEngineF32;
            announce(Box::new(NeonEngineF32 {}))
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if has_valid_avx() {
                use crate::avx::AvxEngineF32;
                return announce(Box::new(AvxEngineF32 {}));
            }
        }
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        {
            if has_valid_sse() {
                use crate::sse::SseEngineF32;
                return announce(Box::new(SseEngineF32 {}));
            }
        }
        #[cfg(not(all(target_arch = "aarch64", feature = "neon")))]
        {
            announce(Box::new(ScalarEngine::<f32> {
                phantom_data: PhantomData,
            }))
        }
    }
}

impl EngineFactory<f64> for f64 {
    fn make_engine() -> Box<dyn ConvolutionEngine<f64> + Send + Sync> {
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        {
            use crate::neon::NeonEngineF64;
            announce(Box::new(NeonEngineF64 {}))
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if has_valid_avx() {
                use crate::avx::AvxEngineF64;
                return announce(Box::new(AvxEngineF64 {}));
            }
        }
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        {
            if has_valid_sse() {
                use crate::sse::SseEngineF64;
                return announce(Box::new(SseEngineF64 {}));
            }
        }
        #[cfg(not(all(target_arch = "aarch64", feature = "neon")))]
        {
            announce(Box::new(ScalarEngine::<f64> {
                phantom_data: PhantomData,
            }))
        }
    }
}
