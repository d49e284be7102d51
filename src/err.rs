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

use std::error::Error;
use std::fmt::Formatter;

/// Transform operation names reported by [`WaveletError::InvalidState`].
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Operation {
    Forward,
    Backward,
    Inverse,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Forward => f.write_str("forward"),
            Operation::Backward => f.write_str("backward"),
            Operation::Inverse => f.write_str("inverse"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WaveletError {
    /// Operation was invoked before its prerequisite state was reached.
    InvalidState {
        operation: Operation,
        state: crate::TransformState,
    },
    /// Extent along an axis (axis index, extent) is smaller than the filter support
    /// required at the given decomposition level.
    InvalidExtent {
        axis: usize,
        level: usize,
        extent: usize,
        required: usize,
    },
    /// Buffer holds fewer samples than the workload describes.
    BufferTooSmall(usize, usize),
    /// Workload has a zero extent.
    ZeroExtent(usize, usize, usize),
    /// Sample count of the workload does not fit in `usize`.
    ExtentOverflow(usize, usize, usize),
    /// Coefficient container was built for another workload or level count.
    CoeffLayoutMismatch,
    /// A required image or coefficient buffer is missing.
    NullBuffer(&'static str),
    UnsupportedConfiguration(String),
    OutOfMemory(usize),
    /// Device runtime reported a non-success status.
    Device { code: i32, message: String },
}

impl WaveletError {
    /// Returns `true` for every error caused by extents that cannot support the transform.
    pub fn is_invalid_extent(&self) -> bool {
        matches!(
            self,
            WaveletError::InvalidExtent { .. }
                | WaveletError::BufferTooSmall(_, _)
                | WaveletError::ZeroExtent(_, _, _)
                | WaveletError::ExtentOverflow(_, _, _)
                | WaveletError::CoeffLayoutMismatch
        )
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, WaveletError::InvalidState { .. })
    }
}

impl Error for WaveletError {}

impl std::fmt::Display for WaveletError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WaveletError::InvalidState { operation, state } => f.write_fmt(format_args!(
                "Operation {operation} is not allowed in state {state}"
            )),
            WaveletError::InvalidExtent {
                axis,
                level,
                extent,
                required,
            } => f.write_fmt(format_args!(
                "Extent {extent} along axis {axis} at level {level} must be at least {required}"
            )),
            WaveletError::BufferTooSmall(were_length, min_length) => f.write_fmt(format_args!(
                "Buffer should hold at least {min_length} samples, but it was {were_length}"
            )),
            WaveletError::ZeroExtent(nx, ny, nz) => f.write_fmt(format_args!(
                "Workload extents must be non zero, but they were {nx}x{ny}x{nz}"
            )),
            WaveletError::ExtentOverflow(nx, ny, nz) => f.write_fmt(format_args!(
                "Workload {nx}x{ny}x{nz} holds more samples than can be addressed"
            )),
            WaveletError::CoeffLayoutMismatch => {
                f.write_str("Coefficient container does not match workload, levels or tree shape")
            }
            WaveletError::NullBuffer(what) => f.write_fmt(format_args!("{what} is not set")),
            WaveletError::UnsupportedConfiguration(reason) => {
                f.write_fmt(format_args!("Unsupported configuration: {reason}"))
            }
            WaveletError::OutOfMemory(length) => {
                f.write_fmt(format_args!("Cannot allocate vector of {length} elements"))
            }
            WaveletError::Device { code, message } => f.write_fmt(format_args!(
                "Device runtime error {code}: {message}"
            )),
        }
    }
}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::err::WaveletError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;
