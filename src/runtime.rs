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

/// Status code reported by a runtime that has nothing to report.
pub const STATUS_SUCCESS: i32 = 0;

/// Execution runtime a transform reports to after every operation.
///
/// Host execution never fails; accelerator runtimes surface their pending status so that
/// an asynchronous failure is not mistaken for success.
pub trait DeviceRuntime: Send + Sync {
    /// Last status of the runtime, [`STATUS_SUCCESS`] when nothing failed.
    fn status(&self) -> i32;

    fn describe(&self, code: i32) -> String {
        format!("runtime status {code}")
    }

    /// Maps a status code to a result.
    fn check_result(&self, code: i32) -> Result<(), WaveletError> {
        if code == STATUS_SUCCESS {
            Ok(())
        } else {
            Err(WaveletError::Device {
                code,
                message: self.describe(code),
            })
        }
    }
}

/// Runtime of plain CPU execution.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HostRuntime;

impl DeviceRuntime for HostRuntime {
    fn status(&self) -> i32 {
        STATUS_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingRuntime;

    impl DeviceRuntime for FailingRuntime {
        fn status(&self) -> i32 {
            700
        }

        fn describe(&self, code: i32) -> String {
            format!("illegal address ({code})")
        }
    }

    #[test]
    fn test_host_runtime_succeeds() {
        let runtime = HostRuntime;
        assert!(runtime.check_result(runtime.status()).is_ok());
    }

    #[test]
    fn test_failing_runtime_reports_code() {
        let runtime = FailingRuntime;
        assert_eq!(
            runtime.check_result(runtime.status()),
            Err(WaveletError::Device {
                code: 700,
                message: "illegal address (700)".to_string()
            })
        );
    }
}
