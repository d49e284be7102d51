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
use std::fmt::{Display, Formatter};

/// Logical extents `(nx, ny, nz)` of a sample grid, x varying fastest.
///
/// An axis with extent `1` is inactive: it is never filtered and never splits into
/// low and high bands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WorkloadDescriptor {
    extents: [usize; 3],
}

impl WorkloadDescriptor {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, WaveletError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(WaveletError::ZeroExtent(nx, ny, nz));
        }
        if nx.checked_mul(ny).and_then(|x| x.checked_mul(nz)).is_none() {
            return Err(WaveletError::ExtentOverflow(nx, ny, nz));
        }
        Ok(Self {
            extents: [nx, ny, nz],
        })
    }

    pub fn nx(&self) -> usize {
        self.extents[0]
    }

    pub fn ny(&self) -> usize {
        self.extents[1]
    }

    pub fn nz(&self) -> usize {
        self.extents[2]
    }

    pub fn extents(&self) -> [usize; 3] {
        self.extents
    }

    /// Number of samples, `nx * ny * nz`.
    pub fn len(&self) -> usize {
        self.extents.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_active(&self, axis: usize) -> bool {
        self.extents.get(axis).is_some_and(|&x| x > 1)
    }

    /// Active flag per axis.
    pub(crate) fn active_mask(&self) -> [bool; 3] {
        [self.is_active(0), self.is_active(1), self.is_active(2)]
    }

    /// Number of active axes, the dimensionality of the transform.
    pub fn dimensions(&self) -> usize {
        self.active_mask().iter().filter(|&&x| x).count()
    }

    /// Linear index of `(i, j, k)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.extents[1] + j) * self.extents[0] + i
    }

    /// Extents of the data entering decomposition level `level` (level `0` is the input).
    pub fn level_extents(&self, level: usize) -> [usize; 3] {
        let mut extents = self.extents;
        for _ in 0..level {
            extents = self.halve(extents);
        }
        extents
    }

    /// Extents of every subband produced at `level`.
    pub fn band_extents(&self, level: usize) -> [usize; 3] {
        self.level_extents(level + 1)
    }

    /// Halves every active axis, rounding up.
    pub(crate) fn halve(&self, extents: [usize; 3]) -> [usize; 3] {
        let mask = self.active_mask();
        let mut halved = extents;
        for (dst, active) in halved.iter_mut().zip(mask) {
            if active {
                *dst = dst.div_ceil(2);
            }
        }
        halved
    }
}

impl Display for WorkloadDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}x{}x{}",
            self.extents[0], self.extents[1], self.extents[2]
        ))
    }
}

/// Circularly shifts `src` into `dst` by `shift` samples per active axis:
/// `dst[(p + shift) mod n] = src[p]`.
pub(crate) fn circular_shift<T: Copy>(
    workload: &WorkloadDescriptor,
    src: &[T],
    dst: &mut [T],
    shift: [isize; 3],
) {
    let [nx, ny, nz] = workload.extents();
    let mut offsets = [0usize; 3];
    for (axis, offset) in offsets.iter_mut().enumerate() {
        if workload.is_active(axis) {
            *offset = shift[axis].rem_euclid(workload.extents()[axis] as isize) as usize;
        }
    }
    for k in 0..nz {
        let dk = (k + offsets[2]) % nz;
        for j in 0..ny {
            let dj = (j + offsets[1]) % ny;
            let src_row = &src[workload.index(0, j, k)..workload.index(0, j, k) + nx];
            let dst_start = workload.index(0, dj, dk);
            let dst_row = &mut dst[dst_start..dst_start + nx];
            let (head, tail) = dst_row.split_at_mut(offsets[0]);
            tail.copy_from_slice(&src_row[..nx - offsets[0]]);
            head.copy_from_slice(&src_row[nx - offsets[0]..]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_extent_rejected() {
        assert_eq!(
            WorkloadDescriptor::new(4, 0, 1),
            Err(WaveletError::ZeroExtent(4, 0, 1))
        );
    }

    #[test]
    fn test_overflowing_extents_rejected() {
        let nx = usize::MAX / 2 + 1;
        let result = WorkloadDescriptor::new(nx, 4, 1);
        assert_eq!(result, Err(WaveletError::ExtentOverflow(nx, 4, 1)));
        assert!(result.unwrap_err().is_invalid_extent());
        assert!(WorkloadDescriptor::new(usize::MAX, 1, 1).is_ok());
    }

    #[test]
    fn test_active_axes() {
        let w = WorkloadDescriptor::new(16, 16, 1).unwrap();
        assert_eq!(w.dimensions(), 2);
        assert!(w.is_active(0) && w.is_active(1) && !w.is_active(2));
        assert_eq!(w.len(), 256);
        assert_eq!(w.index(3, 2, 0), 35);
    }

    #[test]
    fn test_level_extents_round_up() {
        let w = WorkloadDescriptor::new(13, 8, 1).unwrap();
        assert_eq!(w.level_extents(0), [13, 8, 1]);
        assert_eq!(w.level_extents(1), [7, 4, 1]);
        assert_eq!(w.band_extents(0), [7, 4, 1]);
        assert_eq!(w.band_extents(1), [4, 2, 1]);
    }

    #[test]
    fn test_circular_shift_round_trip() {
        let w = WorkloadDescriptor::new(5, 3, 2).unwrap();
        let src: Vec<i32> = (0..w.len() as i32).collect();
        let mut shifted = vec![0; w.len()];
        let mut restored = vec![0; w.len()];
        circular_shift(&w, &src, &mut shifted, [2, -1, 3]);
        assert_eq!(shifted[w.index(2, 2, 1)], src[w.index(0, 0, 0)]);
        circular_shift(&w, &shifted, &mut restored, [-2, 1, -3]);
        assert_eq!(src, restored);
    }
}
