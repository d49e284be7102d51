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
use crate::err::{WaveletError, try_vec};
use crate::workload::WorkloadDescriptor;
use std::fmt::{Display, Formatter};

/// Frequency band along one axis.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Band {
    Low,
    High,
}

/// Subband of one decomposition level, one [`Band`] per axis.
///
/// Inactive axes are always [`Band::Low`]. In the two letter names below the first
/// letter is the x axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubbandKind {
    pub x: Band,
    pub y: Band,
    pub z: Band,
}

impl SubbandKind {
    /// Approximation band in any dimension.
    pub const LOW: SubbandKind = SubbandKind::new(Band::Low, Band::Low, Band::Low);
    /// Detail band of a 1D transform.
    pub const HIGH: SubbandKind = SubbandKind::new(Band::High, Band::Low, Band::Low);
    pub const LOW_LOW: SubbandKind = SubbandKind::LOW;
    pub const LOW_HIGH: SubbandKind = SubbandKind::new(Band::Low, Band::High, Band::Low);
    pub const HIGH_LOW: SubbandKind = SubbandKind::new(Band::High, Band::Low, Band::Low);
    pub const HIGH_HIGH: SubbandKind = SubbandKind::new(Band::High, Band::High, Band::Low);

    pub const fn new(x: Band, y: Band, z: Band) -> Self {
        Self { x, y, z }
    }

    pub fn band(&self, axis: usize) -> Band {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn is_approximation(&self) -> bool {
        *self == SubbandKind::LOW
    }

    /// Bit `a` is set when axis `a` is high pass.
    pub(crate) fn bits(&self) -> usize {
        (0..3)
            .filter(|&axis| self.band(axis) == Band::High)
            .fold(0, |acc, axis| acc | (1 << axis))
    }

    pub(crate) fn from_bits(bits: usize) -> Self {
        let band = |axis: usize| {
            if bits & (1 << axis) != 0 {
                Band::High
            } else {
                Band::Low
            }
        };
        Self::new(band(0), band(1), band(2))
    }
}

impl Display for SubbandKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for axis in 0..3 {
            f.write_str(match self.band(axis) {
                Band::Low => "L",
                Band::High => "H",
            })?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Tree {
    Real,
    Imaginary,
}

impl Tree {
    pub(crate) fn index(&self) -> usize {
        match self {
            Tree::Real => 0,
            Tree::Imaginary => 1,
        }
    }
}

/// Number of filter trees a container holds.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum TreeShape {
    Single,
    DualTree,
}

impl TreeShape {
    pub fn trees(&self) -> usize {
        match self {
            TreeShape::Single => 1,
            TreeShape::DualTree => 2,
        }
    }

    pub(crate) fn tree_iter(&self) -> impl Iterator<Item = Tree> + use<> {
        [Tree::Real, Tree::Imaginary].into_iter().take(self.trees())
    }
}

/// Hierarchical subband storage of a multi level decomposition.
///
/// Level `l` holds `2^D` subbands for `D` active axes, each sized
/// [`WorkloadDescriptor::band_extents`]. The all-low band of every level is kept; the
/// band of the deepest level is the one synthesis starts from.
#[derive(Clone, Debug, PartialEq)]
pub struct CoeffContainer<T> {
    workload: WorkloadDescriptor,
    levels: usize,
    shape: TreeShape,
    kinds: Vec<SubbandKind>,
    bands: Vec<Vec<T>>,
}

impl<T: Copy + Default> CoeffContainer<T> {
    /// Allocates zeroed subbands for `levels` decomposition levels.
    pub fn allocate(
        workload: WorkloadDescriptor,
        levels: usize,
        shape: TreeShape,
    ) -> Result<Self, WaveletError> {
        if levels == 0 {
            return Err(WaveletError::UnsupportedConfiguration(
                "level count must be at least 1".to_string(),
            ));
        }
        let mask = workload.active_mask();
        let kinds: Vec<SubbandKind> = (0..8usize)
            .filter(|bits| (0..3).all(|axis| mask[axis] || bits & (1 << axis) == 0))
            .map(SubbandKind::from_bits)
            .collect();

        let mut bands = Vec::new();
        bands
            .try_reserve_exact(shape.trees() * levels * kinds.len())
            .map_err(|_| WaveletError::OutOfMemory(shape.trees() * levels * kinds.len()))?;
        for _ in 0..shape.trees() {
            for level in 0..levels {
                let size = workload.band_extents(level).iter().product::<usize>();
                for _ in 0..kinds.len() {
                    bands.push(try_vec![T::default(); size]);
                }
            }
        }

        Ok(Self {
            workload,
            levels,
            shape,
            kinds,
            bands,
        })
    }
}

impl<T> CoeffContainer<T> {
    fn slot(&self, tree: Tree, level: usize, kind: SubbandKind) -> Option<usize> {
        if tree.index() >= self.shape.trees() || level >= self.levels {
            return None;
        }
        let position = self.kinds.iter().position(|&x| x == kind)?;
        Some((tree.index() * self.levels + level) * self.kinds.len() + position)
    }

    /// Real tree subband.
    pub fn subband(&self, level: usize, kind: SubbandKind) -> Option<&[T]> {
        self.tree_subband(Tree::Real, level, kind)
    }

    pub fn subband_mut(&mut self, level: usize, kind: SubbandKind) -> Option<&mut [T]> {
        self.tree_subband_mut(Tree::Real, level, kind)
    }

    pub fn tree_subband(&self, tree: Tree, level: usize, kind: SubbandKind) -> Option<&[T]> {
        self.slot(tree, level, kind)
            .map(|slot| self.bands[slot].as_slice())
    }

    pub fn tree_subband_mut(
        &mut self,
        tree: Tree,
        level: usize,
        kind: SubbandKind,
    ) -> Option<&mut [T]> {
        self.slot(tree, level, kind)
            .map(|slot| self.bands[slot].as_mut_slice())
    }

    /// Extents of every subband of `level`.
    pub fn extents(&self, level: usize) -> Option<[usize; 3]> {
        (level < self.levels).then(|| self.workload.band_extents(level))
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn shape(&self) -> TreeShape {
        self.shape
    }

    pub fn workload(&self) -> WorkloadDescriptor {
        self.workload
    }

    /// Subband kinds present at every level, the approximation first.
    pub fn kinds(&self) -> &[SubbandKind] {
        &self.kinds
    }

    /// Deepest all-low band of the real tree.
    pub fn approximation(&self) -> &[T] {
        let slot = (self.levels - 1) * self.kinds.len();
        &self.bands[slot]
    }

    /// Every subband with its tree, level and kind.
    pub fn iter(&self) -> impl Iterator<Item = (Tree, usize, SubbandKind, &[T])> {
        let per_tree = self.levels * self.kinds.len();
        self.bands.iter().enumerate().map(move |(i, band)| {
            let tree = if i / per_tree == 0 {
                Tree::Real
            } else {
                Tree::Imaginary
            };
            let level = (i % per_tree) / self.kinds.len();
            let kind = self.kinds[i % self.kinds.len()];
            (tree, level, kind, band.as_slice())
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Tree, usize, SubbandKind, &mut [T])> {
        let per_tree = self.levels * self.kinds.len();
        let kinds = &self.kinds;
        self.bands.iter_mut().enumerate().map(move |(i, band)| {
            let tree = if i / per_tree == 0 {
                Tree::Real
            } else {
                Tree::Imaginary
            };
            let level = (i % per_tree) / kinds.len();
            (tree, level, kinds[i % kinds.len()], band.as_mut_slice())
        })
    }

    /// All subbands of one level of one tree, in [`CoeffContainer::kinds`] order.
    pub(crate) fn level_bands(&self, tree: Tree, level: usize) -> &[Vec<T>] {
        let start = (tree.index() * self.levels + level) * self.kinds.len();
        &self.bands[start..start + self.kinds.len()]
    }

    pub(crate) fn level_bands_mut(&mut self, tree: Tree, level: usize) -> &mut [Vec<T>] {
        let start = (tree.index() * self.levels + level) * self.kinds.len();
        let count = self.kinds.len();
        &mut self.bands[start..start + count]
    }

    pub(crate) fn is_layout_of(&self, workload: &WorkloadDescriptor, levels: usize) -> bool {
        self.workload == *workload && self.levels == levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_2d() {
        let w = WorkloadDescriptor::new(16, 12, 1).unwrap();
        let c = CoeffContainer::<f32>::allocate(w, 2, TreeShape::Single).unwrap();
        assert_eq!(c.kinds().len(), 4);
        assert_eq!(c.kinds()[0], SubbandKind::LOW_LOW);
        assert_eq!(c.extents(0), Some([8, 6, 1]));
        assert_eq!(c.extents(1), Some([4, 3, 1]));
        assert_eq!(c.extents(2), None);
        assert_eq!(c.subband(1, SubbandKind::HIGH_HIGH).map(|x| x.len()), Some(12));
        assert_eq!(c.approximation().len(), 12);
        assert!(c.iter().all(|(_, _, _, band)| band.iter().all(|&x| x == 0.)));
        assert_eq!(c.iter().count(), 8);
    }

    #[test]
    fn test_inactive_axis_has_no_high_band() {
        let w = WorkloadDescriptor::new(9, 1, 1).unwrap();
        let c = CoeffContainer::<f64>::allocate(w, 1, TreeShape::Single).unwrap();
        assert_eq!(c.kinds(), &[SubbandKind::LOW, SubbandKind::HIGH]);
        assert_eq!(c.subband(0, SubbandKind::HIGH).map(|x| x.len()), Some(5));
        assert!(c.subband(0, SubbandKind::LOW_HIGH).is_none());
    }

    #[test]
    fn test_dual_tree_access() {
        let w = WorkloadDescriptor::new(8, 8, 8).unwrap();
        let mut single = CoeffContainer::<f32>::allocate(w, 1, TreeShape::Single).unwrap();
        assert_eq!(single.kinds().len(), 8);
        assert!(
            single
                .tree_subband_mut(Tree::Imaginary, 0, SubbandKind::LOW)
                .is_none()
        );

        let mut dual = CoeffContainer::<f32>::allocate(w, 1, TreeShape::DualTree).unwrap();
        let kind = SubbandKind::new(Band::High, Band::Low, Band::High);
        dual.tree_subband_mut(Tree::Imaginary, 0, kind).unwrap()[3] = 2.;
        assert_eq!(dual.tree_subband(Tree::Real, 0, kind).unwrap()[3], 0.);
        let found: Vec<_> = dual
            .iter()
            .filter(|(_, _, _, band)| band.contains(&2.))
            .map(|(tree, level, kind, _)| (tree, level, kind))
            .collect();
        assert_eq!(found, vec![(Tree::Imaginary, 0, kind)]);
    }

    #[test]
    fn test_zero_levels_rejected() {
        let w = WorkloadDescriptor::new(8, 1, 1).unwrap();
        assert!(CoeffContainer::<f32>::allocate(w, 0, TreeShape::Single).is_err());
    }

    #[test]
    fn test_subband_kind_display() {
        assert_eq!(SubbandKind::HIGH_LOW.to_string(), "HLL");
        assert_eq!(SubbandKind::from_bits(SubbandKind::LOW_HIGH.bits()), SubbandKind::LOW_HIGH);
    }
}
