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
use crate::arena::{deinterleave, write_periodic_arena};
use crate::coeffs::{CoeffContainer, SubbandKind, Tree};
use crate::convolve::{ConvolutionEngine, TapPlan};
use crate::err::{WaveletError, try_vec};
use crate::family::FilterScheme;
use crate::filters::FilterBankGroup;
use num_traits::AsPrimitive;

/// Analysis and synthesis plans of one filter group.
pub(crate) struct LevelPlans<T> {
    pub(crate) analysis: TapPlan<T>,
    pub(crate) synthesis: TapPlan<T>,
}

impl<T: WaveletSample> LevelPlans<T>
where
    f64: AsPrimitive<T>,
{
    fn new(group: &FilterBankGroup) -> Result<Self, WaveletError> {
        Ok(Self {
            analysis: TapPlan::analysis(&group.forward_low, &group.forward_high)?,
            synthesis: TapPlan::synthesis(&group.inverse_low, &group.inverse_high)?,
        })
    }
}

/// Plans of every tree, for the first level and for all deeper levels.
pub(crate) struct SchemePlans<T> {
    trees: Vec<[LevelPlans<T>; 2]>,
}

impl<T: WaveletSample> SchemePlans<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new(filters: &FilterScheme) -> Result<Self, WaveletError> {
        let trees = filters
            .shape()
            .tree_iter()
            .map(|tree| {
                Ok([
                    LevelPlans::new(filters.group(tree, 0))?,
                    LevelPlans::new(filters.group(tree, 1))?,
                ])
            })
            .collect::<Result<Vec<_>, WaveletError>>()?;
        Ok(Self { trees })
    }
}

impl<T> SchemePlans<T> {
    fn level(&self, tree: Tree, level: usize) -> &LevelPlans<T> {
        &self.trees[tree.index()][level.min(1)]
    }
}

/// Runs separable multi level transforms axis by axis through one engine.
pub(crate) struct SeparableExecutor<T> {
    engine: Box<dyn ConvolutionEngine<T> + Send + Sync>,
}

/// Extents of the block holding low and high halves side by side along active axes.
fn interleaved_dims(extents: [usize; 3], active: [bool; 3]) -> [usize; 3] {
    let mut dims = extents;
    for (dst, is_active) in dims.iter_mut().zip(active) {
        if is_active {
            *dst = 2 * dst.div_ceil(2);
        }
    }
    dims
}

/// Offsets and extents of `kind` inside a block of `dims`.
fn band_block(dims: [usize; 3], active: [bool; 3], kind: SubbandKind) -> ([usize; 3], [usize; 3]) {
    let mut offsets = [0usize; 3];
    let mut half = dims;
    for axis in 0..3 {
        if active[axis] {
            half[axis] = dims[axis] / 2;
            if kind.band(axis) == crate::coeffs::Band::High {
                offsets[axis] = half[axis];
            }
        }
    }
    (offsets, half)
}

impl<T: WaveletSample> SeparableExecutor<T>
where
    f64: AsPrimitive<T>,
{
    pub(crate) fn new() -> Self {
        Self {
            engine: T::make_engine(),
        }
    }

    pub(crate) fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Filters every line of `src` along `axis`, writing low coefficients to the first
    /// half and high coefficients to the second half of that axis.
    fn analysis_pass(
        &self,
        plan: &TapPlan<T>,
        src: &[T],
        dims: [usize; 3],
        axis: usize,
    ) -> Result<(Vec<T>, [usize; 3]), WaveletError> {
        let n = dims[axis];
        let m = n.div_ceil(2);
        let mut out_dims = dims;
        out_dims[axis] = 2 * m;
        let inner: usize = dims[..axis].iter().product();
        let outer: usize = dims[axis + 1..].iter().product();

        let mut dst = try_vec![T::default(); out_dims.iter().product()];
        let mut line = try_vec![T::default(); 2 * m];
        let mut phases = [try_vec![T::default(); m], try_vec![T::default(); m]];
        let mut arenas = [
            try_vec![T::default(); plan.arena_length(0, m)],
            try_vec![T::default(); plan.arena_length(1, m)],
        ];
        let mut low = try_vec![T::default(); m];
        let mut high = try_vec![T::default(); m];

        for o in 0..outer {
            for i in 0..inner {
                let src_base = o * n * inner + i;
                for (t, v) in line.iter_mut().take(n).enumerate() {
                    *v = src[src_base + t * inner];
                }
                // odd lines repeat their last sample
                if n != 2 * m {
                    line[n] = line[n - 1];
                }
                let [even, odd] = &mut phases;
                deinterleave(&line, even, odd);
                for (stream, arena) in arenas.iter_mut().enumerate() {
                    write_periodic_arena(&phases[stream], arena, plan.pad_left(stream))?;
                }
                self.engine
                    .correlate(plan, [&arenas[0], &arenas[1]], &mut low, &mut high)?;

                let dst_base = o * 2 * m * inner + i;
                for (t, (&l, &h)) in low.iter().zip(high.iter()).enumerate() {
                    dst[dst_base + t * inner] = l;
                    dst[dst_base + (m + t) * inner] = h;
                }
            }
        }
        Ok((dst, out_dims))
    }

    /// Inverse of [`Self::analysis_pass`], cropping the axis back to `n`.
    fn synthesis_pass(
        &self,
        plan: &TapPlan<T>,
        src: &[T],
        dims: [usize; 3],
        axis: usize,
        n: usize,
    ) -> Result<(Vec<T>, [usize; 3]), WaveletError> {
        let m = dims[axis] / 2;
        let mut out_dims = dims;
        out_dims[axis] = n;
        let inner: usize = dims[..axis].iter().product();
        let outer: usize = dims[axis + 1..].iter().product();

        let mut dst = try_vec![T::default(); out_dims.iter().product()];
        let mut bands = [try_vec![T::default(); m], try_vec![T::default(); m]];
        let mut arenas = [
            try_vec![T::default(); plan.arena_length(0, m)],
            try_vec![T::default(); plan.arena_length(1, m)],
        ];
        let mut even = try_vec![T::default(); m];
        let mut odd = try_vec![T::default(); m];

        for o in 0..outer {
            for i in 0..inner {
                let src_base = o * 2 * m * inner + i;
                let [low, high] = &mut bands;
                for (t, (l, h)) in low.iter_mut().zip(high.iter_mut()).enumerate() {
                    *l = src[src_base + t * inner];
                    *h = src[src_base + (m + t) * inner];
                }
                for (stream, arena) in arenas.iter_mut().enumerate() {
                    write_periodic_arena(&bands[stream], arena, plan.pad_left(stream))?;
                }
                self.engine
                    .correlate(plan, [&arenas[0], &arenas[1]], &mut even, &mut odd)?;

                let dst_base = o * n * inner + i;
                for x in 0..n {
                    dst[dst_base + x * inner] = if x % 2 == 0 {
                        even[x / 2]
                    } else {
                        odd[x / 2]
                    };
                }
            }
        }
        Ok((dst, out_dims))
    }

    /// One decomposition level of `input` (shaped `extents`) into `bands`, ordered as `kinds`.
    fn decompose_level(
        &self,
        plan: &TapPlan<T>,
        input: &[T],
        extents: [usize; 3],
        active: [bool; 3],
        kinds: &[SubbandKind],
        bands: &mut [Vec<T>],
    ) -> Result<(), WaveletError> {
        let mut owned: Option<Vec<T>> = None;
        let mut dims = extents;
        for axis in (0..3).filter(|&axis| active[axis]) {
            let src = owned.as_deref().unwrap_or(input);
            let (next, next_dims) = self.analysis_pass(plan, src, dims, axis)?;
            owned = Some(next);
            dims = next_dims;
        }
        let block = owned.as_deref().unwrap_or(input);

        for (&kind, band) in kinds.iter().zip(bands.iter_mut()) {
            let (offsets, half) = band_block(dims, active, kind);
            if band.len() != half.iter().product::<usize>() {
                return Err(WaveletError::CoeffLayoutMismatch);
            }
            for k in 0..half[2] {
                for j in 0..half[1] {
                    let src_row = ((k + offsets[2]) * dims[1] + j + offsets[1]) * dims[0] + offsets[0];
                    let dst_row = (k * half[1] + j) * half[0];
                    band[dst_row..dst_row + half[0]]
                        .copy_from_slice(&block[src_row..src_row + half[0]]);
                }
            }
        }
        Ok(())
    }

    /// One synthesis level producing data shaped `extents`; `approximation` replaces the
    /// all-low band stored in `bands`.
    fn reconstruct_level(
        &self,
        plan: &TapPlan<T>,
        approximation: &[T],
        bands: &[Vec<T>],
        kinds: &[SubbandKind],
        extents: [usize; 3],
        active: [bool; 3],
    ) -> Result<Vec<T>, WaveletError> {
        let mut dims = interleaved_dims(extents, active);
        let mut block = try_vec![T::default(); dims.iter().product()];

        for (&kind, band) in kinds.iter().zip(bands.iter()) {
            let band = if kind.is_approximation() {
                approximation
            } else {
                band.as_slice()
            };
            let (offsets, half) = band_block(dims, active, kind);
            if band.len() != half.iter().product::<usize>() {
                return Err(WaveletError::CoeffLayoutMismatch);
            }
            for k in 0..half[2] {
                for j in 0..half[1] {
                    let dst_row = ((k + offsets[2]) * dims[1] + j + offsets[1]) * dims[0] + offsets[0];
                    let src_row = (k * half[1] + j) * half[0];
                    block[dst_row..dst_row + half[0]]
                        .copy_from_slice(&band[src_row..src_row + half[0]]);
                }
            }
        }

        for axis in (0..3).rev().filter(|&axis| active[axis]) {
            let (next, next_dims) = self.synthesis_pass(plan, &block, dims, axis, extents[axis])?;
            block = next;
            dims = next_dims;
        }
        Ok(block)
    }

    /// Decomposes `input` into every level of `tree`.
    pub(crate) fn decompose_tree(
        &self,
        plans: &SchemePlans<T>,
        tree: Tree,
        input: &[T],
        coeffs: &mut CoeffContainer<T>,
    ) -> Result<(), WaveletError> {
        let workload = coeffs.workload();
        let active = workload.active_mask();
        let kinds = coeffs.kinds().to_vec();
        let mut owned: Option<Vec<T>> = None;

        for level in 0..coeffs.levels() {
            let extents = workload.level_extents(level);
            log::trace!(
                "{tree:?} tree analysis level {level}, extents {}x{}x{}",
                extents[0],
                extents[1],
                extents[2]
            );
            let src = owned.take();
            let bands = coeffs.level_bands_mut(tree, level);
            self.decompose_level(
                &plans.level(tree, level).analysis,
                src.as_deref().unwrap_or(input),
                extents,
                active,
                &kinds,
                bands,
            )?;
            let approximation = &bands[0];
            let mut next = try_vec![T::default(); approximation.len()];
            next.copy_from_slice(approximation);
            owned = Some(next);
        }
        Ok(())
    }

    /// Reconstructs the samples of `tree` from its deepest approximation and all details.
    pub(crate) fn reconstruct_tree(
        &self,
        plans: &SchemePlans<T>,
        tree: Tree,
        coeffs: &CoeffContainer<T>,
    ) -> Result<Vec<T>, WaveletError> {
        let workload = coeffs.workload();
        let active = workload.active_mask();
        let deepest = coeffs.levels() - 1;
        let mut current: Option<Vec<T>> = None;

        for level in (0..coeffs.levels()).rev() {
            let extents = workload.level_extents(level);
            log::trace!(
                "{tree:?} tree synthesis level {level}, extents {}x{}x{}",
                extents[0],
                extents[1],
                extents[2]
            );
            let bands = coeffs.level_bands(tree, level);
            let approximation = match current.as_deref() {
                Some(approximation) => approximation,
                None => &coeffs.level_bands(tree, deepest)[0],
            };
            let next = self.reconstruct_level(
                &plans.level(tree, level).synthesis,
                approximation,
                bands,
                coeffs.kinds(),
                extents,
                active,
            )?;
            current = Some(next);
        }
        current.ok_or(WaveletError::NullBuffer("coefficients"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeffs::TreeShape;
    use crate::family::{Daubechies2, DualTreeAnto97QShift6, WaveletScheme};
    use crate::workload::WorkloadDescriptor;

    #[test]
    fn test_constant_signal_has_no_detail() {
        let workload = WorkloadDescriptor::new(12, 6, 1).unwrap();
        let plans = SchemePlans::<f64>::new(&Daubechies2::FILTERS).unwrap();
        let executor = SeparableExecutor::<f64>::new();
        let mut coeffs = CoeffContainer::allocate(workload, 1, TreeShape::Single).unwrap();
        let input = vec![3f64; workload.len()];
        executor
            .decompose_tree(&plans, Tree::Real, &input, &mut coeffs)
            .unwrap();
        for (_, _, kind, band) in coeffs.iter() {
            let expected = if kind.is_approximation() { 6. } else { 0. };
            for &v in band.iter() {
                assert!(
                    (v - expected).abs() < 1e-12,
                    "{kind} expected {expected}, but it was {v}"
                );
            }
        }
    }

    #[test]
    fn test_odd_extents_round_trip() {
        let workload = WorkloadDescriptor::new(7, 5, 3).unwrap();
        let plans = SchemePlans::<f64>::new(&Daubechies2::FILTERS).unwrap();
        let executor = SeparableExecutor::<f64>::new();
        let mut coeffs = CoeffContainer::allocate(workload, 1, TreeShape::Single).unwrap();
        let input: Vec<f64> = (0..workload.len())
            .map(|i| ((i * 37) % 11) as f64 - 4.)
            .collect();
        executor
            .decompose_tree(&plans, Tree::Real, &input, &mut coeffs)
            .unwrap();
        assert_eq!(coeffs.extents(0), Some([4, 3, 2]));
        let restored = executor
            .reconstruct_tree(&plans, Tree::Real, &coeffs)
            .unwrap();
        for (i, (a, b)) in input.iter().zip(restored.iter()).enumerate() {
            assert!((a - b).abs() < 1e-10, "at {i}: expected {a}, but it was {b}");
        }
    }

    #[test]
    fn test_dual_tree_trees_round_trip_independently() {
        let workload = WorkloadDescriptor::new(32, 1, 1).unwrap();
        let plans = SchemePlans::<f64>::new(&DualTreeAnto97QShift6::FILTERS).unwrap();
        let executor = SeparableExecutor::<f64>::new();
        let mut coeffs = CoeffContainer::allocate(workload, 3, TreeShape::DualTree).unwrap();
        let input: Vec<f64> = (0..32).map(|i| (i as f64 * 0.3).sin()).collect();
        for tree in [Tree::Real, Tree::Imaginary] {
            executor
                .decompose_tree(&plans, tree, &input, &mut coeffs)
                .unwrap();
        }
        assert_ne!(
            coeffs.tree_subband(Tree::Real, 1, SubbandKind::HIGH),
            coeffs.tree_subband(Tree::Imaginary, 1, SubbandKind::HIGH)
        );
        for tree in [Tree::Real, Tree::Imaginary] {
            let restored = executor.reconstruct_tree(&plans, tree, &coeffs).unwrap();
            for (i, (a, b)) in input.iter().zip(restored.iter()).enumerate() {
                assert!((a - b).abs() < 1e-6, "{tree:?} at {i}: expected {a}, but it was {b}");
            }
        }
    }
}
