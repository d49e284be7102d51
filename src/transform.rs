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
use crate::coeffs::CoeffContainer;
use crate::err::{Operation, WaveletError, try_vec};
use crate::family::{WaveletFamily, WaveletScheme};
use crate::runtime::{DeviceRuntime, HostRuntime};
use crate::separable::{SchemePlans, SeparableExecutor};
use crate::workload::{WorkloadDescriptor, circular_shift};
use num_traits::AsPrimitive;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

/// Lifecycle of a [`WaveletTransform`].
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum TransformState {
    /// No sample buffer is attached.
    Uninitialized,
    /// A sample buffer is attached and no coefficients are held.
    HasImage,
    /// Coefficients are available, from [`WaveletTransform::forward`] or
    /// [`WaveletTransform::set_coeff`].
    Decomposed,
    /// The sample buffer holds a reconstruction.
    Reconstructed,
}

impl Display for TransformState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TransformState::Uninitialized => "uninitialized",
            TransformState::HasImage => "has image",
            TransformState::Decomposed => "decomposed",
            TransformState::Reconstructed => "reconstructed",
        })
    }
}

/// Multi level wavelet transform over a borrowed sample buffer.
///
/// The family is chosen by `S`; the element type by `T`. The transform borrows the
/// caller's samples for `'a` and owns its [`CoeffContainer`].
///
/// # Example
///
/// ```
/// use dwtree::{Daubechies2, WaveletTransform};
///
/// let mut samples: Vec<f32> = (0..64).map(|i| (i % 8) as f32).collect();
/// let mut transform =
///     WaveletTransform::<f32, Daubechies2>::new(&mut samples, 8, 8, 1, false, "Daub2", 2)
///         .unwrap();
/// transform.forward().unwrap();
/// transform.inverse().unwrap();
/// ```
pub struct WaveletTransform<'a, T, S> {
    image: Option<&'a mut [T]>,
    workload: WorkloadDescriptor,
    levels: usize,
    cycle_spinning: bool,
    shift: [isize; 3],
    name: String,
    coeffs: Option<CoeffContainer<T>>,
    runtime: Box<dyn DeviceRuntime>,
    state: TransformState,
    executor: SeparableExecutor<T>,
    plans: SchemePlans<T>,
    scheme: PhantomData<S>,
}

impl<'a, T: WaveletSample, S: WaveletScheme> WaveletTransform<'a, T, S>
where
    f64: AsPrimitive<T>,
{
    /// Creates a transform over `image` shaped `nx * ny * nz`.
    ///
    /// `family_name` must name the family of `S`.
    pub fn new(
        image: &'a mut [T],
        nx: usize,
        ny: usize,
        nz: usize,
        cycle_spinning: bool,
        family_name: &str,
        levels: usize,
    ) -> Result<Self, WaveletError> {
        let workload = WorkloadDescriptor::new(nx, ny, nz)?;
        let mut transform = Self::without_image(workload, cycle_spinning, family_name, levels)?;
        transform.set_image(image)?;
        Ok(transform)
    }

    /// Creates a transform with no sample buffer attached yet.
    pub fn without_image(
        workload: WorkloadDescriptor,
        cycle_spinning: bool,
        family_name: &str,
        levels: usize,
    ) -> Result<Self, WaveletError> {
        let family: WaveletFamily = family_name.parse()?;
        if family != S::FAMILY {
            return Err(WaveletError::UnsupportedConfiguration(format!(
                "family name `{family_name}` does not match the {} filters",
                S::FAMILY
            )));
        }
        if levels == 0 {
            return Err(WaveletError::UnsupportedConfiguration(
                "level count must be at least 1".to_string(),
            ));
        }
        Self::validate_extents(&workload, levels)?;

        let executor = SeparableExecutor::new();
        log::debug!(
            "{} transform over {workload}, {levels} levels, cycle spinning {cycle_spinning}, engine {}",
            S::FAMILY,
            executor.engine_name()
        );

        Ok(Self {
            image: None,
            workload,
            levels,
            cycle_spinning,
            shift: [0; 3],
            name: family_name.to_string(),
            coeffs: None,
            runtime: Box::new(HostRuntime),
            state: TransformState::Uninitialized,
            executor,
            plans: SchemePlans::new(&S::FILTERS)?,
            scheme: PhantomData,
        })
    }

    /// Replaces the runtime consulted after every operation.
    pub fn with_runtime<R: DeviceRuntime + 'static>(mut self, runtime: R) -> Self {
        self.runtime = Box::new(runtime);
        self
    }

    /// Every active axis must stay at least half the largest tap size, and never below 2,
    /// at the input of every level.
    fn validate_extents(workload: &WorkloadDescriptor, levels: usize) -> Result<(), WaveletError> {
        if workload.dimensions() == 0 {
            return Err(WaveletError::InvalidExtent {
                axis: 0,
                level: 0,
                extent: workload.nx(),
                required: S::FILTERS.minimal_extent(0),
            });
        }
        for level in 0..levels {
            let extents = workload.level_extents(level);
            let required = S::FILTERS.minimal_extent(level);
            for (axis, &extent) in extents.iter().enumerate() {
                if workload.is_active(axis) && extent < required {
                    return Err(WaveletError::InvalidExtent {
                        axis,
                        level,
                        extent,
                        required,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_runtime(&self) -> Result<(), WaveletError> {
        self.runtime.check_result(self.runtime.status())
    }

    /// Attaches a new sample buffer; stale coefficients are dropped.
    pub fn set_image(&mut self, image: &'a mut [T]) -> Result<(), WaveletError> {
        if image.is_empty() {
            return Err(WaveletError::NullBuffer("image"));
        }
        if image.len() < self.workload.len() {
            return Err(WaveletError::BufferTooSmall(image.len(), self.workload.len()));
        }
        self.image = Some(image);
        self.coeffs = None;
        self.state = TransformState::HasImage;
        Ok(())
    }

    /// Hands a caller built container to the transform, releasing the previous one.
    pub fn set_coeff(&mut self, coeffs: CoeffContainer<T>) -> Result<(), WaveletError> {
        if coeffs.shape() != S::FILTERS.shape() {
            return Err(WaveletError::UnsupportedConfiguration(format!(
                "{:?} container cannot hold {} coefficients",
                coeffs.shape(),
                S::FAMILY
            )));
        }
        if !coeffs.is_layout_of(&self.workload, self.levels) {
            return Err(WaveletError::CoeffLayoutMismatch);
        }
        self.coeffs = Some(coeffs);
        self.state = TransformState::Decomposed;
        Ok(())
    }

    /// Decomposes the attached samples into all levels.
    ///
    /// With cycle spinning the samples are shifted into a working copy first; the
    /// attached buffer is never written.
    pub fn forward(&mut self) -> Result<(), WaveletError> {
        let Some(image) = self.image.as_deref() else {
            return Err(WaveletError::InvalidState {
                operation: Operation::Forward,
                state: self.state,
            });
        };
        Self::validate_extents(&self.workload, self.levels)?;
        log::debug!(
            "forward {} over {}, {} levels, shift {:?}",
            S::FAMILY,
            self.workload,
            self.levels,
            self.cycle_shift()
        );

        let len = self.workload.len();
        let mut working = try_vec![T::default(); len];
        if self.cycle_spinning {
            circular_shift(&self.workload, &image[..len], &mut working, self.shift);
        } else {
            working.copy_from_slice(&image[..len]);
        }

        let decomposed = match self.coeffs.take() {
            Some(coeffs) if coeffs.is_layout_of(&self.workload, self.levels) => Ok(coeffs),
            _ => CoeffContainer::allocate(self.workload, self.levels, S::FILTERS.shape()),
        }
        .and_then(|mut coeffs| {
            for tree in S::FILTERS.shape().tree_iter() {
                self.executor
                    .decompose_tree(&self.plans, tree, &working, &mut coeffs)?;
            }
            Ok(coeffs)
        });
        self.store_decomposition(decomposed)?;
        self.check_runtime()
    }

    /// A failed decomposition leaves no coefficients behind, so the transform falls back
    /// to [`TransformState::HasImage`].
    fn store_decomposition(
        &mut self,
        decomposed: Result<CoeffContainer<T>, WaveletError>,
    ) -> Result<(), WaveletError> {
        match decomposed {
            Ok(coeffs) => {
                self.coeffs = Some(coeffs);
                self.state = TransformState::Decomposed;
                Ok(())
            }
            Err(err) => {
                self.coeffs = None;
                self.state = TransformState::HasImage;
                Err(err)
            }
        }
    }

    /// Synthesis of all trees, averaged for dual trees.
    fn synthesize(&self, operation: Operation) -> Result<Vec<T>, WaveletError> {
        if !matches!(
            self.state,
            TransformState::Decomposed | TransformState::Reconstructed
        ) {
            return Err(WaveletError::InvalidState {
                operation,
                state: self.state,
            });
        }
        if self.image.is_none() {
            return Err(WaveletError::NullBuffer("image"));
        }
        let coeffs = self
            .coeffs
            .as_ref()
            .ok_or(WaveletError::NullBuffer("coefficients"))?;
        log::debug!(
            "{operation} {} over {}, {} levels",
            S::FAMILY,
            self.workload,
            self.levels
        );

        let shape = S::FILTERS.shape();
        let mut reconstruction: Option<Vec<T>> = None;
        for tree in shape.tree_iter() {
            let samples = self.executor.reconstruct_tree(&self.plans, tree, coeffs)?;
            reconstruction = Some(match reconstruction {
                None => samples,
                Some(mut acc) => {
                    for (dst, src) in acc.iter_mut().zip(samples) {
                        *dst = *dst + src;
                    }
                    acc
                }
            });
        }
        let mut samples = reconstruction.ok_or(WaveletError::NullBuffer("coefficients"))?;
        if shape.trees() > 1 {
            let scale: T = (1. / shape.trees() as f64).as_();
            for v in samples.iter_mut() {
                *v = *v * scale;
            }
        }
        Ok(samples)
    }

    /// Synthesis into the attached buffer, in the cycle spun frame.
    ///
    /// This is the adjoint of the filter bank alone: when cycle spinning is on the result
    /// is the shifted signal `forward` decomposed, not the original one.
    pub fn backward(&mut self) -> Result<(), WaveletError> {
        let samples = self.synthesize(Operation::Backward)?;
        let image = self
            .image
            .as_deref_mut()
            .ok_or(WaveletError::NullBuffer("image"))?;
        image[..samples.len()].copy_from_slice(&samples);
        self.state = TransformState::Reconstructed;
        self.check_runtime()
    }

    /// Exact inverse of [`Self::forward`]: synthesis followed by undoing the cycle shift.
    pub fn inverse(&mut self) -> Result<(), WaveletError> {
        let samples = self.synthesize(Operation::Inverse)?;
        let shift = self.shift.map(|x| -x);
        let image = self
            .image
            .as_deref_mut()
            .ok_or(WaveletError::NullBuffer("image"))?;
        let len = samples.len();
        if self.cycle_spinning {
            circular_shift(&self.workload, &samples, &mut image[..len], shift);
        } else {
            image[..len].copy_from_slice(&samples);
        }
        self.state = TransformState::Reconstructed;
        self.check_runtime()
    }

    pub fn coeff(&self) -> Option<&CoeffContainer<T>> {
        self.coeffs.as_ref()
    }

    /// Mutable coefficients, for in place processing between `forward` and `inverse`.
    pub fn coeff_mut(&mut self) -> Option<&mut CoeffContainer<T>> {
        self.coeffs.as_mut()
    }

    /// Detaches the coefficients from the transform.
    pub fn take_coeff(&mut self) -> Option<CoeffContainer<T>> {
        let coeffs = self.coeffs.take();
        self.state = if self.image.is_some() {
            TransformState::HasImage
        } else {
            TransformState::Uninitialized
        };
        coeffs
    }

    /// Sets the per axis cycle shift, reduced modulo the extent of each active axis.
    /// Inactive axes never shift.
    pub fn set_cycle_shift(&mut self, shift: [isize; 3]) {
        for (axis, dst) in self.shift.iter_mut().enumerate() {
            *dst = if self.workload.is_active(axis) {
                shift[axis].rem_euclid(self.workload.extents()[axis] as isize)
            } else {
                0
            };
        }
    }

    pub fn cycle_shift(&self) -> [isize; 3] {
        self.shift
    }

    pub fn is_cycle_spinning(&self) -> bool {
        self.cycle_spinning
    }

    pub fn state(&self) -> TransformState {
        self.state
    }

    /// Family name the transform was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> WaveletFamily {
        S::FAMILY
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn workload(&self) -> WorkloadDescriptor {
        self.workload
    }

    /// Attached samples.
    pub fn image(&self) -> Option<&[T]> {
        self.image.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeffs::{SubbandKind, TreeShape};
    use crate::family::{Antonini97, Daubechies2, Daubechies5, DualTreeAnto97QShift6};

    struct FailingRuntime;

    impl DeviceRuntime for FailingRuntime {
        fn status(&self) -> i32 {
            2
        }
    }

    #[test]
    fn test_name_mismatch_rejected() {
        let mut image = vec![0f32; 16];
        let result =
            WaveletTransform::<f32, Daubechies2>::new(&mut image, 16, 1, 1, false, "Anto97", 1);
        assert!(matches!(
            result,
            Err(WaveletError::UnsupportedConfiguration(_))
        ));
        let result =
            WaveletTransform::<f32, Daubechies2>::new(&mut image, 16, 1, 1, false, "Daub9", 1);
        assert!(matches!(
            result,
            Err(WaveletError::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_levels_rejected() {
        let mut image = vec![0f64; 16];
        let result =
            WaveletTransform::<f64, Antonini97>::new(&mut image, 16, 1, 1, false, "Anto97", 0);
        assert!(matches!(
            result,
            Err(WaveletError::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn test_extent_too_small_for_levels() {
        let mut image = vec![0f32; 64];
        let result =
            WaveletTransform::<f32, Daubechies5>::new(&mut image, 8, 8, 1, false, "Daub5", 2);
        assert_eq!(
            result.err(),
            Some(WaveletError::InvalidExtent {
                axis: 0,
                level: 1,
                extent: 4,
                required: 5
            })
        );
        let mut image = vec![0f32; 1];
        let result =
            WaveletTransform::<f32, Daubechies2>::new(&mut image, 1, 1, 1, false, "Daub2", 1);
        assert!(result.err().is_some_and(|e| e.is_invalid_extent()));
    }

    #[test]
    fn test_image_validation() {
        let workload = WorkloadDescriptor::new(8, 8, 1).unwrap();
        let mut transform =
            WaveletTransform::<f32, Daubechies2>::without_image(workload, false, "Daub2", 1)
                .unwrap();
        let mut empty: Vec<f32> = Vec::new();
        assert_eq!(
            transform.set_image(&mut empty),
            Err(WaveletError::NullBuffer("image"))
        );
        let mut short = vec![0f32; 10];
        assert_eq!(
            transform.set_image(&mut short),
            Err(WaveletError::BufferTooSmall(10, 64))
        );
        assert_eq!(transform.state(), TransformState::Uninitialized);
    }

    #[test]
    fn test_operations_rejected_before_prerequisites() {
        let workload = WorkloadDescriptor::new(8, 1, 1).unwrap();
        let mut transform =
            WaveletTransform::<f64, Daubechies2>::without_image(workload, false, "Daub2", 1)
                .unwrap();
        assert_eq!(
            transform.forward(),
            Err(WaveletError::InvalidState {
                operation: Operation::Forward,
                state: TransformState::Uninitialized
            })
        );
        assert_eq!(
            transform.backward(),
            Err(WaveletError::InvalidState {
                operation: Operation::Backward,
                state: TransformState::Uninitialized
            })
        );
        assert_eq!(
            transform.inverse(),
            Err(WaveletError::InvalidState {
                operation: Operation::Inverse,
                state: TransformState::Uninitialized
            })
        );
        assert_eq!(transform.state(), TransformState::Uninitialized);
        assert!(transform.coeff().is_none());
        assert!(transform.image().is_none());

        let mut image: Vec<f64> = (0..8).map(|x| x as f64).collect();
        transform.set_image(&mut image).unwrap();
        assert_eq!(
            transform.backward(),
            Err(WaveletError::InvalidState {
                operation: Operation::Backward,
                state: TransformState::HasImage
            })
        );
        assert!(transform.inverse().unwrap_err().is_invalid_state());
        assert!(transform.coeff().is_none());
        let untouched: Vec<f64> = (0..8).map(|x| x as f64).collect();
        assert_eq!(transform.image(), Some(untouched.as_slice()));
    }

    #[test]
    fn test_take_and_set_coeff() {
        let mut image: Vec<f32> = (0..32).map(|x| (x % 5) as f32).collect();
        let expected = image.clone();
        let mut transform =
            WaveletTransform::<f32, Daubechies2>::new(&mut image, 32, 1, 1, false, "Daub2", 2)
                .unwrap();
        transform.forward().unwrap();
        let coeffs = transform.take_coeff().unwrap();
        assert_eq!(transform.state(), TransformState::HasImage);
        assert!(transform.backward().unwrap_err().is_invalid_state());

        let wrong = CoeffContainer::<f32>::allocate(
            WorkloadDescriptor::new(16, 1, 1).unwrap(),
            2,
            TreeShape::Single,
        )
        .unwrap();
        assert_eq!(
            transform.set_coeff(wrong),
            Err(WaveletError::CoeffLayoutMismatch)
        );
        let dual =
            CoeffContainer::<f32>::allocate(transform.workload(), 2, TreeShape::DualTree).unwrap();
        assert!(matches!(
            transform.set_coeff(dual),
            Err(WaveletError::UnsupportedConfiguration(_))
        ));

        transform.set_coeff(coeffs).unwrap();
        assert_eq!(transform.state(), TransformState::Decomposed);
        transform.backward().unwrap();
        for (a, b) in expected.iter().zip(transform.image().unwrap()) {
            assert!((a - b).abs() < 1e-5, "expected {a}, but it was {b}");
        }
    }

    #[test]
    fn test_failed_decomposition_falls_back_to_image() {
        let mut image: Vec<f32> = (0..16).map(|x| x as f32).collect();
        let mut transform =
            WaveletTransform::<f32, Daubechies2>::new(&mut image, 16, 1, 1, false, "Daub2", 1)
                .unwrap();
        transform.forward().unwrap();
        transform.backward().unwrap();
        assert_eq!(transform.state(), TransformState::Reconstructed);

        assert_eq!(
            transform.store_decomposition(Err(WaveletError::OutOfMemory(16))),
            Err(WaveletError::OutOfMemory(16))
        );
        assert_eq!(transform.state(), TransformState::HasImage);
        assert!(transform.coeff().is_none());
        assert_eq!(
            transform.backward(),
            Err(WaveletError::InvalidState {
                operation: Operation::Backward,
                state: TransformState::HasImage
            })
        );
        transform.forward().unwrap();
        assert_eq!(transform.state(), TransformState::Decomposed);
    }

    #[test]
    fn test_cycle_spinning() {
        let original: Vec<f64> = (0..48).map(|x| ((x * 7) % 13) as f64).collect();
        let mut image = original.clone();
        let mut transform = WaveletTransform::<f64, Antonini97>::new(
            &mut image, 8, 6, 1, true, "Anto97", 1,
        )
        .unwrap();
        transform.set_cycle_shift([-1, 7, 3]);
        assert_eq!(transform.cycle_shift(), [7, 1, 0]);

        transform.forward().unwrap();
        assert_eq!(transform.image(), Some(original.as_slice()));

        transform.backward().unwrap();
        let workload = transform.workload();
        let mut shifted = vec![0f64; original.len()];
        circular_shift(&workload, &original, &mut shifted, [7, 1, 0]);
        for (a, b) in shifted.iter().zip(transform.image().unwrap()) {
            assert!((a - b).abs() < 1e-9, "expected {a}, but it was {b}");
        }

        transform.inverse().unwrap();
        assert_eq!(transform.state(), TransformState::Reconstructed);
        for (a, b) in original.iter().zip(transform.image().unwrap()) {
            assert!((a - b).abs() < 1e-9, "expected {a}, but it was {b}");
        }
    }

    #[test]
    fn test_backward_is_non_destructive() {
        let mut image: Vec<f32> = (0..64).map(|x| x as f32).collect();
        let mut transform = WaveletTransform::<f32, DualTreeAnto97QShift6>::new(
            &mut image, 64, 1, 1, false, "DTCWT", 2,
        )
        .unwrap();
        transform.forward().unwrap();
        let before = transform.coeff().cloned().unwrap();
        transform.backward().unwrap();
        transform.backward().unwrap();
        assert_eq!(transform.coeff(), Some(&before));
        assert_eq!(before.shape(), TreeShape::DualTree);
        assert!(before.subband(1, SubbandKind::HIGH).is_some());
    }

    #[test]
    fn test_runtime_failure_surfaces() {
        let mut image = vec![1f32; 16];
        let mut transform =
            WaveletTransform::<f32, Daubechies2>::new(&mut image, 16, 1, 1, false, "Daub2", 1)
                .unwrap()
                .with_runtime(FailingRuntime);
        assert!(matches!(
            transform.forward(),
            Err(WaveletError::Device { code: 2, .. })
        ));
    }
}
