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
use dwtree::{
    Antonini97, Daubechies2, Daubechies3, Daubechies4, Daubechies5, DeviceRuntime,
    DualTreeAnto97QShift6, QShift6, ReverseQShift6, WaveletError, WaveletFamily, WaveletSample,
    WaveletScheme, WaveletTransform, WorkloadDescriptor,
};
use num_traits::AsPrimitive;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_signal<T: WaveletSample>(len: usize, seed: u64) -> Vec<T>
where
    f64: AsPrimitive<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0f64..1.0).as_()).collect()
}

fn round_trip<T: WaveletSample, S: WaveletScheme>(
    extents: [usize; 3],
    levels: usize,
    shift: Option<[isize; 3]>,
    tolerance: f64,
) where
    f64: AsPrimitive<T>,
{
    let len = extents.iter().product();
    let original = random_signal::<T>(len, len as u64 + levels as u64);
    let mut image = original.clone();
    let mut transform = WaveletTransform::<T, S>::new(
        &mut image,
        extents[0],
        extents[1],
        extents[2],
        shift.is_some(),
        S::FAMILY.name(),
        levels,
    )
    .unwrap();
    if let Some(shift) = shift {
        transform.set_cycle_shift(shift);
    }
    transform.forward().unwrap();
    transform.inverse().unwrap();
    for (a, b) in original.iter().zip(transform.image().unwrap()) {
        let a: f64 = a.as_();
        let b: f64 = b.as_();
        assert!(
            (a - b).abs() < tolerance,
            "{} {extents:?} level {levels}: expected {a}, but it was {b}",
            S::FAMILY
        );
    }
}

/// Q-shift tables carry 8 decimals, which bounds their reconstruction error.
fn f64_tolerance<S: WaveletScheme>() -> f64 {
    match S::FAMILY {
        WaveletFamily::QShift6 | WaveletFamily::ReverseQShift6 | WaveletFamily::DualTreeComplex => {
            1e-5
        }
        _ => 1e-10,
    }
}

fn round_trip_all_shapes<S: WaveletScheme>() {
    for (extents, levels) in [
        ([64, 1, 1], 3),
        ([1, 37, 1], 2),
        ([24, 20, 1], 2),
        ([19, 13, 1], 1),
        ([12, 10, 9], 2),
    ] {
        round_trip::<f32, S>(extents, levels, None, 1e-5);
        round_trip::<f64, S>(extents, levels, None, f64_tolerance::<S>());
    }
    round_trip::<f64, S>([24, 20, 1], 2, Some([3, -7, 0]), f64_tolerance::<S>());
    round_trip::<f32, S>([12, 10, 9], 1, Some([-1, 4, 11]), 1e-5);
}

#[test]
fn test_round_trip_daubechies() {
    round_trip_all_shapes::<Daubechies2>();
    round_trip_all_shapes::<Daubechies3>();
    round_trip_all_shapes::<Daubechies4>();
    round_trip_all_shapes::<Daubechies5>();
}

#[test]
fn test_round_trip_antonini() {
    round_trip_all_shapes::<Antonini97>();
}

#[test]
fn test_round_trip_qshift() {
    round_trip_all_shapes::<QShift6>();
    round_trip_all_shapes::<ReverseQShift6>();
}

#[test]
fn test_round_trip_dual_tree() {
    round_trip_all_shapes::<DualTreeAnto97QShift6>();
}

fn minimal_extent_boundary<S: WaveletScheme>() {
    for levels in 1..=3 {
        let mut n = 1;
        while WorkloadDescriptor::new(n, 1, 1).is_ok_and(|workload| {
            (0..levels).any(|level| {
                workload.level_extents(level)[0] < S::FILTERS.minimal_extent(level)
            })
        }) {
            n += 1;
        }
        round_trip::<f64, S>([n, 1, 1], levels, None, f64_tolerance::<S>());

        let mut image = vec![0f64; n - 1];
        let err =
            WaveletTransform::<f64, S>::new(&mut image, n - 1, 1, 1, false, S::FAMILY.name(), levels)
                .err()
                .unwrap();
        assert!(err.is_invalid_extent(), "{} n = {}: {err}", S::FAMILY, n - 1);
    }
}

#[test]
fn test_minimal_extents() {
    assert_eq!(Daubechies2::FILTERS.minimal_extent(0), 2);
    assert_eq!(Daubechies5::FILTERS.minimal_extent(0), 5);
    assert_eq!(DualTreeAnto97QShift6::FILTERS.minimal_extent(0), 5);
    assert_eq!(DualTreeAnto97QShift6::FILTERS.minimal_extent(1), 4);

    minimal_extent_boundary::<Daubechies2>();
    minimal_extent_boundary::<Daubechies3>();
    minimal_extent_boundary::<Daubechies5>();
    minimal_extent_boundary::<Antonini97>();
    minimal_extent_boundary::<DualTreeAnto97QShift6>();

    let mut image = vec![0f32; 6];
    assert_eq!(
        WaveletTransform::<f32, DualTreeAnto97QShift6>::new(&mut image, 6, 1, 1, false, "DTCWT", 2)
            .err(),
        Some(WaveletError::InvalidExtent {
            axis: 0,
            level: 1,
            extent: 3,
            required: 4
        })
    );
}

struct LostDevice;

impl DeviceRuntime for LostDevice {
    fn status(&self) -> i32 {
        700
    }

    fn describe(&self, code: i32) -> String {
        format!("device lost ({code})")
    }
}

#[test]
fn test_device_failure_reported_after_operation() {
    let mut image = random_signal::<f32>(32, 1);
    let mut transform =
        WaveletTransform::<f32, Daubechies2>::new(&mut image, 32, 1, 1, false, "daub2", 1)
            .unwrap()
            .with_runtime(LostDevice);
    assert_eq!(
        transform.forward(),
        Err(WaveletError::Device {
            code: 700,
            message: "device lost (700)".to_string()
        })
    );
    assert_eq!(transform.name(), "daub2");
}
