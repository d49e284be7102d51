#![no_main]

use arbitrary::Arbitrary;
use dwtree::{Antonini97, WaveletTransform, WorkloadDescriptor};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Data {
    nx: u8,
    ny: u8,
    nz: u8,
    levels: u8,
    shift: (i8, i8, i8),
    values: Vec<f64>,
}

fuzz_target!(|data: Data| {
    let nx = data.nx as usize % 24 + 1;
    let ny = data.ny as usize % 24 + 1;
    let nz = data.nz as usize % 12 + 1;
    let Ok(workload) = WorkloadDescriptor::new(nx, ny, nz) else {
        return;
    };
    let mut signal = vec![0f64; workload.len()];
    for (dst, src) in signal.iter_mut().zip(data.values.iter()) {
        if src.is_finite() {
            *dst = src.clamp(-1e6, 1e6);
        }
    }
    let original = signal.clone();
    let levels = (data.levels % 3) as usize + 1;
    let Ok(mut transform) =
        WaveletTransform::<f64, Antonini97>::new(&mut signal, nx, ny, nz, true, "Anto97", levels)
    else {
        return;
    };
    transform.set_cycle_shift([
        data.shift.0 as isize,
        data.shift.1 as isize,
        data.shift.2 as isize,
    ]);
    transform.forward().unwrap();
    transform.inverse().unwrap();
    let restored = transform.image().unwrap();
    let scale = original.iter().fold(1f64, |acc, x| acc.max(x.abs()));
    for (a, b) in original.iter().zip(restored.iter()) {
        assert!((a - b).abs() <= 1e-8 * scale, "expected {a}, but it was {b}");
    }
});
