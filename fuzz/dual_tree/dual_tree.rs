#![no_main]

use arbitrary::Arbitrary;
use dwtree::{DualTreeAnto97QShift6, WaveletTransform};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Data {
    width: u8,
    height: u8,
    levels: u8,
}

fuzz_target!(|data: Data| {
    let width = data.width as usize % 48 + 1;
    let height = data.height as usize % 48 + 1;
    let mut signal = vec![0f32; width * height];
    for (i, v) in signal.iter_mut().enumerate() {
        *v = ((i * 37) % 101) as f32 / 101.;
    }
    let levels = (data.levels % 4) as usize + 1;
    let Ok(mut transform) = WaveletTransform::<f32, DualTreeAnto97QShift6>::new(
        &mut signal,
        width,
        height,
        1,
        false,
        "DTCWT",
        levels,
    ) else {
        return;
    };
    transform.forward().unwrap();
    transform.backward().unwrap();
});
