#![no_main]

use arbitrary::Arbitrary;
use dwtree::{Daubechies3, WaveletTransform};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Data {
    width: u8,
    height: u8,
    levels: u8,
}

fuzz_target!(|data: Data| {
    let width = data.width as usize;
    let height = data.height as usize % 32;
    if width == 0 || height == 0 {
        return;
    }
    let mut signal = vec![0f32; width * height];
    for (i, v) in signal.iter_mut().enumerate() {
        *v = i as f32 / signal.len() as f32;
    }
    let levels = (data.levels % 4) as usize;
    let Ok(mut transform) = WaveletTransform::<f32, Daubechies3>::new(
        &mut signal,
        width,
        height,
        1,
        false,
        "Daub3",
        levels,
    ) else {
        return;
    };
    transform.forward().unwrap();
    transform.inverse().unwrap();
});
