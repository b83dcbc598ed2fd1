//! Timing harness for the published pipeline shapes.
//!
//! Runs `add(max_pool(src1[32,64,112,112]), src2[32,1,56,56])` through both
//! backends and reports the result shape and elapsed wall time for each.

use poolcast::backend::{Backend, set_backend};
use poolcast::graph::forward;
use poolcast::tensors::{Shape4, Tensor4};
use std::{hint::black_box, time::Instant};

const KERNEL: [usize; 2] = [3, 3];
const PAD: [usize; 2] = [1, 1];
const STRIDE: [usize; 2] = [2, 2];

const AVG: u32 = 8;

fn main() {
    let src1 = Tensor4::from_fn(Shape4::new(32, 64, 112, 112), |b, c, h, w| {
        (b + c + h + w) as i32 % 97 - 48
    });
    let src2 = Tensor4::from_fn(Shape4::new(32, 1, 56, 56), |b, _, h, w| {
        (b * 31 + h * 7 + w) as i32 % 53 - 26
    });

    set_backend(Backend::Reference);

    let start_ref = Instant::now();
    for _ in 0..AVG {
        let _ = black_box(forward(&src1, &src2, KERNEL, PAD, STRIDE).unwrap());
    }
    let elapsed_ref = start_ref.elapsed() / AVG;

    set_backend(Backend::Parallel);

    let start_par = Instant::now();
    for _ in 0..AVG {
        let _ = black_box(forward(&src1, &src2, KERNEL, PAD, STRIDE).unwrap());
    }
    let elapsed_par = start_par.elapsed() / AVG;

    set_backend(Backend::Reference);
    let dst = forward(&src1, &src2, KERNEL, PAD, STRIDE).unwrap();
    set_backend(Backend::Parallel);
    let dst_par = forward(&src1, &src2, KERNEL, PAD, STRIDE).unwrap();
    assert_eq!(dst, dst_par, "backends disagree");

    println!("Result Shape: {}", dst.shape);
    println!("REFERENCE={elapsed_ref:?}");
    println!("PARALLEL={elapsed_par:?}");
}
