//! Reference-vs-parallel parity: for every valid input, the two backends
//! must produce bit-identical outputs. Calls the backend modules directly so
//! the comparison is independent of the global backend selector.

use poolcast::ops::{parallel, reference};
use poolcast::tensors::{Shape4, Tensor4};
use rand::Rng;

fn random_tensor(shape: Shape4, rng: &mut impl Rng) -> Tensor4 {
    Tensor4::new(
        shape,
        (0..shape.len()).map(|_| rng.random_range(-100..100)).collect(),
    )
}

#[test]
fn test_max_pool_parity_randomized() {
    let mut rng = rand::rng();
    let cases: &[(Shape4, [usize; 2], [usize; 2], [usize; 2])] = &[
        (Shape4::new(2, 3, 8, 8), [2, 2], [0, 0], [2, 2]),
        (Shape4::new(3, 2, 11, 7), [3, 3], [1, 1], [2, 2]),
        (Shape4::new(1, 5, 9, 13), [3, 2], [0, 1], [1, 3]),
        (Shape4::new(4, 1, 5, 5), [5, 5], [2, 2], [1, 1]),
        (Shape4::new(1, 1, 1, 1), [1, 1], [1, 1], [1, 1]),
        (Shape4::new(2, 4, 112, 112), [3, 3], [1, 1], [2, 2]),
    ];
    for &(shape, kernel, pad, stride) in cases {
        let t = random_tensor(shape, &mut rng);
        let seq = reference::max_pool(&t, kernel, pad, stride);
        let par = parallel::max_pool(&t, kernel, pad, stride);
        assert_eq!(seq, par, "shape {shape}, kernel {kernel:?}, pad {pad:?}, stride {stride:?}");
    }
}

#[test]
fn test_broadcast_add_parity_randomized() {
    let mut rng = rand::rng();
    // widths chosen to exercise full 4-lane groups plus scalar tails
    let cases: &[(Shape4, Shape4)] = &[
        (Shape4::new(2, 3, 4, 11), Shape4::new(2, 3, 4, 11)),
        (Shape4::new(2, 3, 4, 11), Shape4::new(2, 3, 4, 1)),
        (Shape4::new(2, 3, 4, 1), Shape4::new(2, 3, 4, 11)),
        (Shape4::new(2, 3, 4, 1), Shape4::new(2, 3, 4, 1)),
        (Shape4::new(2, 1, 4, 8), Shape4::new(2, 5, 4, 8)),
        (Shape4::new(1, 3, 1, 7), Shape4::new(6, 3, 4, 7)),
        (Shape4::new(4, 1, 1, 1), Shape4::new(1, 2, 3, 9)),
        (Shape4::new(1, 1, 1, 1), Shape4::new(1, 1, 1, 1)),
        (Shape4::new(3, 2, 5, 4), Shape4::new(1, 1, 5, 4)),
    ];
    for &(s1, s2) in cases {
        let t1 = random_tensor(s1, &mut rng);
        let t2 = random_tensor(s2, &mut rng);
        let seq = reference::broadcast_add(&t1, &t2).unwrap();
        let par = parallel::broadcast_add(&t1, &t2).unwrap();
        assert_eq!(seq, par, "shapes {s1} + {s2}");
    }
}

#[test]
fn test_broadcast_add_parity_rejects_same_shapes() {
    let t1 = Tensor4::filled(Shape4::new(1, 2, 3, 3), 0);
    let t2 = Tensor4::filled(Shape4::new(1, 2, 3, 5), 0);
    let seq = reference::broadcast_add(&t1, &t2).unwrap_err();
    let par = parallel::broadcast_add(&t1, &t2).unwrap_err();
    assert_eq!(seq, par);
}

#[test]
fn test_pipeline_parity_on_published_shapes() {
    // scaled-down channel count to keep the test quick; spatial geometry is
    // the published 112 -> 56 configuration
    let mut rng = rand::rng();
    let src1 = random_tensor(Shape4::new(4, 8, 112, 112), &mut rng);
    let src2 = random_tensor(Shape4::new(4, 1, 56, 56), &mut rng);

    let pooled_seq = reference::max_pool(&src1, [3, 3], [1, 1], [2, 2]);
    let pooled_par = parallel::max_pool(&src1, [3, 3], [1, 1], [2, 2]);
    assert_eq!(pooled_seq.shape, Shape4::new(4, 8, 56, 56));
    assert_eq!(pooled_seq, pooled_par);

    let dst_seq = reference::broadcast_add(&pooled_seq, &src2).unwrap();
    let dst_par = parallel::broadcast_add(&pooled_par, &src2).unwrap();
    assert_eq!(dst_seq.shape, Shape4::new(4, 8, 56, 56));
    assert_eq!(dst_seq, dst_par);
}
