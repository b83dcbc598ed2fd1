use poolcast::ops::reference::broadcast_add;
use poolcast::tensors::{DimensionMismatch, Shape4, Tensor4};

#[test]
fn test_output_shape_is_per_axis_max() {
    let a = Tensor4::filled(Shape4::new(4, 1, 6, 1), 0);
    let b = Tensor4::filled(Shape4::new(1, 3, 6, 5), 0);
    let out = broadcast_add(&a, &b).unwrap();
    assert_eq!(out.shape, Shape4::new(4, 3, 6, 5));
}

#[test]
fn test_equal_shapes_add_elementwise() {
    let a = Tensor4::new(Shape4::new(1, 1, 2, 2), vec![1, 2, 3, 4]);
    let b = Tensor4::new(Shape4::new(1, 1, 2, 2), vec![10, 20, 30, 40]);
    let out = broadcast_add(&a, &b).unwrap();
    assert_eq!(out.data, vec![11, 22, 33, 44]);
}

#[test]
fn test_width_one_replicates_scalar() {
    let scalar = Tensor4::filled(Shape4::new(1, 1, 1, 1), 5);
    let row = Tensor4::new(Shape4::new(1, 1, 1, 4), vec![1, 2, 3, 4]);
    let out = broadcast_add(&scalar, &row).unwrap();
    assert_eq!(out.shape, Shape4::new(1, 1, 1, 4));
    assert_eq!(out.data, vec![6, 7, 8, 9]);

    // symmetric in argument order
    let out = broadcast_add(&row, &scalar).unwrap();
    assert_eq!(out.data, vec![6, 7, 8, 9]);
}

#[test]
fn test_both_widths_one() {
    let a = Tensor4::new(Shape4::new(1, 1, 2, 1), vec![1, 2]);
    let b = Tensor4::new(Shape4::new(1, 1, 2, 1), vec![10, 20]);
    let out = broadcast_add(&a, &b).unwrap();
    assert_eq!(out.shape, Shape4::new(1, 1, 2, 1));
    assert_eq!(out.data, vec![11, 22]);
}

#[test]
fn test_channel_broadcast_replicates_slice() {
    // the published composition adds a [B, 1, H, W] bias across channels
    let a = Tensor4::from_fn(Shape4::new(2, 3, 2, 2), |b, c, h, w| {
        (b * 100 + c * 10 + h * 2 + w) as i32
    });
    let bias = Tensor4::from_fn(Shape4::new(2, 1, 2, 2), |b, _, h, w| {
        -((b * 1000 + h * 2 + w) as i32)
    });
    let out = broadcast_add(&a, &bias).unwrap();
    assert_eq!(out.shape, a.shape);
    for b in 0..2 {
        for c in 0..3 {
            for h in 0..2 {
                for w in 0..2 {
                    assert_eq!(
                        out.get(b, c, h, w),
                        a.get(b, c, h, w) + bias.get(b, 0, h, w)
                    );
                }
            }
        }
    }
}

#[test]
fn test_incompatible_widths_error() {
    let a = Tensor4::filled(Shape4::new(1, 1, 1, 3), 0);
    let b = Tensor4::filled(Shape4::new(1, 1, 1, 5), 0);
    let err = broadcast_add(&a, &b).unwrap_err();
    assert_eq!(
        err,
        DimensionMismatch { lhs: a.shape, rhs: b.shape, axis: 3 }
    );
}

#[test]
fn test_incompatible_batch_error_reports_first_axis() {
    let a = Tensor4::filled(Shape4::new(2, 1, 1, 3), 0);
    let b = Tensor4::filled(Shape4::new(3, 1, 1, 5), 0);
    let err = broadcast_add(&a, &b).unwrap_err();
    assert_eq!(err.axis, 0);
}

#[test]
fn test_mismatch_display_names_axis() {
    let a = Shape4::new(1, 1, 1, 3);
    let b = Shape4::new(1, 1, 1, 5);
    let err = a.broadcast(&b).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("width"), "unexpected message: {msg}");
    assert!(msg.contains("[1, 1, 1, 3]"), "unexpected message: {msg}");
}
