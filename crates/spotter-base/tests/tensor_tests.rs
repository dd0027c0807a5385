use spotter_base::{Tensor, TensorError};

#[test]
fn test_new_valid_shape() {
    let t = Tensor::new(vec![2, 3], vec![0u8; 6]).unwrap();
    assert_eq!(t.ndim(), 2);
    assert_eq!(t.len(), 6);
    assert!(!t.is_empty());
}

#[test]
fn test_new_rejects_mismatched_data() {
    let err = Tensor::new(vec![2, 3], vec![0u8; 5]).unwrap_err();
    assert_eq!(
        err,
        TensorError::ShapeMismatch {
            expected: 6,
            got: 5
        }
    );
}

#[test]
fn test_new_rejects_overflowing_shape() {
    let err = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]).unwrap_err();
    assert_eq!(err, TensorError::ShapeOverflow);
}

#[test]
fn test_zeros_and_filled() {
    let z = Tensor::<u8>::zeros(vec![4, 4, 3]).unwrap();
    assert!(z.data.iter().all(|&v| v == 0));

    let f = Tensor::filled(vec![2, 2, 3], 7u8).unwrap();
    assert!(f.data.iter().all(|&v| v == 7));
}

#[test]
fn test_dims_hwc() {
    let t = Tensor::<u8>::zeros(vec![480, 640, 3]).unwrap();
    assert_eq!(t.dims_hwc().unwrap(), (480, 640, 3));
}

#[test]
fn test_dims_hwc_rejects_wrong_rank() {
    let t = Tensor::<u8>::zeros(vec![480, 640]).unwrap();
    let err = t.dims_hwc().unwrap_err();
    assert_eq!(
        err,
        TensorError::RankMismatch {
            expected: 3,
            got: 2
        }
    );
}

#[test]
fn test_debug_omits_pixel_data() {
    let t = Tensor::<u8>::zeros(vec![480, 640, 3]).unwrap();
    let repr = format!("{t:?}");
    assert!(repr.contains("shape"));
    assert!(repr.contains("len"));
    // A frame's worth of "0, 0, 0, ..." would be visible if data leaked in.
    assert!(repr.len() < 200);
}
