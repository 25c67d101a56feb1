use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zncc_rot::lowlevel::compute_view;
use zncc_rot::{
    compute, compute_as, AnyImageView, Depth, ImageView, OwnedImage, Region, SentinelMode,
    WeightMap, ZnccConfig, ZnccError,
};

const TOL: f64 = 1e-12;

fn random_u8(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random_range(1..=254u8)).collect()
}

/// Straightforward two-pass weighted ZNCC over valid pairs.
fn reference_zncc(a: &[f64], b: &[f64], w: &[f64]) -> f64 {
    let n: f64 = w.iter().sum();
    let mean_a = a.iter().zip(w).map(|(v, w)| v * w).sum::<f64>() / n;
    let mean_b = b.iter().zip(w).map(|(v, w)| v * w).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..a.len() {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += w[i] * da * db;
        var_a += w[i] * da * da;
        var_b += w[i] * db * db;
    }
    cov / (var_a * var_b).sqrt()
}

#[test]
fn identical_regions_score_one() {
    let mut rng = StdRng::seed_from_u64(1);
    let data = random_u8(&mut rng, 16 * 12);
    let view = ImageView::from_slice(&data, 16, 12).unwrap();
    let region = Region::new(3, 2, 9, 7);
    let score = compute(
        view.into(),
        region,
        view.into(),
        region,
        None,
        &ZnccConfig::default(),
    )
    .unwrap();
    assert!((score - 1.0).abs() < TOL, "score = {score}");
}

#[test]
fn inverted_region_scores_minus_one() {
    let mut rng = StdRng::seed_from_u64(2);
    let data = random_u8(&mut rng, 10 * 10);
    let inverted: Vec<u8> = data.iter().map(|&v| 255 - v).collect();
    let a = ImageView::from_slice(&data, 10, 10).unwrap();
    let b = ImageView::from_slice(&inverted, 10, 10).unwrap();
    let region = Region::full(10, 10);
    let score =
        compute(a.into(), region, b.into(), region, None, &ZnccConfig::default()).unwrap();
    assert!((score + 1.0).abs() < 1e-9, "score = {score}");
}

#[test]
fn score_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(3);
    let a: Vec<i16> = (0..20 * 15).map(|_| rng.random_range(-2000..2000i16)).collect();
    let b: Vec<i16> = (0..18 * 18).map(|_| rng.random_range(-2000..2000i16)).collect();
    let va = ImageView::from_slice(&a, 20, 15).unwrap();
    let vb = ImageView::from_slice(&b, 18, 18).unwrap();
    let ra = Region::new(-2, 4, 12, 10);
    let rb = Region::new(5, -1, 12, 10);
    let cfg = ZnccConfig::default();
    let ab = compute(va.into(), ra, vb.into(), rb, None, &cfg).unwrap();
    let ba = compute(vb.into(), rb, va.into(), ra, None, &cfg).unwrap();
    assert!(ab.abs() <= 1.0);
    assert!((ab - ba).abs() < TOL);
}

#[test]
fn matches_two_pass_reference_with_weights() {
    let mut rng = StdRng::seed_from_u64(4);
    let a: Vec<f32> = (0..7 * 5).map(|_| rng.random_range(-1.0..1.0f32)).collect();
    let b: Vec<f32> = (0..7 * 5).map(|_| rng.random_range(-1.0..1.0f32)).collect();
    let weights: Vec<f32> = (0..7 * 5).map(|_| rng.random_range(0.1..2.0f32)).collect();
    let va = ImageView::from_slice(&a, 7, 5).unwrap();
    let vb = ImageView::from_slice(&b, 7, 5).unwrap();
    let region = Region::full(7, 5);
    let score = compute(
        va.into(),
        region,
        vb.into(),
        region,
        Some(WeightMap::new(&weights)),
        &ZnccConfig::default(),
    )
    .unwrap();

    let to_f64 = |v: &[f32]| v.iter().map(|&x| f64::from(x)).collect::<Vec<_>>();
    let expected = reference_zncc(&to_f64(&a), &to_f64(&b), &to_f64(&weights));
    assert!((score - expected).abs() < 1e-9, "{score} vs {expected}");
}

#[test]
fn padded_rows_are_skipped() {
    let mut rng = StdRng::seed_from_u64(5);
    let packed_a = random_u8(&mut rng, 6 * 4);
    let packed_b = random_u8(&mut rng, 6 * 4);
    let pad = |src: &[u8]| {
        let mut out = Vec::new();
        for row in src.chunks(6) {
            out.extend_from_slice(row);
            out.extend_from_slice(&[0, 255, 0]);
        }
        out
    };
    let padded_a = pad(&packed_a);
    let padded_b = pad(&packed_b);
    let cfg = ZnccConfig::default();
    let region = Region::full(6, 4);

    let packed = compute_view(
        ImageView::from_slice(&packed_a, 6, 4).unwrap(),
        region,
        ImageView::from_slice(&packed_b, 6, 4).unwrap(),
        region,
        None,
        &cfg,
    )
    .unwrap();
    let strided = compute_view(
        ImageView::new(&padded_a, 6, 4, 9).unwrap(),
        region,
        ImageView::new(&padded_b, 6, 4, 9).unwrap(),
        region,
        None,
        &cfg,
    )
    .unwrap();
    assert_eq!(packed, strided);
}

#[test]
fn coverage_below_half_scores_zero() {
    // 4 of 10 pairs valid.
    let a = [0u8, 0, 0, 0, 0, 0, 10, 200, 30, 90];
    let b = [5u8, 60, 7, 8, 9, 1, 20, 180, 50, 70];
    let va = ImageView::from_slice(&a, 10, 1).unwrap();
    let vb = ImageView::from_slice(&b, 10, 1).unwrap();
    let region = Region::full(10, 1);
    let score =
        compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default()).unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn coverage_at_half_is_scored_from_valid_pairs() {
    // 5 of 10 pairs valid: the sentinel in b invalidates pairs too.
    let a = [0u8, 7, 0, 12, 0, 10, 200, 30, 90, 140];
    let b = [5u8, 255, 7, 255, 9, 20, 180, 50, 70, 100];
    let va = ImageView::from_slice(&a, 10, 1).unwrap();
    let vb = ImageView::from_slice(&b, 10, 1).unwrap();
    let region = Region::full(10, 1);
    let score =
        compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default()).unwrap();

    let valid_a = [10.0, 200.0, 30.0, 90.0, 140.0];
    let valid_b = [20.0, 180.0, 50.0, 70.0, 100.0];
    let expected = reference_zncc(&valid_a, &valid_b, &[1.0; 5]);
    assert!(score != 0.0);
    assert!((score - expected).abs() < 1e-9, "{score} vs {expected}");
}

#[test]
fn coverage_guard_uses_weights() {
    // Invalid pairs carry weight 3, valid ones weight 1: 4/7 valid by count,
    // but only 4/13 by weight.
    let a = [0u8, 0, 0, 10, 200, 30, 90];
    let b = [1u8, 2, 3, 20, 180, 50, 70];
    let weights = [3.0f32, 3.0, 3.0, 1.0, 1.0, 1.0, 1.0];
    let va = ImageView::from_slice(&a, 7, 1).unwrap();
    let vb = ImageView::from_slice(&b, 7, 1).unwrap();
    let region = Region::full(7, 1);
    let score = compute(
        va.into(),
        region,
        vb.into(),
        region,
        Some(WeightMap::new(&weights)),
        &ZnccConfig::default(),
    )
    .unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn disabled_sentinels_use_every_pair() {
    let a = [0u8, 255, 0, 10, 200, 30];
    let b = [5u8, 60, 7, 20, 180, 50];
    let va = ImageView::from_slice(&a, 3, 2).unwrap();
    let vb = ImageView::from_slice(&b, 3, 2).unwrap();
    let region = Region::full(3, 2);
    let cfg = ZnccConfig {
        sentinels: SentinelMode::Disabled,
    };
    let score = compute(va.into(), region, vb.into(), region, None, &cfg).unwrap();

    let fa: Vec<f64> = a.iter().map(|&v| f64::from(v)).collect();
    let fb: Vec<f64> = b.iter().map(|&v| f64::from(v)).collect();
    let expected = reference_zncc(&fa, &fb, &[1.0; 6]);
    assert!((score - expected).abs() < 1e-9);
}

#[test]
fn single_weighted_pixel_is_degenerate() {
    let a = [10u8, 20, 30, 40];
    let b = [15u8, 5, 35, 45];
    let weights = [0.0f32, 0.0, 1.0, 0.0];
    let va = ImageView::from_slice(&a, 2, 2).unwrap();
    let vb = ImageView::from_slice(&b, 2, 2).unwrap();
    let region = Region::full(2, 2);
    let score = compute(
        va.into(),
        region,
        vb.into(),
        region,
        Some(WeightMap::new(&weights)),
        &ZnccConfig::default(),
    )
    .unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn constant_region_scores_zero() {
    let a = vec![0.25f32; 9];
    let b: Vec<f32> = (0..9).map(|v| v as f32).collect();
    let va = ImageView::from_slice(&a, 3, 3).unwrap();
    let vb = ImageView::from_slice(&b, 3, 3).unwrap();
    let region = Region::full(3, 3);
    let score =
        compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default()).unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn empty_overlap_scores_zero() {
    let a = [1u8, 2, 3, 4];
    let va = ImageView::from_slice(&a, 2, 2).unwrap();
    let cfg = ZnccConfig::default();
    let disjoint = compute(
        va.into(),
        Region::new(5, 0, 2, 2),
        va.into(),
        Region::full(2, 2),
        None,
        &cfg,
    )
    .unwrap();
    assert_eq!(disjoint, 0.0);

    let zero_area = compute(
        va.into(),
        Region::new(0, 0, 0, 2),
        va.into(),
        Region::new(1, 0, 0, 2),
        None,
        &cfg,
    )
    .unwrap();
    assert_eq!(zero_area, 0.0);
}

#[test]
fn all_invalid_pairs_score_zero() {
    let a = [0u8, 255, 0, 255];
    let b = [1u8, 2, 3, 4];
    let va = ImageView::from_slice(&a, 2, 2).unwrap();
    let vb = ImageView::from_slice(&b, 2, 2).unwrap();
    let region = Region::full(2, 2);
    let score =
        compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default()).unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn boolean_samples_are_all_sentinels_unless_disabled() {
    let a = [true, false, false, true, true, false];
    let b = [true, false, true, true, true, false];
    let va = ImageView::from_slice(&a, 3, 2).unwrap();
    let vb = ImageView::from_slice(&b, 3, 2).unwrap();
    let region = Region::full(3, 2);

    let auto = compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default());
    assert_eq!(auto, Ok(0.0));

    let cfg = ZnccConfig {
        sentinels: SentinelMode::Disabled,
    };
    let score = compute(va.into(), region, vb.into(), region, None, &cfg).unwrap();
    let fa: Vec<f64> = a.iter().map(|&v| f64::from(u8::from(v))).collect();
    let fb: Vec<f64> = b.iter().map(|&v| f64::from(u8::from(v))).collect();
    let expected = reference_zncc(&fa, &fb, &[1.0; 6]);
    assert!((score - expected).abs() < 1e-12);
}

#[test]
fn signed_sentinels_are_type_extremes() {
    let a = [-128i8, 5, -7, 40, 127, 12, -30, 60];
    let b = [3i8, 9, -2, 35, 1, 15, -20, 55];
    let va = ImageView::from_slice(&a, 4, 2).unwrap();
    let vb = ImageView::from_slice(&b, 4, 2).unwrap();
    let region = Region::full(4, 2);
    let score =
        compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default()).unwrap();

    let fa = [5.0, -7.0, 40.0, 12.0, -30.0, 60.0];
    let fb = [9.0, -2.0, 35.0, 15.0, -20.0, 55.0];
    let expected = reference_zncc(&fa, &fb, &[1.0; 6]);
    assert!((score - expected).abs() < 1e-9);
}

#[test]
fn wide_unsigned_samples_do_not_overflow() {
    let a = [60000u16, 1, 65000, 30000, 2, 64000];
    let b = [59000u16, 3, 64500, 31000, 5, 65534];
    let va = ImageView::from_slice(&a, 3, 2).unwrap();
    let vb = ImageView::from_slice(&b, 3, 2).unwrap();
    let region = Region::full(3, 2);
    let score =
        compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default()).unwrap();
    let fa: Vec<f64> = a.iter().map(|&v| f64::from(v)).collect();
    let fb: Vec<f64> = b.iter().map(|&v| f64::from(v)).collect();
    let expected = reference_zncc(&fa, &fb, &[1.0; 6]);
    assert!(score > 0.99);
    assert!((score - expected).abs() < 1e-9);
}

#[test]
fn mismatched_depths_are_rejected() {
    let a = [1u8, 2, 3, 4];
    let b = [1i8, 2, 3, 4];
    let va = ImageView::from_slice(&a, 2, 2).unwrap();
    let vb = ImageView::from_slice(&b, 2, 2).unwrap();
    let region = Region::full(2, 2);
    let err = compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default())
        .err()
        .unwrap();
    assert_eq!(
        err,
        ZnccError::DepthMismatch {
            expected: Depth::U8,
            got: Depth::I8,
        }
    );
}

#[test]
fn mismatched_channels_are_rejected() {
    let a = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let va = ImageView::new_interleaved(&a, 2, 2, 4, 2).unwrap();
    let vb = ImageView::from_slice(&a[..4], 2, 2).unwrap();
    let region = Region::full(2, 2);
    let err = compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default())
        .err()
        .unwrap();
    assert_eq!(err, ZnccError::ChannelMismatch { left: 2, right: 1 });
}

#[test]
fn mismatched_region_shapes_are_rejected() {
    let a = [1u8; 16];
    let va = ImageView::from_slice(&a, 4, 4).unwrap();
    let err = compute(
        va.into(),
        Region::new(0, 0, 2, 2),
        va.into(),
        Region::new(0, 0, 3, 2),
        None,
        &ZnccConfig::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, ZnccError::RegionShapeMismatch { .. }));
}

#[test]
fn float_samples_reject_forced_sentinels() {
    let a = [0.0f32, 1.0, 2.0, 3.0];
    let va = ImageView::from_slice(&a, 2, 2).unwrap();
    let region = Region::full(2, 2);
    let cfg = ZnccConfig {
        sentinels: SentinelMode::Enabled,
    };
    let err = compute(va.into(), region, va.into(), region, None, &cfg)
        .err()
        .unwrap();
    assert_eq!(err, ZnccError::SentinelsUnsupported { depth: Depth::F32 });

    // Auto never excludes float samples, even at 0.0.
    let score = compute(va.into(), region, va.into(), region, None, &ZnccConfig::default());
    assert!((score.unwrap() - 1.0).abs() < TOL);
}

#[test]
fn typed_path_rejects_every_other_depth() {
    let bools = OwnedImage::new(vec![true, false, true, false], 2, 2).unwrap();
    let u8s = OwnedImage::new(vec![1u8, 2, 3, 4], 2, 2).unwrap();
    let i8s = OwnedImage::new(vec![1i8, 2, 3, 4], 2, 2).unwrap();
    let u16s = OwnedImage::new(vec![1u16, 2, 3, 4], 2, 2).unwrap();
    let i16s = OwnedImage::new(vec![1i16, 2, 3, 4], 2, 2).unwrap();
    let f32s = OwnedImage::new(vec![1.0f32, 2.0, 3.0, 4.0], 2, 2).unwrap();
    let views: Vec<AnyImageView<'_>> = vec![
        bools.view().into(),
        u8s.view().into(),
        i8s.view().into(),
        u16s.view().into(),
        i16s.view().into(),
        f32s.view().into(),
    ];
    let region = Region::full(2, 2);
    let cfg = ZnccConfig::default();

    fn check<T: zncc_rot::Sample>(
        views: &[AnyImageView<'_>],
        region: Region,
        cfg: &ZnccConfig,
    ) {
        for &view in views {
            let result = compute_as::<T>(view, region, view, region, None, cfg);
            if view.depth() == T::DEPTH {
                assert!(result.is_ok(), "{} should be accepted", T::DEPTH);
            } else {
                assert_eq!(
                    result.err(),
                    Some(ZnccError::DepthMismatch {
                        expected: T::DEPTH,
                        got: view.depth(),
                    })
                );
            }
        }
    }

    check::<bool>(&views, region, &cfg);
    check::<u8>(&views, region, &cfg);
    check::<i8>(&views, region, &cfg);
    check::<u16>(&views, region, &cfg);
    check::<i16>(&views, region, &cfg);
    check::<f32>(&views, region, &cfg);
}

#[test]
fn multichannel_samples_are_correlated_together() {
    let a = [10u8, 50, 20, 60, 30, 70, 40, 80];
    let b = [12u8, 49, 21, 62, 29, 71, 44, 79];
    let va = ImageView::new_interleaved(&a, 2, 2, 4, 2).unwrap();
    let vb = ImageView::new_interleaved(&b, 2, 2, 4, 2).unwrap();
    let region = Region::full(2, 2);
    let score =
        compute(va.into(), region, vb.into(), region, None, &ZnccConfig::default()).unwrap();
    let fa: Vec<f64> = a.iter().map(|&v| f64::from(v)).collect();
    let fb: Vec<f64> = b.iter().map(|&v| f64::from(v)).collect();
    let expected = reference_zncc(&fa, &fb, &[1.0; 8]);
    assert!((score - expected).abs() < 1e-9);
}

#[test]
fn small_spread_float_region_is_not_constant() {
    let data: Vec<f32> = (0..9).map(|i| 1000.0 + i as f32 * 0.0001).collect();
    let view = ImageView::from_slice(&data, 3, 3).unwrap();
    let region = Region::full(3, 3);
    let score = compute(
        view.into(),
        region,
        view.into(),
        region,
        None,
        &ZnccConfig::default(),
    )
    .unwrap();
    assert!((score - 1.0).abs() < 1e-6, "score = {score}");
}

#[test]
fn weights_are_consumed_over_the_clipped_overlap() {
    let a = [10u8, 200, 30, 7, 90, 60, 5, 3];
    let b = [9u8, 20, 180, 40, 8, 70, 100, 6];
    let va = ImageView::from_slice(&a, 4, 2).unwrap();
    let vb = ImageView::from_slice(&b, 4, 2).unwrap();
    // Clipping the negative x origin leaves two columns: a[0..2] against b[1..3].
    let r1 = Region::new(-1, 0, 3, 2);
    let r2 = Region::new(0, 0, 3, 2);
    let weights = [1.0f32, 2.0, 3.0, 4.0, 50.0, 60.0];
    let cfg = ZnccConfig::default();
    let score = compute(
        va.into(),
        r1,
        vb.into(),
        r2,
        Some(WeightMap::new(&weights)),
        &cfg,
    )
    .unwrap();

    let expected = reference_zncc(
        &[10.0, 200.0, 90.0, 60.0],
        &[20.0, 180.0, 70.0, 100.0],
        &[1.0, 2.0, 3.0, 4.0],
    );
    assert!((score - expected).abs() < 1e-9, "{score} vs {expected}");

    // The map is sized by the declared region, not the clipped one.
    let err = compute(
        va.into(),
        r1,
        vb.into(),
        r2,
        Some(WeightMap::new(&weights[..4])),
        &cfg,
    )
    .err()
    .unwrap();
    assert_eq!(err, ZnccError::WeightMapLength { needed: 6, got: 4 });
}
