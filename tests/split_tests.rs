// Integration tests for train/test splitting

use std::collections::HashSet;

use ferrite_playground::dataset::{generate, generate_split, split, GenerationConfig, Shape};
use ferrite_playground::PlaygroundError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn circle(n: usize) -> ferrite_playground::Dataset {
    generate(&GenerationConfig::new(Shape::Circle, n), &mut StdRng::seed_from_u64(0)).unwrap()
}

#[test]
fn sizes_disjointness_and_coverage() {
    let ds = circle(500);
    for ratio in [0.1, 0.25, 0.5, 0.99] {
        let s = split(&ds, ratio, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(s.test.len(), (500.0 * ratio).floor() as usize);
        assert_eq!(s.train.len() + s.test.len(), 500);

        let train: HashSet<_> = s.train_indices.iter().copied().collect();
        let test: HashSet<_> = s.test_indices.iter().copied().collect();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.union(&test).count(), 500);
        assert!(train.iter().chain(&test).all(|&i| i < 500));
    }
}

#[test]
fn source_dataset_is_untouched() {
    let ds = circle(50);
    let before = ds.clone();
    let s = split(&ds, 0.2, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(ds, before);
    for (sample, &i) in s.train.samples().iter().zip(&s.train_indices) {
        assert_eq!(sample, &ds.samples()[i]);
    }
}

#[test]
fn equal_seeds_give_equal_splits() {
    let ds = circle(200);
    let a = split(&ds, 0.3, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = split(&ds, 0.3, &mut StdRng::seed_from_u64(9)).unwrap();
    let c = split(&ds, 0.3, &mut StdRng::seed_from_u64(10)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.test_indices, c.test_indices);
}

#[test]
fn ratios_outside_open_unit_interval_are_rejected() {
    let ds = circle(20);
    for ratio in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
        let err = split(&ds, ratio, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidArgument(_)), "ratio {ratio}");
    }
}

#[test]
fn generate_split_uses_config_ratio() {
    let cfg = GenerationConfig::new(Shape::Moons, 400).with_test_ratio(0.25);
    let s = generate_split(&cfg, &mut StdRng::seed_from_u64(4)).unwrap();
    assert_eq!((s.train.len(), s.test.len()), (300, 100));
    assert_eq!(s.train.class_count(), 2);
    assert!(generate_split(&cfg.with_test_ratio(1.0), &mut StdRng::seed_from_u64(4)).is_err());
}
