//! Contract tests shared by both colocalizers: partition completeness,
//! deterministic ordering, and reference/bucketed agreement on hand-built
//! scenes.

use std::collections::HashSet;

use rustcoloc_algorithms::{
    BucketedColocalizer, BucketedConfig, CellRegion, ColocalizationResult, DistanceCriterion,
    RatioCriterion, ReferenceColocalizer, SubsetCriterion,
};

fn square(x0: i32, y0: i32, side: i32) -> CellRegion {
    (x0..x0 + side)
        .flat_map(|x| (y0..y0 + side).map(move |y| (x, y)))
        .collect()
}

fn config(bucket_side: usize) -> BucketedConfig {
    BucketedConfig {
        bucket_side,
        image_width: 256,
        image_height: 256,
        parallel: false,
    }
}

fn assert_partitions_overlaid(result: &ColocalizationResult, overlaid: &[CellRegion]) {
    assert_eq!(result.overlaid_count(), overlaid.len());
    let matched: HashSet<&CellRegion> = result.matched_overlaid.iter().collect();
    let unmatched: HashSet<&CellRegion> = result.unmatched_overlaid.iter().collect();
    assert!(matched.is_disjoint(&unmatched));
    for region in overlaid {
        assert!(matched.contains(region) || unmatched.contains(region));
    }
}

/// A small scene with matched, unmatched, and shared-base regions.
fn scene() -> (Vec<CellRegion>, Vec<CellRegion>) {
    let base = vec![
        square(10, 10, 6),
        square(40, 40, 6),
        square(200, 200, 6),
        square(100, 12, 6),
    ];
    let overlaid = vec![
        square(12, 12, 6),  // overlaps base[0]
        square(42, 38, 6),  // overlaps base[1]
        square(150, 150, 6), // matches nothing
        square(11, 11, 6),  // overlaps base[0] again
    ];
    (base, overlaid)
}

#[test]
fn test_reference_partition_property() {
    let (base, overlaid) = scene();
    let colocalizer = ReferenceColocalizer::new(RatioCriterion::new(0.05).unwrap());
    let result = colocalizer.analyze(&base, &overlaid);
    assert_partitions_overlaid(&result, &overlaid);
    assert_eq!(result.unmatched_overlaid, vec![overlaid[2].clone()]);
}

#[test]
fn test_bucketed_matches_reference_on_scene() {
    let (base, overlaid) = scene();
    let criterion = RatioCriterion::new(0.05).unwrap();
    let reference = ReferenceColocalizer::new(criterion).analyze(&base, &overlaid);
    let bucketed = BucketedColocalizer::new(criterion, config(16))
        .unwrap()
        .analyze(&base, &overlaid);
    assert_eq!(reference, bucketed);
    assert_partitions_overlaid(&bucketed, &overlaid);
}

#[test]
fn test_bucketed_matches_reference_with_subset_criterion() {
    let (base, overlaid) = scene();
    let criterion = SubsetCriterion::new(0.2).unwrap();
    let reference = ReferenceColocalizer::new(criterion).analyze(&base, &overlaid);
    let bucketed = BucketedColocalizer::new(criterion, config(16))
        .unwrap()
        .analyze(&base, &overlaid);
    assert_eq!(reference, bucketed);
}

#[test]
fn test_bucketed_matches_reference_with_distance_criterion() {
    let (base, overlaid) = scene();
    let criterion = DistanceCriterion::new(10.0).unwrap();
    let reference = ReferenceColocalizer::new(criterion).analyze(&base, &overlaid);
    let bucketed = BucketedColocalizer::new(criterion, config(16))
        .unwrap()
        .analyze(&base, &overlaid);
    assert_eq!(reference, bucketed);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let (base, overlaid) = scene();
    let criterion = RatioCriterion::new(0.05).unwrap();
    let sequential = BucketedColocalizer::new(criterion, config(16))
        .unwrap()
        .analyze(&base, &overlaid);
    let parallel = BucketedColocalizer::new(criterion, config(16))
        .unwrap()
        .with_parallel(true)
        .analyze(&base, &overlaid);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_output_ordering_is_input_ordering() {
    let (base, overlaid) = scene();
    let colocalizer = ReferenceColocalizer::new(RatioCriterion::new(0.05).unwrap());
    let result = colocalizer.analyze(&base, &overlaid);

    // overlaid[0], overlaid[1], overlaid[3] matched, in input order.
    assert_eq!(
        result.matched_overlaid,
        vec![overlaid[0].clone(), overlaid[1].clone(), overlaid[3].clone()]
    );
    // base[0] first encountered via overlaid[0], then base[1]; base[0] is
    // not repeated when overlaid[3] matches it again.
    assert_eq!(result.matched_base, vec![base[0].clone(), base[1].clone()]);
}

#[test]
fn test_shared_base_counted_once() {
    let base = vec![square(20, 20, 8)];
    let overlaid = vec![square(18, 18, 8), square(24, 24, 8)];
    let criterion = RatioCriterion::new(0.05).unwrap();
    let result = ReferenceColocalizer::new(criterion).analyze(&base, &overlaid);
    assert_eq!(result.matched_base.len(), 1);
    assert_eq!(result.matched_overlaid.len(), 2);
}
