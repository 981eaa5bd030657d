//! Unit tests for planted-partition generation.

use super::{PlantedPartition, PlantedPartitionConfig, SyntheticError};
use rstest::{fixture, rstest};

fn base_config() -> PlantedPartitionConfig {
    PlantedPartitionConfig {
        block_count: 4,
        block_size: 10,
        p_in: 0.6,
        p_out: 0.02,
        seed: 3,
    }
}

#[fixture]
fn config() -> PlantedPartitionConfig {
    base_config()
}

#[rstest]
fn generation_is_deterministic(config: PlantedPartitionConfig) {
    let left = PlantedPartition::generate(&config).expect("first generation should succeed");
    let right = PlantedPartition::generate(&config).expect("second generation should succeed");
    assert_eq!(left.graph().edges(), right.graph().edges());
    assert_eq!(left.blocks(), right.blocks());
}

#[rstest]
fn blocks_label_contiguous_runs(config: PlantedPartitionConfig) {
    let planted = PlantedPartition::generate(&config).expect("generation should succeed");
    assert_eq!(planted.blocks().len(), 40);
    assert_eq!(planted.blocks().first(), Some(&0));
    assert_eq!(planted.blocks().last(), Some(&3));
    assert!(planted.blocks().windows(2).all(|pair| pair.first() <= pair.last()));
}

#[rstest]
fn isolated_blocks_never_cross(config: PlantedPartitionConfig) {
    let planted = PlantedPartition::generate(&PlantedPartitionConfig {
        p_in: 1.0,
        p_out: 0.0,
        ..config
    })
    .expect("generation should succeed");
    let blocks = planted.blocks();
    assert!(
        planted
            .graph()
            .edges()
            .iter()
            .all(|edge| blocks.get(edge.source()) == blocks.get(edge.target()))
    );
    assert_eq!(planted.graph().component_count(), 4);
}

#[rstest]
#[case::zero_blocks(PlantedPartitionConfig { block_count: 0, ..base_config() })]
#[case::zero_size(PlantedPartitionConfig { block_size: 0, ..base_config() })]
#[case::bad_probability(PlantedPartitionConfig { p_in: 1.5, ..base_config() })]
#[case::nan_probability(PlantedPartitionConfig { p_out: f64::NAN, ..base_config() })]
fn invalid_configs_are_rejected(#[case] invalid: PlantedPartitionConfig) {
    let err = PlantedPartition::generate(&invalid).expect_err("config must be rejected");
    assert!(matches!(
        err,
        SyntheticError::ZeroBlocks
            | SyntheticError::ZeroBlockSize
            | SyntheticError::InvalidProbability { .. }
    ));
}
