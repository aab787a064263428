//! Tests for latent factor fitting and the decomposition contract.

use crate::config::ModelConfig;
use crate::error::Error;
use crate::factor::LatentFactorModel;
use crate::interactions::{EnrollmentRecord, Interactions};
use crate::svd;

fn sample_interactions() -> Interactions {
    let records = vec![
        EnrollmentRecord::new("a", ["w", "x"]),
        EnrollmentRecord::new("b", ["x", "y"]),
        EnrollmentRecord::new("c", ["y", "z", "w"]),
        EnrollmentRecord::new("d", ["z"]),
    ];
    Interactions::from_records(&records).expect("records are well-formed")
}

#[test]
fn fit_is_deterministic_for_identical_inputs() {
    let interactions = sample_interactions();
    let config = ModelConfig { rank: 2, seed: 42 };

    let first = LatentFactorModel::fit(&interactions, &config).unwrap();
    let second = LatentFactorModel::fit(&interactions, &config).unwrap();

    assert_eq!(first.user_factors(), second.user_factors());
    assert_eq!(first.course_factors(), second.course_factors());
}

#[test]
fn factor_shapes_match_rank() {
    let interactions = sample_interactions();
    let config = ModelConfig { rank: 3, seed: 42 };

    let model = LatentFactorModel::fit(&interactions, &config).unwrap();

    assert_eq!(model.rank(), 3);
    assert_eq!(model.user_factors().nrows(), interactions.user_count());
    assert_eq!(model.user_factors().ncols(), 3);
    assert_eq!(model.course_factors().nrows(), interactions.course_count());
    assert_eq!(model.course_factors().ncols(), 3);
    assert_eq!(model.user_vector(0).len(), 3);
    assert_eq!(
        model.score_courses(0).len(),
        interactions.course_count()
    );
}

#[test]
fn reconstruction_error_is_non_increasing_in_rank() {
    let interactions = sample_interactions();
    let mut previous = f64::INFINITY;

    for rank in 1..=4 {
        let config = ModelConfig { rank, seed: 42 };
        let model = LatentFactorModel::fit(&interactions, &config).unwrap();
        let error = model.reconstruction_error(&interactions);
        assert!(
            error <= previous + 1e-9,
            "reconstruction error grew at rank {rank}: {error} > {previous}"
        );
        previous = error;
    }
}

#[test]
fn full_rank_reconstruction_is_tight() {
    let interactions = sample_interactions();
    let config = ModelConfig { rank: 4, seed: 42 };

    let model = LatentFactorModel::fit(&interactions, &config).unwrap();

    assert!(model.reconstruction_error(&interactions) < 1e-8);
}

#[test]
fn different_seeds_both_approximate_well() {
    let interactions = sample_interactions();

    for seed in [0, 42, 1_234_567] {
        let config = ModelConfig { rank: 3, seed };
        let model = LatentFactorModel::fit(&interactions, &config).unwrap();
        // The sketch covers the full matrix at these sizes, so any seed
        // reaches the same (near-exact) truncated approximation.
        assert!(model.reconstruction_error(&interactions) < 2.0);
    }
}

#[test]
fn zero_rank_is_rejected() {
    let interactions = sample_interactions();
    let config = ModelConfig { rank: 0, seed: 42 };

    let err = LatentFactorModel::fit(&interactions, &config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn oversized_rank_is_rejected() {
    let interactions = sample_interactions();
    let config = ModelConfig { rank: 5, seed: 42 };

    let err = LatentFactorModel::fit(&interactions, &config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn singular_values_are_sorted_descending() {
    let interactions = sample_interactions();
    let decomposition = svd::truncated_svd(interactions.matrix(), 3, 42).unwrap();

    for window in decomposition.sigma.as_slice().windows(2) {
        assert!(window[0] >= window[1] - 1e-12);
    }
}

#[test]
fn singular_vector_columns_are_orthonormal() {
    let interactions = sample_interactions();
    let decomposition = svd::truncated_svd(interactions.matrix(), 3, 42).unwrap();

    let gram = decomposition.u.transpose() * &decomposition.u;
    for row in 0..gram.nrows() {
        for column in 0..gram.ncols() {
            let expected = if row == column { 1.0 } else { 0.0 };
            assert!(
                (gram[(row, column)] - expected).abs() < 1e-9,
                "UᵀU deviates from identity at ({row}, {column})"
            );
        }
    }
}

#[test]
fn all_zero_user_row_maps_to_zero_factors() {
    // "b" has no enrollments, so their matrix row is all zeros.
    let records = vec![
        EnrollmentRecord::new("a", ["w", "x"]),
        EnrollmentRecord::new("b", Vec::<String>::new()),
    ];
    let interactions = Interactions::from_records(&records).unwrap();
    let config = ModelConfig { rank: 1, seed: 42 };

    let model = LatentFactorModel::fit(&interactions, &config).unwrap();
    let idle_row = interactions.user_index("b").unwrap();
    for value in model.user_vector(idle_row).iter() {
        assert!(value.abs() < 1e-9, "zero row must map to a zero latent vector");
    }
}
