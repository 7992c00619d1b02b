//! End-to-end dispatch tests over mock and reference chain models.

use approx::assert_relative_eq;

use marionette_core::{MatrixLayout, ModelConfig, SlotShape, Value, reindex};
use marionette_dispatch::{ComponentKind, DispatchError, Dispatcher};
use marionette_model::ChainModel;
use marionette_test_utils::{MockModel, deterministic_matrix, random_configuration};

fn mock_dispatcher(dof: usize) -> Dispatcher {
    Dispatcher::with_model(Box::new(MockModel::new(dof)))
}

fn chain_dispatcher() -> Dispatcher {
    let toml = r#"
        name = "biped_leg"
        base_mass = 10.0

        [[joints]]
        name = "hip"
        origin_xyz = [0.0, 0.1, -0.05]
        axis = [0.0, 1.0, 0.0]
        lower = -1.57
        upper = 1.57
        mass = 2.0

        [[joints]]
        name = "knee"
        origin_xyz = [0.0, 0.0, -0.35]
        axis = [0.0, 1.0, 0.0]
        lower = -2.2
        upper = 0.1
        mass = 1.2

        [[joints]]
        name = "rightFoot"
        origin_xyz = [0.0, 0.0, -0.35]
        axis = [0.0, 1.0, 0.0]
        lower = -0.8
        upper = 0.8
        mass = 0.4
    "#;
    let config = ModelConfig::from_toml_str(toml).unwrap();
    let model = ChainModel::from_config(&config).unwrap();
    Dispatcher::with_model(Box::new(model))
}

// ---------------------------------------------------------------------------
// Joint limits
// ---------------------------------------------------------------------------

#[test]
fn joint_limits_are_dof_length_and_ordered() {
    for dof in [0usize, 1, 6, 25] {
        let mut d = mock_dispatcher(dof);
        let slots = d.dispatch("joint-limits", 2, &[]).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].shape(), SlotShape::Vector { len: dof });
        assert_eq!(slots[1].shape(), SlotShape::Vector { len: dof });
        for i in 0..dof {
            assert!(slots[0].as_slice()[i] <= slots[1].as_slice()[i]);
        }
    }
}

#[test]
fn chain_joint_limits_come_from_config() {
    let mut d = chain_dispatcher();
    let slots = d.dispatch("joint-limits", 2, &[]).unwrap();
    assert_relative_eq!(slots[0].as_slice()[1], -2.2);
    assert_relative_eq!(slots[1].as_slice()[2], 0.8);
}

// ---------------------------------------------------------------------------
// Jacobian
// ---------------------------------------------------------------------------

#[test]
fn jacobian_dof3_shape_and_reindexing() {
    let mut d = mock_dispatcher(3);
    let args = vec![Value::vector(vec![0.0; 3]), Value::name("rightFoot")];
    let slots = d.dispatch("jacobian", 1, &args).unwrap();

    assert_eq!(slots[0].shape(), SlotShape::Matrix { rows: 6, cols: 9 });

    // Mock source (row-major) element (2, 5) is 100*2 + 5; it must land at
    // the column-major flat index 5*6 + 2 and read back identically.
    let src_index = MatrixLayout::RowMajor.linear_index(6, 9, 2, 5);
    let dst_index = MatrixLayout::ColMajor.linear_index(6, 9, 2, 5);
    assert_eq!(src_index, 2 * 9 + 5);
    assert_eq!(dst_index, 5 * 6 + 2);
    assert_eq!(slots[0].as_slice()[dst_index], 205.0);
    assert_eq!(slots[0].element(2, 5), 205.0);
}

#[test]
fn jacobian_zero_dof_is_well_formed() {
    let mut d = mock_dispatcher(0);
    let args = vec![Value::vector(Vec::new()), Value::name("base")];
    let slots = d.dispatch("jacobian", 1, &args).unwrap();
    assert_eq!(slots[0].shape(), SlotShape::Matrix { rows: 6, cols: 6 });
}

#[test]
fn jacobian_conversion_round_trips_arbitrary_payloads() {
    // The slot conversion must be a bijection on every Jacobian shape the
    // dispatcher can allocate, not just the structured mock pattern.
    for (dof, seed) in [(0usize, 3u64), (1, 5), (6, 11), (25, 13)] {
        let rows = 6;
        let cols = 6 + dof;
        let original = deterministic_matrix(rows, cols, seed);
        let mut converted = vec![0.0; rows * cols];
        let mut back = vec![0.0; rows * cols];

        reindex(
            rows,
            cols,
            MatrixLayout::RowMajor,
            MatrixLayout::ColMajor,
            &original,
            &mut converted,
        );
        reindex(
            rows,
            cols,
            MatrixLayout::ColMajor,
            MatrixLayout::RowMajor,
            &converted,
            &mut back,
        );
        assert_eq!(back, original, "round trip failed for dof={dof}");
    }
}

#[test]
fn chain_jacobian_base_partition_preserved() {
    let mut d = chain_dispatcher();
    let args = vec![Value::vector(vec![0.0; 3]), Value::name("rightFoot")];
    let slots = d.dispatch("jacobian", 1, &args).unwrap();

    // Base translation block stays the identity after conversion.
    for a in 0..3 {
        for r in 0..3 {
            let expected = if r == a { 1.0 } else { 0.0 };
            assert_relative_eq!(slots[0].element(r, a), expected, epsilon = 1e-12);
        }
    }
    // Joint columns carry the Y axis in the angular rows.
    for c in 6..9 {
        assert_relative_eq!(slots[0].element(4, c), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn jacobian_unknown_frame_makes_no_query() {
    let model = MockModel::new(3);
    let probe = model.probe();
    let mut d = Dispatcher::with_model(Box::new(model));

    let args = vec![Value::vector(vec![0.0; 3]), Value::name("leftAntenna")];
    let err = d.dispatch("jacobian", 1, &args).unwrap_err();
    assert!(matches!(err, DispatchError::Shape(_)));
    assert_eq!(probe.jacobian_calls(), 0);
}

// ---------------------------------------------------------------------------
// Mass matrix
// ---------------------------------------------------------------------------

#[test]
fn mass_matrix_wrong_length_fails_without_model_query() {
    let model = MockModel::new(4);
    let probe = model.probe();
    let mut d = Dispatcher::with_model(Box::new(model));

    let err = d
        .dispatch("mass-matrix", 1, &[Value::vector(vec![0.0; 3])])
        .unwrap_err();
    assert!(matches!(err, DispatchError::Shape(_)));
    assert_eq!(probe.mass_matrix_calls(), 0);

    let slots = d
        .dispatch("mass-matrix", 1, &[Value::vector(vec![0.0; 4])])
        .unwrap();
    assert_eq!(slots[0].shape(), SlotShape::Matrix { rows: 10, cols: 10 });
    assert_eq!(probe.mass_matrix_calls(), 1);
}

#[test]
fn chain_mass_matrix_is_symmetric() {
    let mut d = chain_dispatcher();
    let q = random_configuration(3, 42);
    let slots = d.dispatch("mass-matrix", 1, &[Value::vector(q)]).unwrap();
    let n = 9;
    for r in 0..n {
        for c in 0..n {
            assert_relative_eq!(
                slots[0].element(r, c),
                slots[0].element(c, r),
                epsilon = 1e-10
            );
        }
    }
    // Translational diagonal carries the total mass.
    assert_relative_eq!(slots[0].element(0, 0), 13.6, epsilon = 1e-10);
}

// ---------------------------------------------------------------------------
// Arity discipline
// ---------------------------------------------------------------------------

#[test]
fn wrong_output_count_always_fails_and_allocates_nothing() {
    let mut d = mock_dispatcher(3);
    for kind in ComponentKind::ALL {
        let wrong = kind.output_arity() + 1;
        let err = d.dispatch(kind.name(), wrong, &[]).unwrap_err();
        assert!(matches!(err, DispatchError::Arity(_)), "kind {kind:?}");
    }
}

// ---------------------------------------------------------------------------
// Model initialise
// ---------------------------------------------------------------------------

#[test]
fn model_initialise_idempotent_through_dispatch() {
    let model = MockModel::new(3);
    let probe = model.probe();
    let mut d = Dispatcher::with_model(Box::new(model));

    d.dispatch("model-initialise", 0, &[]).unwrap();
    let dof_once = d.state().dof().unwrap();
    d.dispatch("model-initialise", 0, &[]).unwrap();

    assert_eq!(probe.initialise_calls(), 2);
    assert_eq!(d.state().dof().unwrap(), dof_once);

    // Observable queries agree before/after the second initialise.
    let limits = d.dispatch("joint-limits", 2, &[]).unwrap();
    assert_eq!(limits[0].as_slice(), [-1.0, -2.0, -3.0]);
}

#[test]
fn chain_initialise_twice_preserves_queries() {
    let mut d = chain_dispatcher();
    let before = d.dispatch("joint-limits", 2, &[]).unwrap();
    d.dispatch("model-initialise", 0, &[]).unwrap();
    d.dispatch("model-initialise", 0, &[]).unwrap();
    let after = d.dispatch("joint-limits", 2, &[]).unwrap();
    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// Forward kinematics and bias forces
// ---------------------------------------------------------------------------

#[test]
fn forward_kinematics_pose_shape() {
    let mut d = chain_dispatcher();
    let args = vec![Value::vector(vec![0.0; 3]), Value::name("rightFoot")];
    let slots = d.dispatch("forward-kinematics", 1, &args).unwrap();
    assert_eq!(slots[0].shape(), SlotShape::Vector { len: 7 });
    // Straight leg: foot sits at the summed origin offsets.
    assert_relative_eq!(slots[0].as_slice()[1], 0.1, epsilon = 1e-12);
    assert_relative_eq!(slots[0].as_slice()[2], -0.75, epsilon = 1e-12);
    // Unit quaternion, identity orientation.
    assert_relative_eq!(slots[0].as_slice()[3], 1.0, epsilon = 1e-12);
}

#[test]
fn bias_forces_balance_total_weight() {
    let mut d = chain_dispatcher();
    let args = vec![
        Value::vector(vec![0.0; 3]),
        Value::vector(vec![0.0; 3]),
    ];
    let slots = d.dispatch("bias-forces", 1, &args).unwrap();
    assert_eq!(slots[0].shape(), SlotShape::Vector { len: 9 });
    assert_relative_eq!(slots[0].as_slice()[2], 9.81 * 13.6, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Fast path
// ---------------------------------------------------------------------------

#[test]
fn fast_path_matches_compute_with_stable_inputs() {
    let mut d = chain_dispatcher();
    let args = vec![
        Value::vector(random_configuration(3, 9)),
        Value::name("knee"),
    ];
    let slow = d.dispatch("jacobian", 1, &args).unwrap();
    let fast = d.dispatch_fast("jacobian", 1).unwrap();
    assert_eq!(slow, fast);
}

#[test]
fn fast_path_unprimed_after_reset() {
    let mut d = chain_dispatcher();
    let args = vec![Value::vector(vec![0.0; 3]), Value::name("hip")];
    d.dispatch("jacobian", 1, &args).unwrap();
    d.reset_components();
    let err = d.dispatch_fast("jacobian", 1).unwrap_err();
    assert!(matches!(err, DispatchError::FastPathUnprimed(_)));
}
