//! Testes integrados para qstate-core

use crate::*;
use approx::assert_abs_diff_eq;
use std::f64::consts::FRAC_1_SQRT_2;

fn x_gate() -> QuantumOperator {
    QuantumOperator::new("X", [[0.0, 1.0], [1.0, 0.0]]).unwrap()
}

#[test]
fn test_basis_state_measurement() {
    let mut repo = StateRepository::new();
    assert!(repo.add_state("q0", [1.0, 0.0], "computational").unwrap());

    let probabilities = repo.measure_state("q0").unwrap().unwrap();
    assert_eq!(probabilities, vec![1.0, 0.0]);
}

#[test]
fn test_equal_superposition_measurement() {
    let mut repo = StateRepository::new();
    let amplitude = 1.0 / 2f64.sqrt();
    assert!(repo.add_state("q1", [amplitude, amplitude], "computational").unwrap());

    // Sem aviso de normalização
    assert!(repo.take_notices().is_empty());

    let probabilities = repo.measure_state("q1").unwrap().unwrap();
    assert_abs_diff_eq!(probabilities[0], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(probabilities[1], 0.5, epsilon = 1e-12);
}

#[test]
fn test_bit_flip_scenario() {
    let mut repo = StateRepository::new();
    repo.add_state("q0", [1.0, 0.0], "computational").unwrap();
    assert!(repo.apply_operator("q0", &x_gate(), None).unwrap());

    let flipped = repo.get_state("q0_X").unwrap();
    assert_eq!(flipped.vector(), &[Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)]);
    assert_eq!(repo.ids().collect::<Vec<_>>(), vec!["q0", "q0_X"]);
}

#[test]
fn test_measurement_always_sums_to_one() {
    let vectors: Vec<Vec<Complex64>> = vec![
        vec![Complex64::new(1.0, 0.0)],
        vec![Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0)],
        vec![Complex64::new(1e-9, 0.0), Complex64::new(0.0, 0.0), Complex64::new(0.0, -2e-9)],
        vec![Complex64::new(10.0, -7.5); 8],
        vec![Complex64::new(FRAC_1_SQRT_2, 0.0), Complex64::new(0.0, FRAC_1_SQRT_2)],
    ];

    for (i, vector) in vectors.into_iter().enumerate() {
        let state = QuantumState::new(format!("s{i}"), vector, "computational").unwrap();
        let probabilities = state.measure().unwrap();
        assert_eq!(probabilities.len(), state.dimension());
        assert_abs_diff_eq!(probabilities.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_identity_operator_preserves_state() {
    let identity = QuantumOperator::new("Id", [[1.0, 0.0], [0.0, 1.0]]).unwrap();
    let mut repo = StateRepository::new();
    repo.add_state("psi", [Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)], "computational")
        .unwrap();

    assert!(repo.apply_operator("psi", &identity, None).unwrap());

    let original = repo.get_state("psi").unwrap().clone();
    let copy = repo.get_state("psi_Id").unwrap();
    assert_eq!(copy.vector(), original.vector());
    assert_eq!(copy.basis(), original.basis());
}

#[test]
fn test_chained_operators() {
    let h = FRAC_1_SQRT_2;
    let hadamard = QuantumOperator::new("H", [[h, h], [h, -h]]).unwrap();

    let mut repo = StateRepository::new();
    repo.add_state("q0", [1.0, 0.0], "computational").unwrap();
    repo.apply_operator("q0", &hadamard, Some("plus")).unwrap();
    repo.apply_operator("plus", &x_gate(), None).unwrap();

    // X|+⟩ = |+⟩
    let state = repo.get_state("plus_X").unwrap();
    assert_abs_diff_eq!(state.vector()[0].re, h, epsilon = 1e-12);
    assert_abs_diff_eq!(state.vector()[1].re, h, epsilon = 1e-12);
    assert_eq!(repo.len(), 3);
}

#[test]
fn test_soft_failures_leave_repository_unchanged() {
    let mut repo = StateRepository::new();
    repo.add_state("A", [1.0, 0.0], "computational").unwrap();
    repo.add_state("A_X", [0.0, 1.0], "computational").unwrap();
    let before = repo.list_states();

    assert!(!repo.add_state("A", [0.0, 1.0], "computational").unwrap());
    assert!(!repo.apply_operator("A", &x_gate(), None).unwrap());
    assert!(!repo.apply_operator("B", &x_gate(), None).unwrap());
    assert_eq!(repo.measure_state("B").unwrap(), None);

    assert_eq!(repo.list_states(), before);
    let notices = repo.take_notices();
    assert_eq!(notices.len(), 4);
    assert!(notices.iter().all(Notice::is_error));
}
