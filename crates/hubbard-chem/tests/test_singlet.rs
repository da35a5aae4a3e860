//! Tests for the UCCSD singlet evolution pipeline.

use hubbard_chem::{
    ChemError, FermionTransform, bravyi_kitaev, jordan_wigner, singlet_evolution,
    singlet_paramsize, singlet_terms, uccsd_singlet_generator,
};
use hubbard_ir::format_circuit;
use hubbard_sim::PauliString;
use proptest::prelude::*;

fn amplitudes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.1 * (i as f64 + 1.0) - 0.35).collect()
}

fn transforms() -> [&'static FermionTransform; 2] {
    [&jordan_wigner, &bravyi_kitaev]
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn bogus_mode_is_rejected() {
    let amps = amplitudes(2);
    let err = singlet_evolution(&amps, 4, 2, &jordan_wigner, "magnus", 1);
    assert!(matches!(err, Err(ChemError::InvalidTrotterMode(ref m)) if m == "magnus"));
}

#[test]
fn zero_reps_is_rejected() {
    let amps = amplitudes(2);
    let err = singlet_evolution(&amps, 4, 2, &jordan_wigner, "suzuki", 0);
    assert!(matches!(err, Err(ChemError::Sim(_))));
}

#[test]
fn odd_qubits_is_rejected() {
    assert!(matches!(
        singlet_paramsize(7, 2),
        Err(ChemError::OddSpinOrbitals(7))
    ));
    assert!(matches!(
        singlet_evolution(&[], 7, 2, &jordan_wigner, "lie", 1),
        Err(ChemError::OddSpinOrbitals(7))
    ));
}

#[test]
fn short_amplitudes_are_rejected() {
    let n = singlet_paramsize(6, 2).unwrap();
    let err = singlet_evolution(&amplitudes(n - 1), 6, 2, &jordan_wigner, "lie", 1);
    assert!(matches!(err, Err(ChemError::AmplitudeCount { .. })));
}

// ---------------------------------------------------------------------------
// Trotter modes
// ---------------------------------------------------------------------------

#[test]
fn lie_and_trotter_are_the_same_mode() {
    let amps = amplitudes(singlet_paramsize(6, 2).unwrap());
    let lie = singlet_evolution(&amps, 6, 2, &jordan_wigner, "lie", 2)
        .unwrap()
        .definition()
        .unwrap();
    let trotter = singlet_evolution(&amps, 6, 2, &jordan_wigner, "trotter", 2)
        .unwrap()
        .definition()
        .unwrap();
    assert_eq!(format_circuit(&lie), format_circuit(&trotter));
}

#[test]
fn suzuki_differs_from_lie() {
    let amps = amplitudes(singlet_paramsize(6, 2).unwrap());
    let lie = singlet_evolution(&amps, 6, 2, &jordan_wigner, "lie", 1)
        .unwrap()
        .definition()
        .unwrap();
    let suzuki = singlet_evolution(&amps, 6, 2, &jordan_wigner, "suzuki", 1)
        .unwrap()
        .definition()
        .unwrap();
    assert_ne!(format_circuit(&lie), format_circuit(&suzuki));
}

#[test]
fn evolution_is_deterministic() {
    let amps = amplitudes(singlet_paramsize(8, 4).unwrap());
    for transform in transforms() {
        let a = singlet_evolution(&amps, 8, 4, transform, "suzuki", 2)
            .unwrap()
            .definition()
            .unwrap();
        let b = singlet_evolution(&amps, 8, 4, transform, "suzuki", 2)
            .unwrap()
            .definition()
            .unwrap();
        assert_eq!(format_circuit(&a), format_circuit(&b));
    }
}

#[test]
fn fully_occupied_register_gives_identity() {
    // No virtual orbitals: zero amplitudes, empty generator.
    let gate = singlet_evolution(&[], 4, 4, &jordan_wigner, "suzuki", 2).unwrap();
    let circuit = gate.definition().unwrap();
    assert_eq!(circuit.num_qubits(), 4);
    assert_eq!(circuit.num_operations(), 0);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_problem() -> impl Strategy<Value = (u32, u32, Vec<f64>)> {
    (2_u32..=4)
        .prop_flat_map(|spatial| (Just(spatial * 2), 0..=spatial * 2))
        .prop_flat_map(|(n_qubits, n_electrons)| {
            let n = singlet_paramsize(n_qubits, n_electrons).unwrap_or(0);
            (
                Just(n_qubits),
                Just(n_electrons),
                prop::collection::vec(-1.0_f64..1.0, n),
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every label spans the whole register and coefficients survive compression.
    #[test]
    fn labels_span_register((n_qubits, n_electrons, amps) in arb_problem()) {
        for transform in transforms() {
            let (labels, coeffs) = singlet_terms(&amps, n_qubits, n_electrons, transform).unwrap();
            prop_assert_eq!(labels.len(), coeffs.len());
            for label in &labels {
                prop_assert_eq!(label.len(), n_qubits as usize);
                prop_assert!(label.chars().all(|c| "IXYZ".contains(c)));
            }
            prop_assert!(coeffs.iter().all(|c| c.abs() > 1e-8));
        }
    }

    /// Labels follow the sorted term keys of the mapped generator, each
    /// letter for qubit `i` sits at position `n - 1 - i`, and the
    /// coefficient is the imaginary part of the source term.
    #[test]
    fn labels_follow_sorted_mapped_terms((n_qubits, n_electrons, amps) in arb_problem()) {
        let generator = uccsd_singlet_generator(&amps, n_qubits, n_electrons).unwrap();
        for transform in transforms() {
            let mapped = transform(&generator);
            let (labels, coeffs) = singlet_terms(&amps, n_qubits, n_electrons, transform).unwrap();

            let mut previous: Option<PauliString> = None;
            for (label, coeff) in labels.iter().zip(&coeffs) {
                let key = PauliString::from_label(label).unwrap();
                if let Some(prev) = &previous {
                    prop_assert!(prev < &key, "{:?} !< {:?}", prev, key);
                }

                let chars: Vec<char> = label.chars().collect();
                let mut touched = vec![false; n_qubits as usize];
                for &(qubit, op) in key.ops() {
                    let position = n_qubits as usize - 1 - qubit as usize;
                    prop_assert_eq!(chars[position], op.label());
                    touched[position] = true;
                }
                for (position, c) in chars.iter().enumerate() {
                    if !touched[position] {
                        prop_assert_eq!(*c, 'I');
                    }
                }

                let source = mapped.coefficient(&key);
                prop_assert!(source.is_some(), "{} missing from mapped generator", label);
                if let Some(source) = source {
                    prop_assert_eq!(*coeff, source.im);
                }
                previous = Some(key);
            }
        }
    }

    /// The mapped generator is anti-Hermitian, so its real parts vanish.
    #[test]
    fn mapped_generator_is_imaginary((n_qubits, n_electrons, amps) in arb_problem()) {
        let generator = uccsd_singlet_generator(&amps, n_qubits, n_electrons).unwrap();
        for transform in transforms() {
            for (_, c) in transform(&generator).terms() {
                prop_assert!(c.re.abs() < 1e-10);
            }
        }
    }

    /// The evolution circuit acts on exactly the requested register.
    #[test]
    fn circuit_width_matches((n_qubits, n_electrons, amps) in arb_problem()) {
        let gate = singlet_evolution(&amps, n_qubits, n_electrons, &bravyi_kitaev, "lie", 1).unwrap();
        let circuit = gate.definition().unwrap();
        prop_assert_eq!(circuit.num_qubits(), n_qubits as usize);
    }
}
