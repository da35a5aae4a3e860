//! Spin-adapted UCCSD generator for closed-shell references.
//!
//! Spin-orbitals interleave spins: spatial orbital `i` maps to `2i` (up)
//! and `2i + 1` (down). The lowest `⌈n_electrons / 2⌉` spatial orbitals are
//! occupied.
//!
//! Packed amplitudes are laid out as
//! `[singles (n_s) | paired doubles (n_s) | mixed doubles (n_s(n_s−1)/2)]`
//! where `n_s = n_occupied · n_virtual`.

use num_complex::Complex64;

use crate::error::{ChemError, ChemResult};
use crate::fermion::{FermionOperator, Ladder};

fn up(spatial: u32) -> u32 {
    2 * spatial
}

fn down(spatial: u32) -> u32 {
    2 * spatial + 1
}

fn push<const N: usize>(generator: &mut FermionOperator, ops: [(u32, Ladder); N], coeff: f64) {
    *generator += FermionOperator::term(ops, Complex64::new(coeff, 0.0));
}

/// Occupied and virtual spatial-orbital counts.
fn orbital_counts(n_qubits: u32, n_electrons: u32) -> ChemResult<(u32, u32)> {
    if n_qubits % 2 != 0 {
        return Err(ChemError::OddSpinOrbitals(n_qubits));
    }
    let n_spatial = n_qubits / 2;
    let n_occupied = n_electrons.div_ceil(2);
    if n_occupied > n_spatial {
        return Err(ChemError::TooManyElectrons {
            n_electrons,
            n_qubits,
        });
    }
    Ok((n_occupied, n_spatial - n_occupied))
}

/// Number of independent amplitudes for a singlet UCCSD ansatz.
///
/// ```rust
/// use hubbard_chem::uccsd_singlet_paramsize;
///
/// // One occupied and one virtual spatial orbital: one single, one double.
/// assert_eq!(uccsd_singlet_paramsize(4, 2).unwrap(), 2);
/// ```
pub fn uccsd_singlet_paramsize(n_qubits: u32, n_electrons: u32) -> ChemResult<usize> {
    let (n_occupied, n_virtual) = orbital_counts(n_qubits, n_electrons)?;
    let n_single = (n_occupied * n_virtual) as usize;
    Ok(n_single + n_single * (n_single + 1) / 2)
}

/// Anti-Hermitian UCCSD generator `T − T†` for the given packed amplitudes.
pub fn uccsd_singlet_generator(
    amplitudes: &[f64],
    n_qubits: u32,
    n_electrons: u32,
) -> ChemResult<FermionOperator> {
    let (n_occupied, n_virtual) = orbital_counts(n_qubits, n_electrons)?;
    let expected = uccsd_singlet_paramsize(n_qubits, n_electrons)?;
    if amplitudes.len() != expected {
        return Err(ChemError::AmplitudeCount {
            expected,
            got: amplitudes.len(),
        });
    }

    let n_single = (n_occupied * n_virtual) as usize;
    let (singles, rest) = amplitudes.split_at(n_single);
    let (paired, mixed) = rest.split_at(n_single);

    // (virtual, occupied) spatial pairs, virtual index outermost.
    let pairs: Vec<(u32, u32)> = (0..n_virtual)
        .flat_map(|p| (0..n_occupied).map(move |q| (n_occupied + p, q)))
        .collect();

    let spins: [fn(u32) -> u32; 2] = [up, down];
    let mut generator = FermionOperator::zero();

    for (i, &(virt, occ)) in pairs.iter().enumerate() {
        for spin in 0..2_usize {
            let this = spins[spin];
            let other = spins[1 - spin];
            let (v_this, o_this) = (this(virt), this(occ));
            let (v_other, o_other) = (other(virt), other(occ));

            push(
                &mut generator,
                [(v_this, Ladder::Create), (o_this, Ladder::Annihilate)],
                singles[i],
            );
            push(
                &mut generator,
                [(o_this, Ladder::Create), (v_this, Ladder::Annihilate)],
                -singles[i],
            );

            push(
                &mut generator,
                [
                    (v_this, Ladder::Create),
                    (o_this, Ladder::Annihilate),
                    (v_other, Ladder::Create),
                    (o_other, Ladder::Annihilate),
                ],
                paired[i],
            );
            push(
                &mut generator,
                [
                    (o_other, Ladder::Create),
                    (v_other, Ladder::Annihilate),
                    (o_this, Ladder::Create),
                    (v_this, Ladder::Annihilate),
                ],
                -paired[i],
            );
        }
    }

    let combinations = pairs
        .iter()
        .enumerate()
        .flat_map(|(a, first)| pairs[a + 1..].iter().map(move |second| (first, second)));

    for (i, (&(virt_1, occ_1), &(virt_2, occ_2))) in combinations.enumerate() {
        for (spin_a, spin_b) in [(0_usize, 0_usize), (0, 1), (1, 0), (1, 1)] {
            let (v1a, o1a) = (spins[spin_a](virt_1), spins[spin_a](occ_1));
            let (v2b, o2b) = (spins[spin_b](virt_2), spins[spin_b](occ_2));
            if v1a == v2b || o1a == o2b {
                continue;
            }

            push(
                &mut generator,
                [
                    (v1a, Ladder::Create),
                    (o1a, Ladder::Annihilate),
                    (v2b, Ladder::Create),
                    (o2b, Ladder::Annihilate),
                ],
                mixed[i],
            );
            push(
                &mut generator,
                [
                    (o2b, Ladder::Create),
                    (v2b, Ladder::Annihilate),
                    (o1a, Ladder::Create),
                    (v1a, Ladder::Annihilate),
                ],
                -mixed[i],
            );
        }
    }

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paramsize() {
        assert_eq!(uccsd_singlet_paramsize(4, 2).unwrap(), 2);
        // 2 occupied x 2 virtual: 4 singles + 10 doubles.
        assert_eq!(uccsd_singlet_paramsize(8, 4).unwrap(), 14);
        // Odd electron count rounds the occupied shell up.
        assert_eq!(uccsd_singlet_paramsize(8, 3).unwrap(), 14);
        assert_eq!(uccsd_singlet_paramsize(8, 0).unwrap(), 0);
    }

    #[test]
    fn test_paramsize_errors() {
        assert!(matches!(
            uccsd_singlet_paramsize(5, 2),
            Err(ChemError::OddSpinOrbitals(5))
        ));
        assert!(matches!(
            uccsd_singlet_paramsize(4, 6),
            Err(ChemError::TooManyElectrons { .. })
        ));
    }

    #[test]
    fn test_amplitude_length_must_match() {
        let err = uccsd_singlet_generator(&[0.1], 4, 2);
        assert!(matches!(
            err,
            Err(ChemError::AmplitudeCount {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_minimal_generator_terms() {
        let generator = uccsd_singlet_generator(&[0.1, 0.2], 4, 2).unwrap();
        // Two spins x (single + adjoint) plus the paired double and its
        // adjoint for each spin; spin-flipped doubles are distinct keys.
        assert_eq!(generator.len(), 8);

        let single: Vec<(u32, Ladder)> = vec![(2, Ladder::Create), (0, Ladder::Annihilate)];
        let coeff = generator
            .terms()
            .find(|(ops, _)| **ops == single)
            .map(|(_, c)| *c);
        assert_eq!(coeff, Some(Complex64::new(0.1, 0.0)));
    }

    #[test]
    fn test_zero_amplitudes_give_zero_generator() {
        let n = uccsd_singlet_paramsize(8, 4).unwrap();
        let generator = uccsd_singlet_generator(&vec![0.0; n], 8, 4).unwrap();
        assert!(generator.is_empty());
    }
}
