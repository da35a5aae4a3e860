//! UCCSD singlet evolution gates.
//!
//! The generator `T − T†` is anti-Hermitian, so after a qubit mapping every
//! coefficient is purely imaginary. The evolution operator is built from
//! those imaginary parts and evolved for unit time.

use std::fmt;
use std::str::FromStr;

use hubbard_sim::{EvolutionSynthesis, Hamiltonian, PauliEvolutionGate};
use num_complex::Complex64;
use tracing::{debug, warn};

use crate::error::{ChemError, ChemResult};
use crate::fermion::EQ_TOLERANCE;
use crate::transforms::{FermionTransform, jordan_wigner};
use crate::uccsd::{uccsd_singlet_generator, uccsd_singlet_paramsize};

/// Product-formula family for the singlet evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrotterMode {
    /// Second-order Suzuki-Trotter.
    Suzuki,
    /// First-order Lie-Trotter.
    Lie,
}

impl TrotterMode {
    /// The synthesis for this mode with `reps` slices.
    pub fn synthesis(self, reps: usize) -> EvolutionSynthesis {
        match self {
            TrotterMode::Suzuki => EvolutionSynthesis::suzuki_trotter(reps),
            TrotterMode::Lie => EvolutionSynthesis::lie_trotter(reps),
        }
    }
}

impl FromStr for TrotterMode {
    type Err = ChemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suzuki" => Ok(TrotterMode::Suzuki),
            "lie" | "trotter" => Ok(TrotterMode::Lie),
            other => Err(ChemError::InvalidTrotterMode(other.to_string())),
        }
    }
}

impl fmt::Display for TrotterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrotterMode::Suzuki => write!(f, "suzuki"),
            TrotterMode::Lie => write!(f, "lie"),
        }
    }
}

/// Little-endian Pauli labels and real coefficients of the mapped generator.
///
/// Labels are `n_qubits` characters wide and come out in sorted Pauli-string
/// order. Real parts of the mapped coefficients are discarded.
pub fn singlet_terms(
    amplitudes: &[f64],
    n_qubits: u32,
    n_electrons: u32,
    transform: &FermionTransform,
) -> ChemResult<(Vec<String>, Vec<f64>)> {
    let generator = uccsd_singlet_generator(amplitudes, n_qubits, n_electrons)?;
    let mapped = transform(&generator);

    let discarded = mapped
        .terms()
        .map(|(_, c)| c.re.abs())
        .fold(0.0_f64, f64::max);
    if discarded > EQ_TOLERANCE {
        warn!(
            "Discarding real coefficient parts up to {:.3e} from the mapped generator",
            discarded
        );
    }

    let mut imaginary = mapped.map_coefficients(|c| Complex64::new(c.im, 0.0));
    imaginary.compress(EQ_TOLERANCE);

    let mut labels = Vec::with_capacity(imaginary.len());
    let mut coeffs = Vec::with_capacity(imaginary.len());
    for (pauli, coeff) in imaginary.terms() {
        let mut chars = vec!['I'; n_qubits as usize];
        for &(qubit, op) in pauli.ops() {
            if qubit >= n_qubits {
                return Err(ChemError::QubitOutOfRange {
                    index: qubit,
                    n_qubits,
                });
            }
            chars[qubit as usize] = op.label();
        }
        labels.push(chars.into_iter().rev().collect());
        coeffs.push(coeff.re);
    }

    debug!(
        "Mapped singlet generator: {} terms on {} qubits",
        labels.len(),
        n_qubits
    );
    Ok((labels, coeffs))
}

/// Evolution gate for the UCCSD singlet generator.
///
/// `trotter_mode` is `"suzuki"` (second order), or `"lie"`/`"trotter"`
/// (first order). The mode and `reps` are checked before the generator is
/// built.
///
/// ```rust
/// use hubbard_chem::{jordan_wigner, singlet_evolution};
///
/// let gate = singlet_evolution(&[0.1, 0.2], 4, 2, &jordan_wigner, "suzuki", 1).unwrap();
/// assert_eq!(gate.num_qubits(), 4);
/// assert_eq!(gate.time(), 1.0);
/// ```
pub fn singlet_evolution(
    amplitudes: &[f64],
    n_qubits: u32,
    n_electrons: u32,
    transform: &FermionTransform,
    trotter_mode: &str,
    reps: usize,
) -> ChemResult<PauliEvolutionGate> {
    let synthesis = trotter_mode.parse::<TrotterMode>()?.synthesis(reps);
    synthesis.validate()?;

    let (labels, coeffs) = singlet_terms(amplitudes, n_qubits, n_electrons, transform)?;
    let operator = Hamiltonian::from_labels(&labels, &coeffs)?.with_num_qubits(n_qubits);
    Ok(PauliEvolutionGate::new(operator, 1.0, synthesis))
}

/// Builder over [`singlet_evolution`] with Jordan-Wigner, Suzuki and two
/// slices as defaults.
pub struct SingletEvolution<'a> {
    n_qubits: u32,
    n_electrons: u32,
    transform: &'a FermionTransform,
    trotter_mode: String,
    reps: usize,
}

impl<'a> SingletEvolution<'a> {
    /// Start a builder for `n_electrons` in `n_qubits` spin-orbitals.
    pub fn new(n_qubits: u32, n_electrons: u32) -> Self {
        Self {
            n_qubits,
            n_electrons,
            transform: &jordan_wigner,
            trotter_mode: TrotterMode::Suzuki.to_string(),
            reps: 2,
        }
    }

    /// Use a different fermion-to-qubit mapping.
    #[must_use]
    pub fn with_transform(mut self, transform: &'a FermionTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the Trotterization mode string.
    #[must_use]
    pub fn with_trotter_mode(mut self, mode: impl Into<String>) -> Self {
        self.trotter_mode = mode.into();
        self
    }

    /// Set the number of time slices.
    #[must_use]
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    /// Number of amplitudes [`Self::build`] expects.
    pub fn paramsize(&self) -> ChemResult<usize> {
        uccsd_singlet_paramsize(self.n_qubits, self.n_electrons)
    }

    /// Build the evolution gate for the given packed amplitudes.
    pub fn build(&self, amplitudes: &[f64]) -> ChemResult<PauliEvolutionGate> {
        singlet_evolution(
            amplitudes,
            self.n_qubits,
            self.n_electrons,
            self.transform,
            &self.trotter_mode,
            self.reps,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::bravyi_kitaev;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("suzuki".parse::<TrotterMode>().unwrap(), TrotterMode::Suzuki);
        assert_eq!("lie".parse::<TrotterMode>().unwrap(), TrotterMode::Lie);
        assert_eq!("trotter".parse::<TrotterMode>().unwrap(), TrotterMode::Lie);
        assert!(matches!(
            "Suzuki".parse::<TrotterMode>(),
            Err(ChemError::InvalidTrotterMode(_))
        ));
    }

    #[test]
    fn test_mode_checked_before_amplitudes() {
        // Wrong amplitude count, but the mode error wins.
        let err = singlet_evolution(&[], 4, 2, &jordan_wigner, "bogus", 1);
        assert!(matches!(err, Err(ChemError::InvalidTrotterMode(_))));
    }

    #[test]
    fn test_minimal_terms() {
        let (labels, coeffs) = singlet_terms(&[0.1, 0.2], 4, 2, &jordan_wigner).unwrap();
        assert_eq!(labels.len(), coeffs.len());
        assert!(!labels.is_empty());
        assert!(labels.iter().all(|l| l.len() == 4));
        assert!(coeffs.iter().all(|c| c.abs() > EQ_TOLERANCE));
        // A single excitation 0 -> 2 gives XZY / YZX strings on qubits 0..=2.
        assert!(labels.iter().any(|l| l == "IYZX" || l == "IXZY"));
    }

    #[test]
    fn test_builder_matches_function() {
        let amps = [0.3, -0.1];
        let built = SingletEvolution::new(4, 2)
            .with_transform(&bravyi_kitaev)
            .with_trotter_mode("lie")
            .with_reps(3)
            .build(&amps)
            .unwrap();
        let direct = singlet_evolution(&amps, 4, 2, &bravyi_kitaev, "lie", 3).unwrap();
        assert_eq!(built.operator(), direct.operator());
        assert_eq!(built.synthesis(), EvolutionSynthesis::lie_trotter(3));
    }
}
