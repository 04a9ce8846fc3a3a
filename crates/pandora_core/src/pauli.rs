//! Pauli operator algebra
//!
//! Gantree: L1_Operator → Pauli, PauliString, PauliTerm
//!
//! Maps Pauli strings to dense matrices by left-to-right Kronecker products.
//! Qubit 0 is the left-most tensor factor, i.e. the most significant bit of
//! the basis index.

use crate::error::{PandoraError, PandoraResult};
use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dense complex operator matrix
pub type OperatorMatrix = DMatrix<Complex64>;

// ============================================================================
// Pauli
// ============================================================================

/// Single-qubit Pauli operator
/// Gantree: Pauli // I/X/Y/Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity
    I,
    /// Bit flip
    X,
    /// Bit and phase flip
    Y,
    /// Phase flip
    Z,
}

impl Pauli {
    /// All four operators in canonical order
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// Non-identity operators
    pub const NON_IDENTITY: [Pauli; 3] = [Pauli::X, Pauli::Y, Pauli::Z];

    /// Parse from character (upper case only)
    /// Gantree: from_char(c) -> Result<Self> // 파싱
    pub fn from_char(c: char) -> PandoraResult<Self> {
        match c {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            _ => Err(PandoraError::InvalidOperatorSymbol(c)),
        }
    }

    /// Convert to character
    pub fn to_char(&self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    /// Check for identity
    pub fn is_identity(&self) -> bool {
        matches!(self, Pauli::I)
    }

    /// 2×2 matrix representation
    /// Gantree: matrix() -> 2x2 // 행렬
    pub fn matrix(&self) -> OperatorMatrix {
        let o = Complex64::new(0.0, 0.0);
        let l = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let entries = match self {
            Pauli::I => [l, o, o, l],
            Pauli::X => [o, l, l, o],
            Pauli::Y => [o, -i, i, o],
            Pauli::Z => [l, o, o, -l],
        };
        OperatorMatrix::from_row_slice(2, 2, &entries)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// ============================================================================
// PauliString
// ============================================================================

/// Tensor product of single-qubit Paulis, one per qubit (e.g. "XIZ")
/// Gantree: PauliString // 파울리 문자열
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliString {
    ops: Vec<Pauli>,
}

impl PauliString {
    /// Parse from string; every character must be one of I, X, Y, Z
    pub fn parse(s: &str) -> PandoraResult<Self> {
        let ops: Result<Vec<Pauli>, _> = s.chars().map(Pauli::from_char).collect();
        Ok(Self { ops: ops? })
    }

    /// Build from operators
    pub fn new(ops: Vec<Pauli>) -> Self {
        Self { ops }
    }

    /// All-identity string on n qubits
    pub fn identity(n_qubits: usize) -> Self {
        Self {
            ops: vec![Pauli::I; n_qubits],
        }
    }

    /// Identity everywhere except the listed (qubit, operator) sites
    /// Gantree: from_sites(n,sites) -> Result<Self> // 위치 지정
    pub fn from_sites(n_qubits: usize, sites: &[(usize, Pauli)]) -> PandoraResult<Self> {
        let mut ops = vec![Pauli::I; n_qubits];
        for &(qubit, op) in sites {
            if qubit >= n_qubits {
                return Err(PandoraError::dimension("qubit index bound", n_qubits, qubit + 1));
            }
            ops[qubit] = op;
        }
        Ok(Self { ops })
    }

    /// Single operator on one qubit
    pub fn single(n_qubits: usize, qubit: usize, op: Pauli) -> PandoraResult<Self> {
        Self::from_sites(n_qubits, &[(qubit, op)])
    }

    /// Number of qubits covered
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operator at qubit index
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.ops.get(qubit).copied()
    }

    /// Iterate over operators
    pub fn iter(&self) -> impl Iterator<Item = &Pauli> {
        self.ops.iter()
    }

    /// Operators as a slice
    pub fn as_slice(&self) -> &[Pauli] {
        &self.ops
    }

    /// Number of non-identity factors
    pub fn weight(&self) -> usize {
        self.ops.iter().filter(|p| !p.is_identity()).count()
    }

    /// Dense 2^n × 2^n matrix: left-to-right Kronecker product, O(4^n)
    /// Gantree: to_matrix() -> DMatrix // 텐서곱
    pub fn to_matrix(&self) -> OperatorMatrix {
        let mut iter = self.ops.iter();
        let first = match iter.next() {
            Some(p) => p.matrix(),
            None => return OperatorMatrix::identity(1, 1),
        };
        iter.fold(first, |acc, p| acc.kronecker(&p.matrix()))
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.ops {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

impl FromStr for PauliString {
    type Err = PandoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PauliString {
    type Error = PandoraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PauliString> for String {
    fn from(value: PauliString) -> Self {
        value.to_string()
    }
}

// ============================================================================
// PauliTerm
// ============================================================================

/// Weighted Pauli string c · P
/// Gantree: PauliTerm // (계수, 문자열)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Real coefficient
    pub coefficient: f64,

    /// Operator string
    pub operators: PauliString,
}

impl PauliTerm {
    /// Create a new term
    pub fn new(coefficient: f64, operators: PauliString) -> Self {
        Self {
            coefficient,
            operators,
        }
    }

    /// Parse the operator string and build a term
    pub fn parse(coefficient: f64, pauli_string: &str) -> PandoraResult<Self> {
        Ok(Self::new(coefficient, PauliString::parse(pauli_string)?))
    }

    /// Number of qubits covered
    pub fn num_qubits(&self) -> usize {
        self.operators.len()
    }

    /// Dense matrix c · P
    pub fn to_matrix(&self) -> OperatorMatrix {
        self.operators.to_matrix() * Complex64::new(self.coefficient, 0.0)
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.coefficient >= 0.0 { "+" } else { "" };
        write!(f, "{}{:.4}*{}", sign, self.coefficient, self.operators)
    }
}

// ============================================================================
// Tests
// ============================================================================
