//! Scoped compiler sessions.

use tracing::{Span, debug, info_span};
use uuid::Uuid;

use hubbard_ir::Circuit;

use crate::error::CompileResult;
use crate::manager::PassManager;
use crate::property::PropertySet;

/// A compiler session.
///
/// Opening a session allocates an id and a tracing span; dropping it closes
/// the session, on success and on early error return alike.
///
/// ```rust
/// use hubbard_compile::{Compiler, PassManager};
/// use hubbard_ir::{Circuit, QubitId};
///
/// let mut circuit = Circuit::with_size("bell", 2, 0);
/// circuit.h(QubitId(0)).unwrap();
/// circuit.cx(QubitId(0), QubitId(1)).unwrap();
///
/// let mut compiler = Compiler::new();
/// let compiled = compiler.compile(circuit, &PassManager::new()).unwrap();
/// assert_eq!(compiled.num_operations(), 2);
/// assert_eq!(compiler.compiled(), 1);
/// ```
pub struct Compiler {
    id: Uuid,
    span: Span,
    compiled: usize,
}

impl Compiler {
    /// Open a new session.
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("compiler", session = %id);
        span.in_scope(|| debug!("Compiler session opened"));
        Self {
            id,
            span,
            compiled: 0,
        }
    }

    /// Session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of circuits compiled successfully in this session.
    pub fn compiled(&self) -> usize {
        self.compiled
    }

    /// Run `passes` over `circuit` and return the result.
    ///
    /// The circuit's name is kept.
    pub fn compile(&mut self, circuit: Circuit, passes: &PassManager) -> CompileResult<Circuit> {
        let _guard = self.span.enter();
        let name = circuit.name().to_string();
        let mut dag = circuit.into_dag();
        let mut properties = PropertySet::new();
        passes.run(&mut dag, &mut properties)?;
        self.compiled += 1;
        Ok(Circuit::from_dag(dag).with_name(name))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Compiler {
    fn drop(&mut self) {
        let _guard = self.span.enter();
        debug!("Compiler session closed after {} circuits", self.compiled);
    }
}
