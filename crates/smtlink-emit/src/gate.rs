//! Capability gate
//!
//! Refuses programs that need a feature the target solver does not declare,
//! before any text is produced.

use std::collections::BTreeSet;

use smtlink_config::SolverCapabilities;
use smtlink_core::{Feature, Kind, Result, SmtError};
use tracing::{debug, trace};

use crate::program::{Quantifier, SymProgram};

/// What a program needs from a solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramFeatures {
    /// Every kind that occurs in the program.
    pub kinds: BTreeSet<Kind>,
    /// At least one input is universally quantified after polarity.
    pub quantified: bool,
    /// The program carries optimization directives.
    pub optimizing: bool,
    /// The program declares sorts of its own.
    pub uninterpreted_sorts: bool,
    /// Objectives whose value depends on a universally quantified input,
    /// directly or through a skolemized existential.
    pub universal_objectives: Vec<String>,
}

impl ProgramFeatures {
    /// Collects the features of `program`.
    pub fn of(program: &SymProgram) -> Self {
        let mut kinds: BTreeSet<Kind> = program.word_kinds().into_values().collect();
        kinds.extend(program.sorts.iter().map(|s| s.kind()));
        for table in &program.tables {
            kinds.insert(table.index_kind.clone());
            kinds.insert(table.elem_kind.clone());
        }
        for array in &program.arrays {
            kinds.insert(array.index_kind.clone());
            kinds.insert(array.elem_kind.clone());
        }
        for function in &program.functions {
            kinds.extend(function.args.iter().cloned());
            kinds.insert(function.result.clone());
        }

        // Inputs from the first universal on vary with some universal input;
        // existentials there become skolem functions of the universals.
        let first_universal = program
            .inputs
            .iter()
            .position(|i| program.effective_quantifier(i) == Quantifier::Forall);
        let universals: BTreeSet<_> = first_universal
            .map(|at| program.inputs[at..].iter().map(|i| i.var.id).collect())
            .unwrap_or_default();

        let universal_objectives = program
            .objectives
            .iter()
            .filter(|o| {
                !program
                    .input_dependencies(o.id())
                    .is_disjoint(&universals)
            })
            .map(|o| o.name().to_string())
            .collect();

        let uninterpreted_sorts =
            !program.sorts.is_empty() || kinds.iter().any(Kind::is_uninterpreted);

        Self {
            kinds,
            quantified: first_universal.is_some(),
            optimizing: !program.objectives.is_empty(),
            uninterpreted_sorts,
            universal_objectives,
        }
    }

    /// Features in gate order, each listed once.
    pub fn required(&self) -> Vec<Feature> {
        let mut out = Vec::new();
        if self.kinds.contains(&Kind::Unbounded) {
            out.push(Feature::UnboundedIntegers);
        }
        if self.kinds.contains(&Kind::Real) {
            out.push(Feature::Reals);
        }
        if self.kinds.iter().any(Kind::is_floating) {
            out.push(Feature::FloatingPoint);
        }
        if self.quantified {
            out.push(Feature::Quantifiers);
        }
        if self.uninterpreted_sorts {
            out.push(Feature::UninterpretedSorts);
        }
        if self.optimizing {
            out.push(Feature::Optimization);
        }
        out
    }
}

fn supports(caps: &SolverCapabilities, feature: Feature) -> bool {
    match feature {
        Feature::UnboundedIntegers => caps.supports_unbounded_ints,
        Feature::Reals => caps.supports_reals,
        Feature::FloatingPoint => caps.supports_ieee754,
        Feature::Quantifiers => caps.supports_quantifiers,
        Feature::UninterpretedSorts => caps.supports_uninterpreted_sorts,
        Feature::Optimization => caps.supports_optimization,
    }
}

/// Checks `features` against `caps`.
///
/// The first unsupported feature in gate order is reported. Objectives over
/// universally quantified inputs are refused even by solvers that support
/// both quantifiers and optimization.
pub fn check(features: &ProgramFeatures, caps: &SolverCapabilities) -> Result<()> {
    if let Some(feature) = features
        .required()
        .into_iter()
        .find(|f| !supports(caps, *f))
    {
        debug!(event = "gate_refused", %feature, solver = %caps.name);
        return Err(SmtError::Capability {
            feature,
            solver: caps.name.clone(),
        });
    }
    if !features.universal_objectives.is_empty() {
        debug!(
            event = "gate_refused",
            objectives = features.universal_objectives.len(),
            solver = %caps.name
        );
        return Err(SmtError::UniversalObjectives {
            objectives: features.universal_objectives.clone(),
            solver: caps.name.clone(),
        });
    }
    trace!(event = "gate_passed", solver = %caps.name);
    Ok(())
}

/// Collects the features of `program` and checks them.
pub fn check_program(program: &SymProgram, caps: &SolverCapabilities) -> Result<()> {
    check(&ProgramFeatures::of(program), caps)
}
