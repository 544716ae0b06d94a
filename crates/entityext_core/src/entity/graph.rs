use super::engine::{begin, blip, concludes, Completion, Request, RequestOutcome};
use super::{ActivationPhase, ALL_PHASES};

/// What drives an edge of the activation phase graph.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Operation {
    Request(Request),
    Complete(Completion),
}

impl Operation {
    pub const fn label(self) -> &'static str {
        match self {
            Operation::Request(Request::Activate) => "request_activation",
            Operation::Request(Request::Deactivate) => "request_deactivation",
            Operation::Complete(c) => c.label(),
        }
    }
}

/// Directed phase edge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PhaseEdge {
    pub from: ActivationPhase,
    pub operation: Operation,
    pub to: ActivationPhase,
}

/// Activation phase graph derived from the engine tables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PhaseGraph {
    pub phases: Vec<ActivationPhase>,
    pub edges: Vec<PhaseEdge>,
}

impl PhaseGraph {
    /// Edges leaving `phase`.
    pub fn edges_from(&self, phase: ActivationPhase) -> impl Iterator<Item = &PhaseEdge> + '_ {
        self.edges.iter().filter(move |e| e.from == phase)
    }
}

/// Build the canonical phase graph.
///
/// Request edges come from granting phases only. Each completion
/// contributes its two blip edges, starting from the in-progress phase it
/// concludes.
pub fn phase_graph() -> PhaseGraph {
    let mut edges = Vec::new();

    for phase in ALL_PHASES {
        for request in [Request::Activate, Request::Deactivate] {
            if let RequestOutcome::Granted(to) = begin(phase, request) {
                edges.push(PhaseEdge {
                    from: phase,
                    operation: Operation::Request(request),
                    to,
                });
            }
        }
    }

    for completion in [
        Completion::ActivationSucceeded,
        Completion::ActivationFailed,
        Completion::DeactivationSucceeded,
        Completion::DeactivationFailed,
    ] {
        let (outcome, settled) = blip(completion);
        let operation = Operation::Complete(completion);
        edges.push(PhaseEdge {
            from: concludes(completion),
            operation,
            to: outcome,
        });
        edges.push(PhaseEdge {
            from: outcome,
            operation,
            to: settled,
        });
    }

    PhaseGraph {
        phases: ALL_PHASES.to_vec(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_contains_all_phases_and_expected_edges() {
        use ActivationPhase::*;

        let graph = phase_graph();
        assert_eq!(graph.phases.len(), ALL_PHASES.len());

        let expected = [
            (Inactive, "request_activation", Activating),
            (Active, "request_deactivation", Deactivating),
            (Activating, "succeed_activation", ActivationDone),
            (ActivationDone, "succeed_activation", Active),
            (Activating, "fail_activation", ActivationFailed),
            (ActivationFailed, "fail_activation", Inactive),
            (Deactivating, "succeed_deactivation", DeactivationDone),
            (DeactivationDone, "succeed_deactivation", Inactive),
            (Deactivating, "fail_deactivation", DeactivationFailed),
            (DeactivationFailed, "fail_deactivation", Active),
        ];

        for (from, operation, to) in expected {
            assert!(
                graph
                    .edges
                    .iter()
                    .any(|e| e.from == from && e.operation.label() == operation && e.to == to),
                "missing edge {from:?} -> {operation} -> {to:?}"
            );
        }

        assert_eq!(graph.edges.len(), expected.len());
    }

    #[test]
    fn outcome_phases_lead_only_to_settled_phases() {
        let graph = phase_graph();
        for phase in ALL_PHASES.into_iter().filter(|p| p.is_outcome()) {
            let targets: Vec<_> = graph.edges_from(phase).map(|e| e.to).collect();
            assert_eq!(targets.len(), 1, "{phase:?}");
            assert!(targets[0].is_settled());
        }
    }
}
