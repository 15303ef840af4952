//! # Constitutional Constraint Validator
//!
//! Evaluates all four predicates against a message and its declared route,
//! collecting every violation rather than stopping at the first.

use crate::domain::rules::ConstraintRules;
use crate::domain::violations::{ConstraintReport, ViolationKind};
use crate::ports::inbound::ConstraintPolicy;
use shared_types::{Message, Subsystem};
use tracing::debug;

/// Rule-driven implementation of [`ConstraintPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ConstraintValidator {
    rules: ConstraintRules,
}

impl ConstraintValidator {
    /// Validator over `rules`.
    pub fn new(rules: ConstraintRules) -> Self {
        Self { rules }
    }

    /// Active rules.
    pub fn rules(&self) -> &ConstraintRules {
        &self.rules
    }

    fn violates_non_coercion(&self, message: &Message, to: Subsystem) -> bool {
        let rule = &self.rules.non_coercion;
        let payload = &message.payload;

        (rule.unforceable.contains(&to) && payload.flag(&rule.force_key))
            || (rule.reduce_permissions_intents.contains(&message.intent)
                && payload.flag(&rule.reduce_permissions_key))
    }

    fn violates_locality(&self, message: &Message, to: Subsystem) -> bool {
        let rule = &self.rules.locality;
        let external = message.context.caller.node_id != self.rules.local_node_id;

        external
            && rule.guarded.contains(&to)
            && rule.intents.contains(&message.intent)
            && message.payload.has_key(&rule.override_key)
    }

    fn violates_reversibility(&self, message: &Message) -> bool {
        let rule = &self.rules.reversibility;
        if !rule.state_changing.contains(&message.intent) {
            return false;
        }
        let payload = &message.payload;
        !payload.flag(&rule.reversible_key) && !payload.flag(&rule.constitutional_key)
    }

    fn violates_observability(message: &Message) -> bool {
        let ctx = &message.context;
        ctx.provenance.is_empty()
            || ctx.caller.node_id.is_empty()
            || ctx.session_id.is_empty()
            || message.payload.schema.is_empty()
            || message.payload.schema_version.is_empty()
    }
}

impl ConstraintPolicy for ConstraintValidator {
    fn evaluate(&self, message: &Message, from: Subsystem, to: Subsystem) -> ConstraintReport {
        let mut violations = Vec::new();

        if self.violates_non_coercion(message, to) {
            violations.push(ViolationKind::NonCoercion);
        }
        if self.violates_locality(message, to) {
            violations.push(ViolationKind::Locality);
        }
        if self.violates_reversibility(message) {
            violations.push(ViolationKind::Reversibility);
        }
        if Self::violates_observability(message) {
            violations.push(ViolationKind::Observability);
        }

        let report = ConstraintReport::from_violations(violations);
        if !report.valid {
            debug!(
                %from,
                %to,
                intent = %message.intent,
                violations = ?report.violations,
                "[Constraints] message rejected"
            );
        }
        report
    }
}
