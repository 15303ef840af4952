//! # Router Service
//!
//! Sequences the routing checks for one message. Stages run in fixed order
//! and the first failure is terminal:
//!
//! ```text
//! [INGRESS] → ROUTE_CHECK → CONSTRAINT_CHECK → ALIGNMENT_REVIEW → DISPATCH → [LOGGING]
//! ```
//!
//! `INGRESS` and `LOGGING` run only for envelopes. Once dispatch starts the
//! message is committed; nothing after it is cancellable.

use crate::domain::config::RouterConfig;
use crate::domain::lift::lift_envelope;
use crate::domain::result::{RouterStage, RoutingResult};
use crate::ports::inbound::RouterApi;
use crate::ports::outbound::SubsystemPorts;
use async_trait::async_trait;
use mcp_01_envelope::{
    enforce_capabilities, message_correlation_id, validate_envelope, EnvelopeError,
    EnvelopeVerifier,
};
use mcp_02_routing::{is_legal_route, RouteTable, RouteTarget, RoutingError};
use mcp_03_constraints::{ConstraintPolicy, ConstraintValidator};
use mcp_04_alignment::{
    AlignmentGate, FailClosedReviewer, ReviewCapability, ReviewDecision, ReviewPolicy,
};
use mcp_07_log_store::EnvelopeLog;
use shared_types::{Envelope, ErrorCode, Identity, McpError, Message, Subsystem};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The constitutional router.
///
/// Holds no per-message state, so unrelated messages may be routed
/// concurrently through one instance.
pub struct Router {
    config: RouterConfig,
    ports: SubsystemPorts,
    constraints: Arc<dyn ConstraintPolicy>,
    alignment: AlignmentGate,
    routes: Arc<RouteTable>,
    verifier: Option<Arc<dyn EnvelopeVerifier>>,
    log: Option<Arc<dyn EnvelopeLog>>,
}

impl Router {
    /// Router with the default constraint rules, the default review policy
    /// backed by a fail-closed reviewer, an empty route table, no signature
    /// verifier and no log.
    pub fn new(config: RouterConfig, ports: SubsystemPorts) -> Self {
        Self {
            config,
            ports,
            constraints: Arc::new(ConstraintValidator::default()),
            alignment: AlignmentGate::new(ReviewPolicy::default(), Arc::new(FailClosedReviewer)),
            routes: Arc::new(RouteTable::new()),
            verifier: None,
            log: None,
        }
    }

    /// Replaces the constraint policy.
    #[must_use]
    pub fn with_constraints(mut self, policy: Arc<dyn ConstraintPolicy>) -> Self {
        self.constraints = policy;
        self
    }

    /// Replaces the review policy and reviewer.
    #[must_use]
    pub fn with_review(mut self, policy: ReviewPolicy, reviewer: Arc<dyn ReviewCapability>) -> Self {
        self.alignment = AlignmentGate::new(policy, reviewer);
        self
    }

    /// Uses `routes` to resolve inbound envelopes.
    #[must_use]
    pub fn with_route_table(mut self, routes: Arc<RouteTable>) -> Self {
        self.routes = routes;
        self
    }

    /// Verifies envelope signatures on ingress, if enabled in the config.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Arc<dyn EnvelopeVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Appends routed envelopes to `log`, if enabled in the config.
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn EnvelopeLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// The router's own identity on this node.
    pub fn identity(&self) -> Identity {
        Identity::module(self.config.local_node_id.clone(), Subsystem::Router.tag())
    }

    /// Active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route table used for envelopes.
    pub fn route_table(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    fn active_verifier(&self) -> Option<&dyn EnvelopeVerifier> {
        if self.config.verify_signatures {
            self.verifier.as_deref()
        } else {
            None
        }
    }

    fn ingress(&self, envelope: &Envelope) -> Result<RouteTarget, McpError> {
        let corr = envelope.id();
        validate_envelope(envelope, self.active_verifier())
            .and_then(|()| enforce_capabilities(envelope))
            .map_err(|e: EnvelopeError| e.to_mcp_error(corr))?;
        self.routes
            .resolve(envelope.header.layer, &envelope.body.payload_type)
            .map_err(|e| e.to_mcp_error(corr))
    }

    async fn run_pipeline(
        &self,
        message: Message,
        from: Subsystem,
        to: Subsystem,
        corr: &str,
    ) -> RoutingResult {
        let intent = message.intent;

        // ROUTE_CHECK
        if !is_legal_route(from, to, intent) {
            let err = RoutingError::IllegalRoute { from, to, intent };
            warn!(correlation_id = %corr, error = %err, "[Router] illegal route");
            return RoutingResult::failed(RouterStage::RouteCheck, err.to_mcp_error(corr));
        }
        debug!(correlation_id = %corr, %from, %to, %intent, "[Router] route legal");

        // CONSTRAINT_CHECK
        let report = self.constraints.evaluate(&message, from, to);
        if let Some(err) = report.to_mcp_error(corr) {
            warn!(
                correlation_id = %corr,
                violations = ?report.violations,
                "[Router] halted by constitutional constraints"
            );
            return RoutingResult::halted(RouterStage::ConstraintCheck, err)
                .with_constraints(report);
        }
        debug!(correlation_id = %corr, "[Router] constraints satisfied");

        // ALIGNMENT_REVIEW
        let outcome = self.alignment.check(message, from, to).await;
        let message = match outcome.decision {
            ReviewDecision::Proceed(message) | ReviewDecision::Modified(message) => message,
            ReviewDecision::Halted(err) | ReviewDecision::Rejected(err) => {
                warn!(correlation_id = %corr, error = %err, "[Router] halted by alignment");
                return RoutingResult::halted(RouterStage::AlignmentReview, err.to_mcp_error(corr))
                    .with_constraints(report)
                    .with_alignment(Some(outcome.result));
            }
        };

        // DISPATCH
        if let Err(err) = self.ports.dispatch(to, &message).await {
            warn!(correlation_id = %corr, %to, error = %err, "[Router] dispatch failed");
            let err = McpError::new(ErrorCode::DISPATCH_FAILED, err.to_string(), corr);
            return RoutingResult::failed(RouterStage::Dispatch, err)
                .with_constraints(report)
                .with_alignment(Some(outcome.result));
        }

        info!(correlation_id = %corr, %from, %to, %intent, "[Router] routed");
        RoutingResult::routed(message)
            .with_constraints(report)
            .with_alignment(Some(outcome.result))
    }
}

#[async_trait]
impl RouterApi for Router {
    async fn route_message(&self, message: Message, from: Subsystem, to: Subsystem) -> RoutingResult {
        let corr = message_correlation_id(&message)
            .unwrap_or_else(|_| message.context.session_id.clone());
        self.run_pipeline(message, from, to, &corr).await
    }

    async fn route_envelope(&self, envelope: &Envelope, from: Subsystem) -> RoutingResult {
        let corr = envelope.id();

        // INGRESS
        let target = match self.ingress(envelope) {
            Ok(target) => target,
            Err(err) => {
                warn!(correlation_id = %corr, error = %err, "[Router] envelope rejected at ingress");
                return RoutingResult::failed(RouterStage::Ingress, err);
            }
        };
        debug!(
            correlation_id = %corr,
            to = %target.subsystem,
            intent = %target.intent,
            "[Router] envelope resolved"
        );

        let message = lift_envelope(envelope, target.intent);
        let mut result = self.run_pipeline(message, from, target.subsystem, corr).await;
        if !result.success || !self.config.log_routed {
            return result;
        }

        // LOGGING
        if let Some(log) = &self.log {
            match log.append(envelope) {
                Ok(receipt) => result.receipt = Some(receipt),
                Err(err) => {
                    warn!(correlation_id = %corr, error = %err, "[Router] routed but not logged");
                    result.success = false;
                    result.stage = RouterStage::Logging;
                    result.error = Some(err.to_mcp_error(corr));
                }
            }
        }
        result
    }
}
