//! # Flow context carrier
//!
//! Verification and recovery span several independently-navigable screens,
//! and the data a step produces (chosen channel, destination, verified code)
//! is exactly what the next step needs. [`FlowCarrier`] is the handoff: a
//! single in-memory slot the finishing screen puts the flow into and the
//! next screen takes it out of. Nothing here is ever written to durable
//! storage, so abandoning a flow mid-way leaks nothing — the value is simply
//! dropped.
//!
//! There is at most one active flow; putting a new one discards whatever was
//! left behind by an abandoned flow.

use std::cell::RefCell;
use std::rc::Rc;

use crate::recovery::RecoveryFlow;
use crate::verification::VerificationFlow;

/// The flow being handed from one screen to the next.
#[derive(Clone, Debug)]
pub enum FlowContext {
    Verification(VerificationFlow),
    Recovery(RecoveryFlow),
}

/// Single-slot, in-memory handoff. Clones share the slot; the app provides
/// one carrier app-wide.
#[derive(Clone, Default)]
pub struct FlowCarrier {
    slot: Rc<RefCell<Option<FlowContext>>>,
}

impl FlowCarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand a flow to the next screen, discarding any stale one.
    pub fn put(&self, context: FlowContext) {
        let mut slot = self.slot.borrow_mut();
        if slot.is_some() {
            tracing::debug!("replacing a stale flow context");
        }
        *slot = Some(context);
    }

    /// Take whatever is in the slot.
    pub fn take(&self) -> Option<FlowContext> {
        self.slot.borrow_mut().take()
    }

    /// Take the slot if it holds a verification flow. A flow of the wrong
    /// kind is stale by definition and is discarded.
    pub fn take_verification(&self) -> Option<VerificationFlow> {
        match self.take() {
            Some(FlowContext::Verification(flow)) => Some(flow),
            _ => None,
        }
    }

    /// Take the slot if it holds a recovery flow; see
    /// [`take_verification`](Self::take_verification).
    pub fn take_recovery(&self) -> Option<RecoveryFlow> {
        match self.take() {
            Some(FlowContext::Recovery(flow)) => Some(flow),
            _ => None,
        }
    }

    pub fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Channel;

    #[test]
    fn take_consumes_the_slot() {
        let carrier = FlowCarrier::new();
        carrier.put(FlowContext::Verification(VerificationFlow::issued(
            Channel::Email,
            "farmer@example.com",
        )));

        let flow = carrier.take_verification().unwrap();
        assert_eq!(flow.destination(), "farmer@example.com");
        assert!(carrier.take().is_none());
    }

    #[test]
    fn a_new_flow_overwrites_a_stale_one() {
        let carrier = FlowCarrier::new();
        carrier.put(FlowContext::Verification(VerificationFlow::issued(
            Channel::Email,
            "old@example.com",
        )));
        carrier.put(FlowContext::Recovery(RecoveryFlow::new_phone(
            "+15551234567",
        )));

        let flow = carrier.take_recovery().unwrap();
        assert_eq!(flow.destination(), "+15551234567");
    }

    #[test]
    fn wrong_kind_is_discarded_not_returned() {
        let carrier = FlowCarrier::new();
        carrier.put(FlowContext::Recovery(RecoveryFlow::new_phone(
            "+15551234567",
        )));

        assert!(carrier.take_verification().is_none());
        // The stale recovery flow is gone too.
        assert!(carrier.take_recovery().is_none());
    }

    #[test]
    fn clones_share_the_slot() {
        let carrier = FlowCarrier::new();
        let other = carrier.clone();
        carrier.put(FlowContext::Verification(VerificationFlow::issued(
            Channel::Phone,
            "+15550001111",
        )));
        assert!(other.take_verification().is_some());
    }
}
