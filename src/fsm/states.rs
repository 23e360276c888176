//! Wizard state handlers and table builder.
//!
//! ```text
//!  OVERVIEW ──[start, profile complete]──▶ REQUEST ──[submit]──▶ REVIEW
//!     ▲                                                          │
//!     │                                                   [handler sign]
//!     │                                                          ▼
//!     └────────────[cancel]──────────── any ◀──────────── HANDLER_SIGNED
//!                                                                │
//!                                                           [vet sign]
//!                                                                ▼
//!                                                            SUBMITTED
//! ```

use super::context::{PENDING_VET, WizardContext, WizardInput};
use super::{StateDescriptor, StateId};
use crate::error::WizardError;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Overview
        StateDescriptor {
            id: StateId::Overview,
            name: "Overview",
            on_enter: Some(overview_enter),
            on_exit: None,
            on_update: overview_update,
        },
        // Index 1: Request
        StateDescriptor {
            id: StateId::Request,
            name: "Request",
            on_enter: Some(request_enter),
            on_exit: None,
            on_update: request_update,
        },
        // Index 2: Review
        StateDescriptor {
            id: StateId::Review,
            name: "Review",
            on_enter: Some(review_enter),
            on_exit: None,
            on_update: review_update,
        },
        // Index 3: HandlerSigned
        StateDescriptor {
            id: StateId::HandlerSigned,
            name: "HandlerSigned",
            on_enter: Some(handler_signed_enter),
            on_exit: None,
            on_update: handler_signed_update,
        },
        // Index 4: Submitted
        StateDescriptor {
            id: StateId::Submitted,
            name: "Submitted",
            on_enter: Some(submitted_enter),
            on_exit: None,
            on_update: submitted_update,
        },
    ]
}

/// Shared by every non-terminal state.
fn cancelled(ctx: &WizardContext) -> bool {
    ctx.pending == Some(WizardInput::Cancel)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OVERVIEW
// ═══════════════════════════════════════════════════════════════════════════

fn overview_enter(ctx: &mut WizardContext) {
    ctx.clear_signatures();
    info!("WIZARD | {} | overview", ctx.dog_id);
}

fn overview_update(ctx: &mut WizardContext) -> Option<StateId> {
    match ctx.pending {
        Some(WizardInput::StartRequest) if ctx.profile_complete => Some(StateId::Request),
        Some(WizardInput::StartRequest) => {
            warn!("WIZARD | {} | profile incomplete", ctx.dog_id);
            ctx.error = Some(WizardError::ProfileIncomplete);
            None
        }
        Some(WizardInput::Cancel) => None,
        _ => {
            ctx.reject("Overview");
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  REQUEST: handler fills in the request form
// ═══════════════════════════════════════════════════════════════════════════

fn request_enter(ctx: &mut WizardContext) {
    info!("WIZARD | {} | request form opened", ctx.dog_id);
}

fn request_update(ctx: &mut WizardContext) -> Option<StateId> {
    if cancelled(ctx) {
        return Some(StateId::Overview);
    }
    if ctx.pending == Some(WizardInput::Submit) {
        return Some(StateId::Review);
    }
    ctx.reject("Request");
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  REVIEW: waiting for the handler's e-signature
// ═══════════════════════════════════════════════════════════════════════════

fn review_enter(ctx: &mut WizardContext) {
    info!("WIZARD | {} | awaiting handler signature", ctx.dog_id);
}

fn review_update(ctx: &mut WizardContext) -> Option<StateId> {
    if cancelled(ctx) {
        return Some(StateId::Overview);
    }
    if ctx.pending == Some(WizardInput::HandlerSign) {
        ctx.handler_signature = Some(ctx.handler_name.clone());
        return Some(StateId::HandlerSigned);
    }
    ctx.reject("Review");
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  HANDLER_SIGNED: waiting for the veterinarian
// ═══════════════════════════════════════════════════════════════════════════

fn handler_signed_enter(ctx: &mut WizardContext) {
    info!(
        "WIZARD | {} | signed by {}",
        ctx.dog_id, ctx.handler_name
    );
}

fn handler_signed_update(ctx: &mut WizardContext) -> Option<StateId> {
    if cancelled(ctx) {
        return Some(StateId::Overview);
    }
    if ctx.pending == Some(WizardInput::VetSign) {
        let vet = ctx.vet_on_file.clone().unwrap_or_else(|| PENDING_VET.to_string());
        ctx.vet_signature = Some(vet);
        return Some(StateId::Submitted);
    }
    ctx.reject("HandlerSigned");
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SUBMITTED: terminal
// ═══════════════════════════════════════════════════════════════════════════

fn submitted_enter(ctx: &mut WizardContext) {
    ctx.submitted = true;
    info!(
        "WIZARD | {} | submitted (vet: {})",
        ctx.dog_id,
        ctx.vet_signature.as_deref().unwrap_or(PENDING_VET)
    );
}

fn submitted_update(ctx: &mut WizardContext) -> Option<StateId> {
    ctx.reject("Submitted");
    None
}
