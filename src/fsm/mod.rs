//! Function-pointer state machine driving the verification request wizard.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                    │
//! │  ┌───────────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId       │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├───────────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Overview      │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Request       │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Review        │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ HandlerSigned │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Submitted     │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  └───────────────┴───────────┴──────────┴───────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each [`Fsm::step`] places one [`WizardInput`] on the context and calls
//! `on_update` for the current state. A `Some(next_id)` result runs
//! `on_exit` for the current state, then `on_enter` for the next. A
//! handler that rejects its input leaves an error on the context and
//! returns `None`.

pub mod context;
pub mod states;

use context::{WizardContext, WizardInput};
use log::info;

use crate::error::WizardError;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum StateId {
    Overview = 0,
    Request = 1,
    Review = 2,
    HandlerSigned = 3,
    Submitted = 4,
}

impl StateId {
    pub const COUNT: usize = 5;

    pub fn is_terminal(self) -> bool {
        self == Self::Submitted
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// `on_enter` / `on_exit` action. Runs once per transition.
pub type StateActionFn = fn(&mut WizardContext);

/// Per-step handler. Returns `Some(next)` to transition.
pub type StateUpdateFn = fn(&mut WizardContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl Fsm {
    /// Each row's `id` must match its position in `table`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter`. Call once after construction.
    pub fn start(&mut self, ctx: &mut WizardContext) {
        info!(
            "WIZARD | {} | starting in {}",
            ctx.dog_id, self.table[self.current].name
        );
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Feed one input through the current state's handler.
    pub fn step(
        &mut self,
        input: WizardInput,
        ctx: &mut WizardContext,
    ) -> Result<StateId, WizardError> {
        ctx.pending = Some(input);
        ctx.error = None;

        let next = (self.table[self.current].on_update)(ctx);
        ctx.pending = None;

        if let Some(err) = ctx.error.take() {
            return Err(err);
        }
        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
        Ok(self.current_state())
    }

    pub fn current_state(&self) -> StateId {
        self.table[self.current].id
    }

    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut WizardContext) {
        let next_idx = next_id as usize;

        info!(
            "WIZARD | {} | {} -> {}",
            ctx.dog_id, self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::context::{WizardContext, WizardInput};
    use super::*;

    fn make_ctx(complete: bool) -> WizardContext {
        WizardContext::new("dog-1", "John Doe", complete, Some("Dr. Emily Chen, DVM".into()))
    }

    fn make_fsm(ctx: &mut WizardContext) -> Fsm {
        let mut fsm = Fsm::new(states::build_state_table(), StateId::Overview);
        fsm.start(ctx);
        fsm
    }

    #[test]
    fn starts_in_overview() {
        let mut ctx = make_ctx(true);
        let fsm = make_fsm(&mut ctx);
        assert_eq!(fsm.current_state(), StateId::Overview);
        assert_eq!(fsm.current_name(), "Overview");
    }

    #[test]
    fn full_happy_path() {
        let mut ctx = make_ctx(true);
        let mut fsm = make_fsm(&mut ctx);
        assert_eq!(fsm.step(WizardInput::StartRequest, &mut ctx), Ok(StateId::Request));
        assert_eq!(fsm.step(WizardInput::Submit, &mut ctx), Ok(StateId::Review));
        assert_eq!(fsm.step(WizardInput::HandlerSign, &mut ctx), Ok(StateId::HandlerSigned));
        assert_eq!(ctx.handler_signature.as_deref(), Some("John Doe"));
        assert_eq!(fsm.step(WizardInput::VetSign, &mut ctx), Ok(StateId::Submitted));
        assert_eq!(ctx.vet_signature.as_deref(), Some("Dr. Emily Chen, DVM"));
        assert!(ctx.submitted);
    }

    #[test]
    fn incomplete_profile_cannot_start() {
        let mut ctx = make_ctx(false);
        let mut fsm = make_fsm(&mut ctx);
        assert_eq!(
            fsm.step(WizardInput::StartRequest, &mut ctx),
            Err(WizardError::ProfileIncomplete)
        );
        assert_eq!(fsm.current_state(), StateId::Overview);
    }

    #[test]
    fn out_of_order_step_is_rejected() {
        let mut ctx = make_ctx(true);
        let mut fsm = make_fsm(&mut ctx);
        let err = fsm.step(WizardInput::VetSign, &mut ctx).unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidStep {
                state: "Overview",
                input: "vet-sign"
            }
        );
        assert_eq!(fsm.current_state(), StateId::Overview);
    }

    #[test]
    fn cancel_returns_to_overview_and_clears_signatures() {
        let mut ctx = make_ctx(true);
        let mut fsm = make_fsm(&mut ctx);
        fsm.step(WizardInput::StartRequest, &mut ctx).unwrap();
        fsm.step(WizardInput::Submit, &mut ctx).unwrap();
        fsm.step(WizardInput::HandlerSign, &mut ctx).unwrap();
        assert_eq!(fsm.step(WizardInput::Cancel, &mut ctx), Ok(StateId::Overview));
        assert!(ctx.handler_signature.is_none());
    }

    #[test]
    fn submitted_is_terminal() {
        let mut ctx = make_ctx(true);
        let mut fsm = make_fsm(&mut ctx);
        for input in [
            WizardInput::StartRequest,
            WizardInput::Submit,
            WizardInput::HandlerSign,
            WizardInput::VetSign,
        ] {
            fsm.step(input, &mut ctx).unwrap();
        }
        assert!(fsm.current_state().is_terminal());
        assert!(fsm.step(WizardInput::Cancel, &mut ctx).is_err());
        assert_eq!(fsm.current_state(), StateId::Submitted);
    }

    #[test]
    fn missing_vet_falls_back_to_pending_label() {
        let mut ctx = WizardContext::new("dog-2", "Sarah Johnson", true, None);
        let mut fsm = make_fsm(&mut ctx);
        for input in [
            WizardInput::StartRequest,
            WizardInput::Submit,
            WizardInput::HandlerSign,
            WizardInput::VetSign,
        ] {
            fsm.step(input, &mut ctx).unwrap();
        }
        assert_eq!(ctx.vet_signature.as_deref(), Some("Pending veterinarian"));
    }

    #[test]
    fn table_rows_sit_at_their_state_index() {
        for (i, row) in states::build_state_table().iter().enumerate() {
            assert_eq!(row.id as usize, i);
        }
    }
}
