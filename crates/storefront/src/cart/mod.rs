//! Cart mutation dispatch and synchronization.
//!
//! The dispatcher maps a tagged form submission onto exactly one remote
//! cart mutation. Parsing, planning, and execution are separate steps:
//! [`action::CartAction`] is the typed form of the submission,
//! [`action::plan`] turns it into a [`action::MutationPlan`] (or decides
//! no remote call is needed), and the plan executes against the commerce
//! client. Validation failures never reach the planner, so a malformed
//! submission provably makes zero remote calls.

pub mod action;
pub mod sync;
pub mod upsell;

pub use action::{ActionError, CartAction, MutationPlan, PlanOutcome};
pub use sync::{CartSync, FetchGate, SyncedCart};
pub use upsell::UpsellInjector;
