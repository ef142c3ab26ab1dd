//! Cart/UI synchronization.
//!
//! Two small pieces of bookkeeping keep independently fetched views of the
//! cart consistent:
//!
//! - [`CartSync`] tracks in-flight add-to-cart submissions and decides when
//!   the cart drawer auto-opens. The decision always re-evaluates against
//!   the latest snapshot of tracked submissions, opens at most once while
//!   the drawer is closed, and ignores protection-only adds and failures.
//! - [`FetchGate`] orders concurrent cart refreshes by initiation sequence
//!   number, so a slow stale response can never overwrite a newer one.
//! - [`SyncedCart`] holds the last-known-good cart snapshot behind a
//!   [`FetchGate`], giving display code a consistent view while canonical
//!   fetches are in flight.

/// Lifecycle of one tracked add-to-cart submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Fetch dispatched, response pending.
    Submitting,
    /// Response received.
    Settled { success: bool },
}

#[derive(Debug, Clone)]
struct Submission {
    id: u64,
    phase: SubmissionPhase,
    /// Adds consisting solely of the protection line never open the drawer.
    protection_only: bool,
    /// Set once this submission has contributed a drawer open.
    drawer_handled: bool,
}

impl Submission {
    /// Whether this submission qualifies to open the drawer right now.
    fn qualifies(&self) -> bool {
        !self.protection_only
            && !self.drawer_handled
            && matches!(
                self.phase,
                SubmissionPhase::Submitting | SubmissionPhase::Settled { success: true }
            )
    }
}

/// Tracks add-to-cart submissions and the drawer open/closed state.
#[derive(Debug, Default)]
pub struct CartSync {
    submissions: Vec<Submission>,
    next_id: u64,
    drawer_open: bool,
}

impl CartSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new submission entering the Submitting phase.
    ///
    /// Returns the submission's ID plus whether this change opened the
    /// drawer.
    pub fn begin(&mut self, protection_only: bool) -> (u64, bool) {
        let id = self.next_id;
        self.next_id += 1;
        self.submissions.push(Submission {
            id,
            phase: SubmissionPhase::Submitting,
            protection_only,
            drawer_handled: false,
        });
        (id, self.evaluate())
    }

    /// Settle a submission with its outcome.
    ///
    /// Returns whether this change opened the drawer. Unknown IDs are
    /// ignored (the submission may have been pruned).
    pub fn settle(&mut self, id: u64, success: bool) -> bool {
        if let Some(submission) = self.submissions.iter_mut().find(|s| s.id == id) {
            submission.phase = SubmissionPhase::Settled { success };
        }
        self.evaluate()
    }

    /// Whether the drawer is currently open.
    #[must_use]
    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Close the drawer (shopper dismissed it).
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Drop settled submissions that can no longer affect the drawer.
    pub fn prune_settled(&mut self) {
        self.submissions
            .retain(|s| matches!(s.phase, SubmissionPhase::Submitting));
    }

    /// Re-evaluate the drawer decision against the current snapshot.
    ///
    /// Opens the drawer at most once per qualifying wave: every currently
    /// qualifying submission is marked handled whether or not it was the
    /// one that flipped the state, so concurrent qualifying adds cannot
    /// open the drawer twice.
    fn evaluate(&mut self) -> bool {
        let mut any_qualifying = false;
        for submission in &mut self.submissions {
            if submission.qualifies() {
                submission.drawer_handled = true;
                any_qualifying = true;
            }
        }

        if any_qualifying && !self.drawer_open {
            self.drawer_open = true;
            true
        } else {
            false
        }
    }
}

/// Orders concurrent fetches of one logical resource by initiation time.
///
/// Each fetch takes a sequence number from [`FetchGate::begin`] before
/// dispatch; on completion, [`FetchGate::try_apply`] admits the response
/// only if nothing newer has been applied. Last-write-wins is therefore
/// decided by initiation order, not completion order.
#[derive(Debug, Default)]
pub struct FetchGate {
    next_seq: u64,
    applied: Option<u64>,
}

impl FetchGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the sequence number for a fetch about to be dispatched.
    pub fn begin(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Admit a completed fetch's response.
    ///
    /// Returns `false` when a response with a higher sequence number has
    /// already been applied; the caller must discard the stale result.
    pub fn try_apply(&mut self, seq: u64) -> bool {
        if self.applied.is_some_and(|applied| applied >= seq) {
            return false;
        }
        self.applied = Some(seq);
        true
    }
}

/// Last-known-good cart view behind a [`FetchGate`].
///
/// Display code reads [`SyncedCart::cart`] at any time; the held snapshot
/// only ever advances to a fresher one, never regresses to a stale fetch.
#[derive(Debug, Default)]
pub struct SyncedCart {
    gate: FetchGate,
    cart: Option<crate::commerce::Cart>,
}

impl SyncedCart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the sequence number for a canonical cart fetch.
    pub fn begin_fetch(&mut self) -> u64 {
        self.gate.begin()
    }

    /// Apply a fetched snapshot; stale responses are discarded.
    ///
    /// Returns whether the snapshot was admitted.
    pub fn apply(&mut self, seq: u64, cart: crate::commerce::Cart) -> bool {
        if !self.gate.try_apply(seq) {
            return false;
        }
        self.cart = Some(cart);
        true
    }

    /// The cached cart, possibly behind an in-flight fetch.
    #[must_use]
    pub fn cart(&self) -> Option<&crate::commerce::Cart> {
        self.cart.as_ref()
    }
}
