//! Tests for the Claim aggregate and its status machine

use chrono::Utc;
use rust_decimal_macros::dec;

use core_kernel::{Money, UserId, UserPolicyId};
use domain_claims::{Claim, ClaimDecision, ClaimError, ClaimStatus};

fn pending() -> Claim {
    Claim::file(
        UserId::new(),
        UserPolicyId::new(),
        Utc::now().date_naive(),
        "Windshield shattered in hailstorm",
        Money::inr(dec!(18000)),
        Some(UserId::new()),
    )
}

#[test]
fn filed_claim_starts_pending_and_undecided() {
    let claim = pending();
    assert_eq!(claim.status, ClaimStatus::Pending);
    assert!(claim.decision_notes.is_none());
    assert!(claim.decided_by_agent_id.is_none());
    assert!(claim.decided_at.is_none());
}

#[test]
fn all_transitions_originate_from_pending_or_needs_info() {
    use ClaimStatus::*;
    for from in [Approved, Rejected, Cancelled] {
        for to in [Pending, Approved, Rejected, Cancelled, NeedsInfo] {
            assert!(!from.can_transition_to(to), "{from:?} -> {to:?}");
        }
    }
    assert!(Pending.can_transition_to(Approved));
    assert!(Pending.can_transition_to(Rejected));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Pending.can_transition_to(NeedsInfo));
    assert!(NeedsInfo.can_transition_to(Approved));
    assert!(NeedsInfo.can_transition_to(Rejected));
    assert!(!NeedsInfo.can_transition_to(Pending));
    assert!(!NeedsInfo.can_transition_to(Cancelled));
}

#[test]
fn decision_maps_to_status() {
    assert_eq!(ClaimDecision::Approved.to_status(), ClaimStatus::Approved);
    assert_eq!(ClaimDecision::Rejected.to_status(), ClaimStatus::Rejected);
    assert_eq!(ClaimDecision::Rejected.as_past_tense(), "rejected");
}

#[test]
fn terminal_claims_are_immutable_through_transition() {
    let mut claim = pending();
    claim.transition(ClaimStatus::Approved).unwrap();

    let err = claim.transition(ClaimStatus::Rejected).unwrap_err();
    assert!(matches!(err, ClaimError::InvalidStatusTransition { .. }));
}

#[test]
fn force_status_is_the_only_escape_hatch() {
    let mut claim = pending();
    claim.transition(ClaimStatus::Cancelled).unwrap();

    claim.force_status(ClaimStatus::Rejected);
    assert_eq!(claim.status, ClaimStatus::Rejected);
}

#[test]
fn serde_round_trip_preserves_claim() {
    let claim = pending();
    let json = serde_json::to_string(&claim).unwrap();
    assert!(json.contains("\"PENDING\""));

    let back: Claim = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, claim.id);
    assert_eq!(back.amount_claimed, claim.amount_claimed);
}
