use seatplan::config::SeatingPolicy;
use seatplan::db::*;
use seatplan::error::{ErrorKind, SeatingError};
use seatplan::model::*;
use seatplan::ops::*;

fn setup() -> (rusqlite::Connection, Invitation) {
    let conn = schema::test_connection();
    let invitation = invitation_ops::create_invitation(&conn, "Ana & Mihai").unwrap();
    (conn, invitation)
}

fn add_guest(conn: &rusqlite::Connection, invitation: &Invitation, first: &str, last: &str) -> Guest {
    guest_ops::create_guest(conn, invitation.id, GuestDraft::named(first, last)).unwrap()
}

fn add_table(conn: &rusqlite::Connection, invitation: &Invitation, capacity: i32) -> Table {
    table_ops::create_table(conn, invitation.id, TableDraft::with_capacity(capacity)).unwrap()
}

const ADVISORY: SeatingPolicy = SeatingPolicy { enforce_capacity: false };
const ENFORCED: SeatingPolicy = SeatingPolicy { enforce_capacity: true };

// ==========================================================================
// INVITATION OPS TESTS
// ==========================================================================

#[test]
fn create_invitation_rejects_blank_title() {
    let conn = schema::test_connection();
    assert!(matches!(
        invitation_ops::create_invitation(&conn, "  "),
        Err(SeatingError::BlankField { .. })
    ));
}

#[test]
fn delete_invitation_removes_everything_it_owns() {
    let (conn, invitation) = setup();
    let ana = add_guest(&conn, &invitation, "Ana", "Pop");
    let t1 = add_table(&conn, &invitation, 4);
    assignment_ops::assign(&conn, invitation.id, ana.id, t1.id, ADVISORY).unwrap();

    invitation_ops::delete_invitation(&conn, invitation.id).unwrap();

    assert!(invitation_repo::find_by_id(&conn, invitation.id).unwrap().is_none());
    assert!(guest_repo::find_by_id(&conn, ana.id).unwrap().is_none());
    assert!(table_repo::find_by_id(&conn, t1.id).unwrap().is_none());
    assert_eq!(assignment_repo::count_by_guest(&conn, ana.id).unwrap(), 0);
}

// ==========================================================================
// GUEST OPS TESTS
// ==========================================================================

#[test]
fn create_guest_trims_names() {
    let (conn, invitation) = setup();
    let guest = add_guest(&conn, &invitation, "  Ana ", " Pop  ");
    assert_eq!(guest.first_name, "Ana");
    assert_eq!(guest.last_name, "Pop");
    assert!(!guest.invitation_sent);
}

#[test]
fn create_guest_rejects_blank_last_name() {
    let (conn, invitation) = setup();
    let result = guest_ops::create_guest(&conn, invitation.id, GuestDraft::named("Ana", ""));
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(guest_ops::list_guests(&conn, invitation.id).unwrap().is_empty());
}

#[test]
fn create_guest_rejects_malformed_email() {
    let (conn, invitation) = setup();
    let draft = GuestDraft {
        email: Some("ana-at-example".into()),
        ..GuestDraft::named("Ana", "Pop")
    };
    assert!(matches!(
        guest_ops::create_guest(&conn, invitation.id, draft),
        Err(SeatingError::InvalidEmail { .. })
    ));
}

#[test]
fn create_guest_for_unknown_invitation_is_not_found() {
    let conn = schema::test_connection();
    let err = guest_ops::create_guest(&conn, Id::generate(), GuestDraft::named("Ana", "Pop")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn plus_one_name_dropped_when_not_allowed() {
    let (conn, invitation) = setup();
    let draft = GuestDraft {
        plus_one_allowed: false,
        plus_one_name: Some("Jane".into()),
        ..GuestDraft::named("Ana", "Pop")
    };
    let guest = guest_ops::create_guest(&conn, invitation.id, draft).unwrap();
    assert_eq!(guest.plus_one_name, None);
    assert_eq!(guest.seat_count(), 1);
}

#[test]
fn update_guest_merges_only_given_fields() {
    let (conn, invitation) = setup();
    let draft = GuestDraft {
        email: Some("ana@example.com".into()),
        category: Some("Family".into()),
        ..GuestDraft::named("Ana", "Pop")
    };
    let guest = guest_ops::create_guest(&conn, invitation.id, draft).unwrap();

    let patch = GuestPatch {
        last_name: Some("Ionescu".into()),
        category: Some(None),
        ..GuestPatch::default()
    };
    let updated = guest_ops::update_guest(&conn, guest.id, patch).unwrap();

    assert_eq!(updated.first_name, "Ana");
    assert_eq!(updated.last_name, "Ionescu");
    assert_eq!(updated.email, Some("ana@example.com".into()));
    assert_eq!(updated.category, None);

    let stored = guest_repo::find_by_id(&conn, guest.id).unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[test]
fn update_guest_rejects_blanking_a_name() {
    let (conn, invitation) = setup();
    let guest = add_guest(&conn, &invitation, "Ana", "Pop");
    let patch = GuestPatch {
        first_name: Some("   ".into()),
        ..GuestPatch::default()
    };
    assert!(guest_ops::update_guest(&conn, guest.id, patch).is_err());
    let stored = guest_repo::find_by_id(&conn, guest.id).unwrap().unwrap();
    assert_eq!(stored.first_name, "Ana");
}

#[test]
fn update_missing_guest_is_not_found() {
    let (conn, _) = setup();
    let err = guest_ops::update_guest(&conn, Id::generate(), GuestPatch::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn delete_guest_removes_assignment() {
    let (conn, invitation) = setup();
    let ana = add_guest(&conn, &invitation, "Ana", "Pop");
    let ion = add_guest(&conn, &invitation, "Ion", "Pop");
    let t1 = add_table(&conn, &invitation, 4);
    assignment_ops::assign(&conn, invitation.id, ana.id, t1.id, ADVISORY).unwrap();
    assignment_ops::assign(&conn, invitation.id, ion.id, t1.id, ADVISORY).unwrap();

    guest_ops::delete_guest(&conn, ana.id).unwrap();

    assert!(assignment_repo::find_by_guest(&conn, ana.id).unwrap().is_none());
    let tables = assignment_ops::list_with_guests(&conn, invitation.id).unwrap();
    assert_eq!(tables[0].guests.len(), 1);
    assert_eq!(tables[0].guests[0].id, ion.id);
}

#[test]
fn delete_missing_guest_is_not_found() {
    let (conn, _) = setup();
    assert!(matches!(
        guest_ops::delete_guest(&conn, Id::generate()),
        Err(SeatingError::NotFound { .. })
    ));
}

#[test]
fn mark_all_invited_counts_changes() {
    let (conn, invitation) = setup();
    let ana = add_guest(&conn, &invitation, "Ana", "Pop");
    add_guest(&conn, &invitation, "Ion", "Pop");
    guest_ops::set_invitation_sent(&conn, ana.id, true).unwrap();

    assert_eq!(guest_ops::mark_all_invited(&conn, invitation.id).unwrap(), 1);
    assert!(guest_ops::list_guests(&conn, invitation.id)
        .unwrap()
        .iter()
        .all(|g| g.invitation_sent));
}

// ==========================================================================
// TABLE OPS TESTS
// ==========================================================================

#[test]
fn create_table_suggests_next_number() {
    let (conn, invitation) = setup();
    assert_eq!(table_ops::next_table_number(&conn, invitation.id).unwrap(), 1);

    let draft = TableDraft {
        table_number: Some(4),
        name: Some("Family".into()),
        capacity: 10,
    };
    table_ops::create_table(&conn, invitation.id, draft).unwrap();
    let next = add_table(&conn, &invitation, 8);

    assert_eq!(next.table_number, 5);
    assert_eq!(table_ops::next_table_number(&conn, invitation.id).unwrap(), 6);
}

#[test]
fn create_table_rejects_non_positive_capacity() {
    let (conn, invitation) = setup();
    for capacity in [0, -3] {
        let err = table_ops::create_table(&conn, invitation.id, TableDraft::with_capacity(capacity)).unwrap_err();
        assert!(matches!(err, SeatingError::NonPositive { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(table_ops::list_tables(&conn, invitation.id).unwrap().is_empty());
}

#[test]
fn create_table_rejects_duplicate_number() {
    let (conn, invitation) = setup();
    add_table(&conn, &invitation, 8);
    let draft = TableDraft {
        table_number: Some(1),
        name: None,
        capacity: 8,
    };
    assert!(matches!(
        table_ops::create_table(&conn, invitation.id, draft),
        Err(SeatingError::AlreadyExists { .. })
    ));
}

#[test]
fn table_numbers_may_repeat_across_invitations() {
    let (conn, invitation) = setup();
    let other = invitation_ops::create_invitation(&conn, "Party").unwrap();
    add_table(&conn, &invitation, 8);
    let t = add_table(&conn, &other, 8);
    assert_eq!(t.table_number, 1);
}

#[test]
fn update_table_changes_name_and_capacity() {
    let (conn, invitation) = setup();
    let t = add_table(&conn, &invitation, 8);
    let patch = TablePatch {
        name: Some(Some("Head table".into())),
        capacity: Some(12),
        ..TablePatch::default()
    };
    let updated = table_ops::update_table(&conn, t.id, patch).unwrap();
    assert_eq!(updated.label(), "Table 1 (Head table)");
    assert_eq!(updated.capacity, 12);
}

#[test]
fn update_table_keeps_own_number() {
    let (conn, invitation) = setup();
    let t = add_table(&conn, &invitation, 8);
    let patch = TablePatch {
        table_number: Some(1),
        ..TablePatch::default()
    };
    assert!(table_ops::update_table(&conn, t.id, patch).is_ok());
}

#[test]
fn update_table_rejects_zero_capacity() {
    let (conn, invitation) = setup();
    let t = add_table(&conn, &invitation, 8);
    let patch = TablePatch {
        capacity: Some(0),
        ..TablePatch::default()
    };
    assert!(table_ops::update_table(&conn, t.id, patch).is_err());
    assert_eq!(table_ops::require(&conn, t.id).unwrap().capacity, 8);
}

#[test]
fn delete_table_returns_guests_to_pool() {
    let (conn, invitation) = setup();
    let ana = add_guest(&conn, &invitation, "Ana", "Pop");
    let t1 = add_table(&conn, &invitation, 4);
    assignment_ops::assign(&conn, invitation.id, ana.id, t1.id, ADVISORY).unwrap();

    assert_eq!(table_ops::delete_table(&conn, t1.id).unwrap(), 1);

    assert!(guest_repo::find_by_id(&conn, ana.id).unwrap().is_some());
    assert_eq!(assignment_ops::table_of(&conn, ana.id).unwrap(), None);
}

// ==========================================================================
// ASSIGNMENT OPS TESTS
// ==========================================================================

#[test]
fn assign_then_reassign_moves_guest() {
    let (conn, invitation) = setup();
    let g = add_guest(&conn, &invitation, "Ana", "Pop");
    let t1 = add_table(&conn, &invitation, 4);
    let t2 = add_table(&conn, &invitation, 4);

    assignment_ops::assign(&conn, invitation.id, g.id, t1.id, ADVISORY).unwrap();
    assert_eq!(assignment_ops::table_of(&conn, g.id).unwrap(), Some(t1.id));

    assignment_ops::assign(&conn, invitation.id, g.id, t2.id, ADVISORY).unwrap();
    let tables = assignment_ops::list_with_guests(&conn, invitation.id).unwrap();
    assert!(tables[0].guests.is_empty());
    assert_eq!(tables[1].guests.len(), 1);
    assert_eq!(tables[1].guests[0].id, g.id);
}

#[test]
fn assign_unknown_guest_is_foreign_key_error() {
    let (conn, invitation) = setup();
    let t1 = add_table(&conn, &invitation, 4);
    let err = assignment_ops::assign(&conn, invitation.id, Id::generate(), t1.id, ADVISORY).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ForeignKey);
}

#[test]
fn assign_to_table_of_other_invitation_is_foreign_key_error() {
    let (conn, invitation) = setup();
    let other = invitation_ops::create_invitation(&conn, "Party").unwrap();
    let g = add_guest(&conn, &invitation, "Ana", "Pop");
    let foreign_table = add_table(&conn, &other, 4);

    let err = assignment_ops::assign(&conn, invitation.id, g.id, foreign_table.id, ADVISORY).unwrap_err();
    assert!(matches!(err, SeatingError::ForeignKey { ref entity_type, .. } if entity_type == "Table"));
    assert_eq!(assignment_ops::table_of(&conn, g.id).unwrap(), None);
}

#[test]
fn unassign_is_noop_for_unseated_guest() {
    let (conn, invitation) = setup();
    let g = add_guest(&conn, &invitation, "Ana", "Pop");
    assert!(!assignment_ops::unassign(&conn, invitation.id, g.id).unwrap());
}

#[test]
fn unassign_frees_seat() {
    let (conn, invitation) = setup();
    let g = add_guest(&conn, &invitation, "Ana", "Pop");
    let t1 = add_table(&conn, &invitation, 4);
    assignment_ops::assign(&conn, invitation.id, g.id, t1.id, ADVISORY).unwrap();

    assert!(assignment_ops::unassign(&conn, invitation.id, g.id).unwrap());
    assert_eq!(assignment_ops::table_of(&conn, g.id).unwrap(), None);
}

#[test]
fn unassign_unknown_guest_is_foreign_key_error() {
    let (conn, invitation) = setup();
    let err = assignment_ops::unassign(&conn, invitation.id, Id::generate()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ForeignKey);
}

#[test]
fn capacity_is_advisory_by_default() {
    let (conn, invitation) = setup();
    let t1 = add_table(&conn, &invitation, 1);
    let ana = add_guest(&conn, &invitation, "Ana", "Pop");
    let ion = add_guest(&conn, &invitation, "Ion", "Pop");

    assignment_ops::assign(&conn, invitation.id, ana.id, t1.id, ADVISORY).unwrap();
    assignment_ops::assign(&conn, invitation.id, ion.id, t1.id, ADVISORY).unwrap();

    let tables = assignment_ops::list_with_guests(&conn, invitation.id).unwrap();
    assert_eq!(tables[0].occupant_count(), 2);
    assert_eq!(tables[0].capacity_status(), CapacityStatus::Over);
}

#[test]
fn enforced_capacity_rejects_overbooking() {
    let (conn, invitation) = setup();
    let t1 = add_table(&conn, &invitation, 2);
    let ana = add_guest(&conn, &invitation, "Ana", "Pop");
    let draft = GuestDraft {
        plus_one_allowed: true,
        plus_one_name: Some("Jane".into()),
        ..GuestDraft::named("Ion", "Pop")
    };
    let ion = guest_ops::create_guest(&conn, invitation.id, draft).unwrap();

    assignment_ops::assign(&conn, invitation.id, ana.id, t1.id, ENFORCED).unwrap();
    let err = assignment_ops::assign(&conn, invitation.id, ion.id, t1.id, ENFORCED).unwrap_err();

    assert!(matches!(
        err,
        SeatingError::CapacityExceeded { table_number: 1, occupants: 1, capacity: 2 }
    ));
    assert_eq!(assignment_ops::table_of(&conn, ion.id).unwrap(), None);
}

#[test]
fn enforced_capacity_allows_reassigning_to_same_full_table() {
    let (conn, invitation) = setup();
    let t1 = add_table(&conn, &invitation, 1);
    let ana = add_guest(&conn, &invitation, "Ana", "Pop");

    assignment_ops::assign(&conn, invitation.id, ana.id, t1.id, ENFORCED).unwrap();
    assert!(assignment_ops::assign(&conn, invitation.id, ana.id, t1.id, ENFORCED).is_ok());
}

#[test]
fn list_with_guests_includes_empty_tables_in_number_order() {
    let (conn, invitation) = setup();
    for number in [3, 1, 2] {
        let draft = TableDraft {
            table_number: Some(number),
            name: None,
            capacity: 6,
        };
        table_ops::create_table(&conn, invitation.id, draft).unwrap();
    }
    let numbers: Vec<i32> = assignment_ops::list_with_guests(&conn, invitation.id)
        .unwrap()
        .iter()
        .map(|t| t.table.table_number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}
