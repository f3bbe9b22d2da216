use seatplan::db::*;
use seatplan::model::*;

fn setup() -> (rusqlite::Connection, Invitation) {
    let conn = schema::test_connection();
    let invitation = Invitation::create("Ana & Mihai".into());
    invitation_repo::insert(&conn, &invitation).unwrap();
    (conn, invitation)
}

fn guest(invitation: &Invitation, first: &str, last: &str) -> Guest {
    Guest {
        id: Id::generate(),
        invitation_id: invitation.id,
        first_name: first.into(),
        last_name: last.into(),
        email: None,
        phone: None,
        category: None,
        plus_one_allowed: false,
        plus_one_name: None,
        dietary_restrictions: None,
        notes: None,
        invitation_sent: false,
    }
}

fn table(invitation: &Invitation, number: i32, capacity: i32) -> Table {
    Table {
        id: Id::generate(),
        invitation_id: invitation.id,
        table_number: number,
        name: None,
        capacity,
    }
}

// ==========================================================================
// INVITATION REPO TESTS
// ==========================================================================

#[test]
fn invitation_insert_and_find() {
    let (conn, invitation) = setup();
    let found = invitation_repo::find_by_id(&conn, invitation.id).unwrap().unwrap();
    assert_eq!(found.title, "Ana & Mihai");
    assert_eq!(found.created_at.timestamp(), invitation.created_at.timestamp());
    assert!(invitation_repo::exists(&conn, invitation.id).unwrap());
}

#[test]
fn invitation_find_missing_returns_none() {
    let (conn, _) = setup();
    assert!(invitation_repo::find_by_id(&conn, Id::generate()).unwrap().is_none());
}

// ==========================================================================
// GUEST REPO TESTS
// ==========================================================================

#[test]
fn guest_insert_and_find() {
    let (conn, invitation) = setup();
    let mut ana = guest(&invitation, "Ana", "Pop");
    ana.email = Some("ana@example.com".into());
    ana.plus_one_allowed = true;
    ana.plus_one_name = Some("Dan".into());
    guest_repo::insert(&conn, &ana).unwrap();

    let found = guest_repo::find_by_id(&conn, ana.id).unwrap().unwrap();
    assert_eq!(found, ana);
}

#[test]
fn guest_update_persists_all_fields() {
    let (conn, invitation) = setup();
    let mut ana = guest(&invitation, "Ana", "Pop");
    guest_repo::insert(&conn, &ana).unwrap();

    ana.category = Some("Family".into());
    ana.notes = Some("Needs a high chair".into());
    ana.invitation_sent = true;
    guest_repo::update(&conn, &ana).unwrap();

    let found = guest_repo::find_by_id(&conn, ana.id).unwrap().unwrap();
    assert_eq!(found.category, Some("Family".into()));
    assert_eq!(found.notes, Some("Needs a high chair".into()));
    assert!(found.invitation_sent);
}

#[test]
fn guests_ordered_by_last_then_first_name() {
    let (conn, invitation) = setup();
    guest_repo::insert(&conn, &guest(&invitation, "Zoe", "Albu")).unwrap();
    guest_repo::insert(&conn, &guest(&invitation, "Bob", "popescu")).unwrap();
    guest_repo::insert(&conn, &guest(&invitation, "Ana", "Popescu")).unwrap();

    let names: Vec<String> = guest_repo::find_by_invitation(&conn, invitation.id)
        .unwrap()
        .iter()
        .map(|g| g.full_name())
        .collect();
    assert_eq!(names, vec!["Zoe Albu", "Ana Popescu", "Bob popescu"]);
}

#[test]
fn guests_are_partitioned_by_invitation() {
    let (conn, invitation) = setup();
    let other = Invitation::create("Baptism".into());
    invitation_repo::insert(&conn, &other).unwrap();

    guest_repo::insert(&conn, &guest(&invitation, "Ana", "Pop")).unwrap();
    guest_repo::insert(&conn, &guest(&other, "Ion", "Ionescu")).unwrap();

    assert_eq!(guest_repo::count_by_invitation(&conn, invitation.id).unwrap(), 1);
    assert_eq!(guest_repo::count_by_invitation(&conn, other.id).unwrap(), 1);
}

#[test]
fn guest_delete_reports_whether_removed() {
    let (conn, invitation) = setup();
    let ana = guest(&invitation, "Ana", "Pop");
    guest_repo::insert(&conn, &ana).unwrap();

    assert!(guest_repo::delete(&conn, ana.id).unwrap());
    assert!(!guest_repo::delete(&conn, ana.id).unwrap());
}

// ==========================================================================
// TABLE REPO TESTS
// ==========================================================================

#[test]
fn tables_ordered_by_number() {
    let (conn, invitation) = setup();
    for n in [5, 1, 3] {
        table_repo::insert(&conn, &table(&invitation, n, 8)).unwrap();
    }

    let numbers: Vec<i32> = table_repo::find_by_invitation(&conn, invitation.id)
        .unwrap()
        .iter()
        .map(|t| t.table_number)
        .collect();
    assert_eq!(numbers, vec![1, 3, 5]);
}

#[test]
fn table_max_number() {
    let (conn, invitation) = setup();
    assert_eq!(table_repo::max_table_number(&conn, invitation.id).unwrap(), None);

    table_repo::insert(&conn, &table(&invitation, 2, 8)).unwrap();
    table_repo::insert(&conn, &table(&invitation, 7, 8)).unwrap();
    assert_eq!(table_repo::max_table_number(&conn, invitation.id).unwrap(), Some(7));
}

#[test]
fn schema_rejects_zero_capacity() {
    let (conn, invitation) = setup();
    assert!(table_repo::insert(&conn, &table(&invitation, 1, 0)).is_err());
}

// ==========================================================================
// ASSIGNMENT REPO TESTS
// ==========================================================================

#[test]
fn assignment_upsert_replaces_previous_table() {
    let (conn, invitation) = setup();
    let ana = guest(&invitation, "Ana", "Pop");
    guest_repo::insert(&conn, &ana).unwrap();
    let t1 = table(&invitation, 1, 4);
    let t2 = table(&invitation, 2, 4);
    table_repo::insert(&conn, &t1).unwrap();
    table_repo::insert(&conn, &t2).unwrap();

    assignment_repo::upsert(&conn, &Assignment::create(ana.id, t1.id)).unwrap();
    assignment_repo::upsert(&conn, &Assignment::create(ana.id, t2.id)).unwrap();

    assert_eq!(assignment_repo::count_by_guest(&conn, ana.id).unwrap(), 1);
    let current = assignment_repo::find_by_guest(&conn, ana.id).unwrap().unwrap();
    assert_eq!(current.table_id, t2.id);
    assert!(assignment_repo::find_by_table(&conn, t1.id).unwrap().is_empty());
}

#[test]
fn assignment_requires_existing_rows() {
    let (conn, invitation) = setup();
    let t1 = table(&invitation, 1, 4);
    table_repo::insert(&conn, &t1).unwrap();

    // Foreign keys are enforced by the store.
    let orphan = Assignment::create(Id::generate(), t1.id);
    assert!(assignment_repo::upsert(&conn, &orphan).is_err());
}

#[test]
fn assignment_delete_by_table_counts_rows() {
    let (conn, invitation) = setup();
    let t1 = table(&invitation, 1, 4);
    table_repo::insert(&conn, &t1).unwrap();
    for name in ["Ana", "Ion", "Dan"] {
        let g = guest(&invitation, name, "Pop");
        guest_repo::insert(&conn, &g).unwrap();
        assignment_repo::upsert(&conn, &Assignment::create(g.id, t1.id)).unwrap();
    }

    assert_eq!(assignment_repo::delete_by_table(&conn, t1.id).unwrap(), 3);
    assert!(assignment_repo::find_by_invitation(&conn, invitation.id).unwrap().is_empty());
}

#[test]
fn guest_with_assignment_cannot_be_deleted_directly() {
    let (conn, invitation) = setup();
    let ana = guest(&invitation, "Ana", "Pop");
    guest_repo::insert(&conn, &ana).unwrap();
    let t1 = table(&invitation, 1, 4);
    table_repo::insert(&conn, &t1).unwrap();
    assignment_repo::upsert(&conn, &Assignment::create(ana.id, t1.id)).unwrap();

    // The assignment row must go first; the ops layer does this in a transaction.
    assert!(guest_repo::delete(&conn, ana.id).is_err());
}
