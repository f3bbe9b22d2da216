use rusqlite::Connection;

use crate::error::SeatingResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// Foreign keys are declared without `ON DELETE CASCADE`: cascades are
/// performed explicitly by the ops layer inside a transaction.
pub fn initialize(conn: &Connection) -> SeatingResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS invitations (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS guests (
            id TEXT PRIMARY KEY NOT NULL,
            invitation_id TEXT NOT NULL REFERENCES invitations(id),
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            category TEXT,
            plus_one_allowed INTEGER NOT NULL DEFAULT 0,
            plus_one_name TEXT,
            dietary_restrictions TEXT,
            notes TEXT,
            invitation_sent INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_guests_invitation ON guests(invitation_id);

        CREATE TABLE IF NOT EXISTS seating_tables (
            id TEXT PRIMARY KEY NOT NULL,
            invitation_id TEXT NOT NULL REFERENCES invitations(id),
            table_number INTEGER NOT NULL,
            name TEXT,
            capacity INTEGER NOT NULL CHECK (capacity >= 1)
        );

        CREATE INDEX IF NOT EXISTS idx_tables_invitation ON seating_tables(invitation_id);

        CREATE TABLE IF NOT EXISTS assignments (
            guest_id TEXT PRIMARY KEY NOT NULL REFERENCES guests(id),
            table_id TEXT NOT NULL REFERENCES seating_tables(id),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_assignments_table ON assignments(table_id);
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    initialize(&conn).expect("initialize schema");
    conn
}
