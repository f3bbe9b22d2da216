use rusqlite::Connection;
use std::io::{self, Write};

use crate::board::{Notification, SeatingBoard};
use crate::config::SeatingPolicy;
use crate::error::SeatingError;
use crate::model::*;
use crate::ops::*;
use crate::queries::guest_queries::GuestFilter;

pub struct CLIContext {
    pub conn: Connection,
    pub invitation: Invitation,
    pub policy: SeatingPolicy,
}

impl CLIContext {
    pub fn new(conn: Connection, invitation: Invitation, policy: SeatingPolicy) -> Self {
        Self {
            conn,
            invitation,
            policy,
        }
    }

    pub fn invitation_id(&self) -> Id<Invitation> {
        self.invitation.id
    }

    /// A freshly loaded board for the current invitation.
    pub fn board(&self) -> Option<SeatingBoard<'_>> {
        match SeatingBoard::load(&self.conn, self.invitation_id(), self.policy) {
            Ok(board) => Some(board),
            Err(e) => {
                self.print_error(&e);
                None
            }
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Ask a yes/no question. Anything but y/yes is "no".
    pub fn confirm(&self, prompt: &str) -> bool {
        matches!(
            self.prompt(prompt).map(|s| s.to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    /// Find a guest by name or email query. Prints error if not found or ambiguous.
    pub fn find_guest(&self, args: &str) -> Option<Guest> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let guests = guest_ops::list_guests(&self.conn, self.invitation_id()).unwrap_or_default();
        let filter = GuestFilter::search(query);
        let matches = filter.apply(&guests);

        match matches.len() {
            0 => {
                println!("No guest found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                // Check for exact match
                if let Some(exact) = matches
                    .iter()
                    .find(|g| g.full_name().eq_ignore_ascii_case(query))
                {
                    return Some((*exact).clone());
                }
                println!("Multiple matches found:");
                for g in &matches {
                    println!("  {}", g.full_name());
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Find a table by its number.
    pub fn find_table(&self, args: &str) -> Option<Table> {
        let query = args.trim().trim_start_matches('#');
        let number = match query.parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                println!("'{}' is not a table number", args.trim());
                return None;
            }
        };

        let tables = table_ops::list_tables(&self.conn, self.invitation_id()).unwrap_or_default();
        match tables.into_iter().find(|t| t.table_number == number) {
            Some(t) => Some(t),
            None => {
                println!("No table number {}", number);
                None
            }
        }
    }

    pub fn print_notification(&self, notification: &Notification) {
        println!("{}", notification);
    }

    /// Print an error.
    pub fn print_error(&self, e: &SeatingError) {
        println!("Error: {}", e);
    }
}
