//! CSV import and export of guest lists.

pub mod codec;
pub mod columns;

use rusqlite::Connection;
use tracing::{info, warn};

use crate::error::SeatingResult;
use crate::model::{Guest, GuestDraft, Id, Invitation};
use crate::ops::{guest_ops, invitation_ops};
use columns::GUEST_COLUMNS;

/// Outcome of a bulk import. Rejected rows never abort the rest.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub success: usize,
    /// One entry per rejected row: "row N (line L): reason".
    pub errors: Vec<String>,
    pub created: Vec<Guest>,
}

/// One data row after column mapping and cell validation.
#[derive(Debug)]
pub struct ParsedRow {
    /// 1-based data row number; the header is not counted.
    pub row: usize,
    pub line: usize,
    pub draft: SeatingResult<GuestDraft>,
}

impl ParsedRow {
    fn describe(&self, reason: &impl std::fmt::Display) -> String {
        format!("row {} (line {}): {}", self.row, self.line, reason)
    }
}

/// Serializes guests with a header row, in `GUEST_COLUMNS` order.
pub fn export_guests(guests: &[Guest]) -> String {
    let mut out = String::new();
    codec::write_record(&mut out, &columns::headers());
    for guest in guests {
        let cells: Vec<String> = GUEST_COLUMNS.iter().map(|c| c.read(guest)).collect();
        codec::write_record(&mut out, &cells);
    }
    out
}

/// Parses CSV text into guest drafts without touching the store.
///
/// Fails as a whole only for malformed CSV or a missing required column.
/// Blank lines are skipped but still counted in row numbers.
pub fn parse_guests(csv_text: &str) -> SeatingResult<Vec<ParsedRow>> {
    let mut records = codec::parse(csv_text)?.into_iter();
    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };
    let mapping = columns::map_header(&header.fields)?;

    let rows = records
        .enumerate()
        .filter(|(_, record)| !record.is_blank())
        .map(|(index, record)| {
            let mut draft = GuestDraft::default();
            let draft = mapping
                .iter()
                .enumerate()
                .filter_map(|(i, column)| column.map(|c| (i, c)))
                .try_for_each(|(i, column)| column.write(&mut draft, record.get(i)))
                .map(|()| draft);
            ParsedRow {
                row: index + 1,
                line: record.line,
                draft,
            }
        })
        .collect();

    Ok(rows)
}

/// Creates a guest for every valid row. Invalid rows are reported in
/// `errors` and skipped.
pub fn import_guests(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    csv_text: &str,
) -> SeatingResult<ImportReport> {
    invitation_ops::require(conn, invitation_id)?;

    let mut report = ImportReport::default();
    for parsed in parse_guests(csv_text)? {
        let created = match &parsed.draft {
            Ok(draft) => guest_ops::create_guest(conn, invitation_id, draft.clone()),
            Err(e) => {
                let message = parsed.describe(e);
                warn!(%message, "rejected import row");
                report.errors.push(message);
                continue;
            }
        };

        match created {
            Ok(guest) => {
                report.success += 1;
                report.created.push(guest);
            }
            Err(e) => {
                let message = parsed.describe(&e);
                warn!(%message, "rejected import row");
                report.errors.push(message);
            }
        }
    }

    info!(
        invitation = %invitation_id,
        success = report.success,
        rejected = report.errors.len(),
        "imported guests"
    );
    Ok(report)
}
