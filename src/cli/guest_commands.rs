use std::path::Path;

use crate::board::BoardCommand;
use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::*;
use crate::queries::guest_queries::GuestFilter;
use crate::queries::*;
use crate::transfer;

pub fn list(ctx: &CLIContext) {
    let guests = guest_ops::list_guests(&ctx.conn, ctx.invitation_id()).unwrap_or_default();
    if guests.is_empty() {
        println!("No guests yet. Use 'add-guest' or 'import <file>' to add some.");
        return;
    }

    println!("Guests ({}):", guests.len());
    print_guests(ctx, guests.iter());
}

pub fn find(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: find <name or email>");
        return;
    }
    print_filtered(ctx, &GuestFilter::search(args));
}

pub fn category(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: category <name>");
        return;
    }
    print_filtered(ctx, &GuestFilter::in_category(args));
}

fn print_filtered(ctx: &CLIContext, filter: &GuestFilter) {
    match guest_queries::find_guests(&ctx.conn, ctx.invitation_id(), filter) {
        Ok(guests) if guests.is_empty() => println!("No matching guests."),
        Ok(guests) => {
            println!("Matching guests ({}):", guests.len());
            print_guests(ctx, guests.iter());
        }
        Err(e) => ctx.print_error(&e),
    }
}

fn print_guests<'a>(ctx: &CLIContext, guests: impl Iterator<Item = &'a Guest>) {
    let Some(board) = ctx.board() else { return };
    for guest in guests {
        let seat = board
            .snapshot()
            .seat_of(guest.id)
            .map(|t| format!(" @ {}", t.table.label()))
            .unwrap_or_default();
        let plus_one = if guest.has_named_plus_one() { " +1" } else { "" };
        let category = guest
            .category
            .as_deref()
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();
        let sent = if guest.invitation_sent { " (invited)" } else { "" };
        println!("  {}{}{}{}{}", guest.full_name(), plus_one, category, sent, seat);
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    println!("Adding a new guest (press Enter to skip optional fields)");
    println!();

    let mut draft = GuestDraft::default();
    let mut names = args.split_whitespace();
    match (names.next(), names.next()) {
        (Some(first), Some(_)) => {
            draft.first_name = first.to_string();
            draft.last_name = args.trim()[first.len()..].trim().to_string();
        }
        _ => {
            draft.first_name = match ctx.prompt("First name (required): ") {
                Some(s) => s,
                None => return,
            };
            draft.last_name = match ctx.prompt("Last name (required): ") {
                Some(s) => s,
                None => return,
            };
        }
    }

    let optional = |prompt: &str| ctx.prompt(prompt).filter(|s| !s.is_empty());
    draft.email = optional("Email: ");
    draft.phone = optional("Phone: ");
    draft.category = optional("Category: ");
    draft.plus_one_allowed = ctx.confirm("Plus-one allowed? (y/N): ");
    if draft.plus_one_allowed {
        draft.plus_one_name = optional("Plus-one name: ");
    }
    draft.dietary_restrictions = optional("Dietary restrictions: ");
    draft.notes = optional("Notes: ");

    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::CreateGuest(draft));
    ctx.print_notification(&notification);
}

pub fn show(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show-guest <name>");
        return;
    }
    let Some(guest) = ctx.find_guest(args) else { return };
    let seat = assignment_ops::table_of(&ctx.conn, guest.id)
        .ok()
        .flatten()
        .and_then(|id| table_ops::require(&ctx.conn, id).ok())
        .map(|t| t.label())
        .unwrap_or_else(|| "(unassigned)".into());

    let none = "(none)";
    println!();
    println!("Name: {}", guest.full_name());
    println!("Email: {}", guest.email.as_deref().unwrap_or(none));
    println!("Phone: {}", guest.phone.as_deref().unwrap_or(none));
    println!("Category: {}", guest.category.as_deref().unwrap_or(none));
    if guest.plus_one_allowed {
        println!("Plus-one: {}", guest.plus_one_name.as_deref().unwrap_or("(unnamed)"));
    } else {
        println!("Plus-one: not allowed");
    }
    println!("Dietary: {}", guest.dietary_restrictions.as_deref().unwrap_or(none));
    println!("Notes: {}", guest.notes.as_deref().unwrap_or(none));
    println!("Invitation sent: {}", if guest.invitation_sent { "yes" } else { "no" });
    println!("Seat: {}", seat);
    println!();
}

pub fn edit(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: edit-guest <name>");
        return;
    }
    let Some(guest) = ctx.find_guest(args) else { return };

    println!("Editing {} (Enter keeps the value, 'clear' removes it)", guest.full_name());
    println!();

    let keep = |prompt: String| ctx.prompt(&prompt).filter(|s| !s.is_empty());
    let optional = |label: &str, current: &Option<String>| -> Option<Option<String>> {
        let shown = current.as_deref().unwrap_or("");
        keep(format!("{} [{}]: ", label, shown)).map(|s| {
            if s.eq_ignore_ascii_case("clear") {
                None
            } else {
                Some(s)
            }
        })
    };

    let mut patch = GuestPatch {
        first_name: keep(format!("First name [{}]: ", guest.first_name)),
        last_name: keep(format!("Last name [{}]: ", guest.last_name)),
        email: optional("Email", &guest.email),
        phone: optional("Phone", &guest.phone),
        category: optional("Category", &guest.category),
        ..GuestPatch::default()
    };

    let current_plus_one = if guest.plus_one_allowed { "y" } else { "n" };
    if let Some(answer) = keep(format!("Plus-one allowed (y/n) [{}]: ", current_plus_one)) {
        patch.plus_one_allowed = Some(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"));
    }
    if patch.plus_one_allowed.unwrap_or(guest.plus_one_allowed) {
        patch.plus_one_name = optional("Plus-one name", &guest.plus_one_name);
    }
    patch.dietary_restrictions = optional("Dietary restrictions", &guest.dietary_restrictions);
    patch.notes = optional("Notes", &guest.notes);

    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::UpdateGuest {
        guest_id: guest.id,
        patch,
    });
    ctx.print_notification(&notification);
}

pub fn delete(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete-guest <name>");
        return;
    }
    let Some(guest) = ctx.find_guest(args) else { return };
    if !ctx.confirm(&format!("Delete {}? (y/N): ", guest.full_name())) {
        println!("Cancelled.");
        return;
    }

    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::DeleteGuest { guest_id: guest.id });
    ctx.print_notification(&notification);
}

pub fn mark_sent(ctx: &CLIContext, args: &str, sent: bool) {
    if args.is_empty() {
        println!("Usage: mark-sent <name> | mark-unsent <name>");
        return;
    }
    let Some(guest) = ctx.find_guest(args) else { return };
    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::SetInvitationSent {
        guest_id: guest.id,
        sent,
    });
    ctx.print_notification(&notification);
}

pub fn mark_all_sent(ctx: &CLIContext) {
    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::MarkAllInvited);
    ctx.print_notification(&notification);
}

pub fn import(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: import <file.csv>");
        return;
    }
    let csv_text = match std::fs::read_to_string(Path::new(args)) {
        Ok(text) => text,
        Err(e) => {
            ctx.print_error(&e.into());
            return;
        }
    };

    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::ImportCsv { csv_text });
    ctx.print_notification(&notification);
}

pub fn export(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: export <file.csv>");
        return;
    }
    let guests = match guest_ops::list_guests(&ctx.conn, ctx.invitation_id()) {
        Ok(g) => g,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    match std::fs::write(Path::new(args), transfer::export_guests(&guests)) {
        Ok(()) => println!("Exported {} guest(s) to {}", guests.len(), args),
        Err(e) => ctx.print_error(&e.into()),
    }
}

pub fn print_stats(ctx: &CLIContext) {
    let guests = match stats_queries::guest_stats(&ctx.conn, ctx.invitation_id()) {
        Ok(s) => s,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    let seating = match stats_queries::seating_stats(&ctx.conn, ctx.invitation_id()) {
        Ok(s) => s,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    println!();
    println!("Guests: {}", guests.total);
    println!("  With plus-one: {}", guests.with_plus_one);
    println!("  Invitations sent: {}", guests.invited);
    println!("  Categories: {}", guests.category_count());
    for (name, count) in &guests.categories {
        println!("    {}: {}", name, count);
    }
    println!();
    println!("Tables: {}", seating.tables);
    println!("  Seats occupied: {} / {}", seating.occupied_seats, seating.total_seats);
    println!("  Guests seated: {}", seating.assigned_guests);
    println!("  Guests unassigned: {}", seating.unassigned_guests);
    if !seating.over_capacity.is_empty() {
        let numbers: Vec<String> = seating.over_capacity.iter().map(|n| n.to_string()).collect();
        println!("  Over capacity: table(s) {}", numbers.join(", "));
    }
    println!();
}
