use crate::board::BoardCommand;
use crate::cli::context::CLIContext;
use crate::cli::table_commands::status_marker;
use crate::model::*;

/// Prints every table with its occupants, then the unassigned pool.
pub fn show_board(ctx: &CLIContext) {
    let Some(board) = ctx.board() else { return };
    let snapshot = board.snapshot();

    println!();
    println!("{}", ctx.invitation.title);
    println!();

    if snapshot.tables.is_empty() {
        println!("No tables yet. Use 'add-table' to create one.");
    }
    for entry in &snapshot.tables {
        println!("{}  {}{}", entry.table.label(), entry.occupancy_label(), status_marker(entry));
        if entry.guests.is_empty() {
            println!("    (empty)");
        }
        for guest in &entry.guests {
            match guest.plus_one_name.as_deref().filter(|_| guest.has_named_plus_one()) {
                Some(plus_one) => println!("    {} + {}", guest.full_name(), plus_one),
                None => println!("    {}", guest.full_name()),
            }
        }
    }

    println!();
    if snapshot.unassigned.is_empty() {
        println!("Everyone is seated.");
    } else {
        println!("Unassigned ({}):", snapshot.unassigned.len());
        for guest in &snapshot.unassigned {
            println!("    {}", guest.full_name());
        }
    }
    println!();
}

/// `seat <guest> @ <table number>`: the terminal version of dropping a
/// guest onto a table.
pub fn seat(ctx: &CLIContext, args: &str) {
    let Some((guest_query, table_query)) = args.rsplit_once('@') else {
        println!("Usage: seat <guest name> @ <table number>");
        return;
    };

    let Some(guest) = ctx.find_guest(guest_query) else { return };
    let Some(table) = ctx.find_table(table_query) else { return };

    let Some(mut board) = ctx.board() else { return };
    let notification = board.on_drop(DragPayload { guest_id: guest.id }, table.id);
    ctx.print_notification(&notification);

    if !notification.is_error() {
        if let Some(entry) = board.snapshot().table(table.id) {
            println!("  {} now {}{}", entry.table.label(), entry.occupancy_label(), status_marker(entry));
        }
    }
}

pub fn unseat(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: unseat <guest name>");
        return;
    }
    let Some(guest) = ctx.find_guest(args) else { return };
    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::Unassign { guest_id: guest.id });
    ctx.print_notification(&notification);
}

pub fn unassigned(ctx: &CLIContext) {
    let Some(board) = ctx.board() else { return };
    let pool = &board.snapshot().unassigned;
    if pool.is_empty() {
        println!("Everyone is seated.");
        return;
    }
    println!("Unassigned ({}):", pool.len());
    for guest in pool {
        let plus_one = if guest.has_named_plus_one() { " +1" } else { "" };
        println!("  {}{}", guest.full_name(), plus_one);
    }
}
