pub mod context;
pub mod guest_commands;
pub mod table_commands;
pub mod seating_commands;

use rusqlite::Connection;
use tracing::{error, info};

use crate::config::SeatingConfig;
use crate::db::{invitation_repo, schema};
use crate::model::*;
use crate::ops::invitation_ops;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(config: &SeatingConfig) {
    println!("Seatplan - guests and seating");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(&config.database_path) {
        Ok(c) => c,
        Err(e) => {
            error!(path = %config.database_path.display(), error = %e, "cannot open database");
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }
    info!(path = %config.database_path.display(), enforce_capacity = config.enforce_capacity, "database ready");

    let mut ctx = match load_or_init(conn, config) {
        Some(ctx) => ctx,
        None => return,
    };

    repl_loop(&mut ctx);
}

fn load_or_init(conn: Connection, config: &SeatingConfig) -> Option<CLIContext> {
    match invitation_repo::find_all(&conn) {
        Ok(invitations) if !invitations.is_empty() => {
            let invitation = invitations.into_iter().last()?;
            println!("Loaded invitation: {}", invitation.title);
            Some(CLIContext::new(conn, invitation, config.policy()))
        }
        Ok(_) => {
            println!("No invitation found.");
            init_new_invitation(conn, config)
        }
        Err(e) => {
            println!("Error loading data: {}", e);
            None
        }
    }
}

fn init_new_invitation(conn: Connection, config: &SeatingConfig) -> Option<CLIContext> {
    println!();
    print!("Event title (e.g. \"Ana & Mihai's wedding\"): ");
    use std::io::Write;
    std::io::stdout().flush().ok();

    let mut title = String::new();
    std::io::stdin().read_line(&mut title).ok()?;
    let title = title.trim().to_string();

    let lower = title.to_lowercase();
    if lower == "exit" || lower == "quit" || lower == "q" {
        return None;
    }

    match invitation_ops::create_invitation(&conn, &title) {
        Ok(invitation) => {
            println!("Created {}.", invitation.title);
            println!();
            Some(CLIContext::new(conn, invitation, config.policy()))
        }
        Err(e) => {
            println!("Error: {}. Please restart and try again.", e);
            None
        }
    }
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Guest commands
            "guests" | "list" | "ls" => guest_commands::list(ctx),
            "add-guest" => guest_commands::add(ctx, args),
            "show-guest" | "show" => guest_commands::show(ctx, args),
            "edit-guest" => guest_commands::edit(ctx, args),
            "delete-guest" => guest_commands::delete(ctx, args),
            "find" => guest_commands::find(ctx, args),
            "category" => guest_commands::category(ctx, args),
            "mark-sent" => guest_commands::mark_sent(ctx, args, true),
            "mark-unsent" => guest_commands::mark_sent(ctx, args, false),
            "mark-all-sent" => guest_commands::mark_all_sent(ctx),
            "import" => guest_commands::import(ctx, args),
            "export" => guest_commands::export(ctx, args),

            // Table commands
            "tables" => table_commands::list(ctx),
            "add-table" => table_commands::add(ctx, args),
            "edit-table" => table_commands::edit(ctx, args),
            "delete-table" => table_commands::delete(ctx, args),

            // Seating
            "board" => seating_commands::show_board(ctx),
            "seat" | "move" => seating_commands::seat(ctx, args),
            "unseat" => seating_commands::unseat(ctx, args),
            "unassigned" => seating_commands::unassigned(ctx),

            // Invitations
            "invitations" => list_invitations(ctx),
            "switch" => switch_invitation(ctx, args),
            "new-invitation" => new_invitation(ctx, args),
            "rename" => rename_invitation(ctx, args),

            // Other
            "stats" => guest_commands::print_stats(ctx),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

fn list_invitations(ctx: &CLIContext) {
    match invitation_repo::find_all(&ctx.conn) {
        Ok(invitations) => {
            for invitation in &invitations {
                let marker = if invitation.id == ctx.invitation_id() { "*" } else { " " };
                println!(" {} {}", marker, invitation.title);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

fn switch_invitation(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: switch <title>");
        return;
    }
    let lower = args.to_lowercase();
    let invitations = invitation_repo::find_all(&ctx.conn).unwrap_or_default();
    let matches: Vec<Invitation> = invitations
        .into_iter()
        .filter(|i| i.title.to_lowercase().contains(&lower))
        .collect();

    match matches.len() {
        0 => println!("No invitation matching '{}'", args),
        1 => {
            let invitation = matches.into_iter().next();
            if let Some(invitation) = invitation {
                println!("Switched to {}", invitation.title);
                ctx.invitation = invitation;
            }
        }
        _ => {
            println!("Multiple matches found:");
            for i in &matches {
                println!("  {}", i.title);
            }
        }
    }
}

fn new_invitation(ctx: &mut CLIContext, args: &str) {
    let title = if args.is_empty() {
        ctx.prompt("Event title: ").unwrap_or_default()
    } else {
        args.to_string()
    };
    match invitation_ops::create_invitation(&ctx.conn, &title) {
        Ok(invitation) => {
            println!("Created and switched to {}", invitation.title);
            ctx.invitation = invitation;
        }
        Err(e) => ctx.print_error(&e),
    }
}

fn rename_invitation(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: rename <new title>");
        return;
    }
    match invitation_ops::rename_invitation(&ctx.conn, ctx.invitation_id(), args) {
        Ok(invitation) => {
            println!("Renamed to {}", invitation.title);
            ctx.invitation = invitation;
        }
        Err(e) => ctx.print_error(&e),
    }
}

/// Split input into command and args.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Guests:
    guests                  List all guests
    add-guest [first last]  Add a guest (interactive)
    show-guest <name>       Show guest details
    edit-guest <name>       Edit a guest
    delete-guest <name>     Delete a guest (frees their seat)
    find <query>            Search by name or email
    category <name>         List guests in a category
    mark-sent <name>        Mark invitation as sent
    mark-unsent <name>      Mark invitation as not sent
    mark-all-sent           Mark every invitation as sent
    import <file.csv>       Import guests from CSV
    export <file.csv>       Export guests to CSV

  Tables:
    tables                  List tables with occupancy
    add-table [name]        Add a table (number is suggested)
    edit-table <number>     Edit a table
    delete-table <number>   Delete a table (its guests become unassigned)

  Seating:
    board                   Show the seating plan
    seat <guest> @ <number> Seat a guest (moves them if already seated)
    unseat <guest>          Remove a guest from their table
    unassigned              List guests without a seat

  Invitations:
    invitations             List invitations
    switch <title>          Switch to another invitation
    new-invitation [title]  Create an invitation and switch to it
    rename <title>          Rename the current invitation

  Other:
    stats                   Show statistics
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Guest names are case-insensitive and partial matches work
  - CSV columns: First Name, Last Name, Email, Phone, Category,
    Plus One Allowed, Plus One Name, Dietary Restrictions, Notes, Invitation Sent"#);
}
