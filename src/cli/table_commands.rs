use crate::board::BoardCommand;
use crate::cli::context::CLIContext;
use crate::model::*;

pub fn list(ctx: &CLIContext) {
    let Some(board) = ctx.board() else { return };
    let tables = &board.snapshot().tables;
    if tables.is_empty() {
        println!("No tables yet. Use 'add-table' to create one.");
        return;
    }

    println!("Tables ({}):", tables.len());
    for entry in tables {
        println!("  {:<28} {:>7}{}", entry.table.label(), entry.occupancy_label(), status_marker(entry));
    }
}

pub(crate) fn status_marker(entry: &TableWithGuests) -> &'static str {
    match entry.capacity_status() {
        CapacityStatus::Open => "",
        CapacityStatus::Full => "  full",
        CapacityStatus::Over => "  OVER CAPACITY",
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    let Some(mut board) = ctx.board() else { return };
    let suggested = board.snapshot().suggested_table_number();

    let table_number = match ctx.prompt(&format!("Table number [{}]: ", suggested)) {
        Some(s) if s.is_empty() => None,
        Some(s) => match s.parse::<i32>() {
            Ok(n) => Some(n),
            Err(_) => {
                println!("'{}' is not a number.", s);
                return;
            }
        },
        None => return,
    };

    let name = if !args.is_empty() {
        Some(args.to_string())
    } else {
        ctx.prompt("Name (optional): ").filter(|s| !s.is_empty())
    };

    let capacity = match ctx.prompt("Capacity: ").map(|s| s.parse::<i32>()) {
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            println!("Capacity must be a number.");
            return;
        }
        None => return,
    };

    let notification = board.dispatch(BoardCommand::CreateTable(TableDraft {
        table_number,
        name,
        capacity,
    }));
    ctx.print_notification(&notification);
}

pub fn edit(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: edit-table <number>");
        return;
    }
    let Some(table) = ctx.find_table(args) else { return };

    println!("Editing {} (Enter keeps the value, 'clear' removes the name)", table.label());

    let mut patch = TablePatch::default();
    if let Some(s) = ctx.prompt(&format!("Number [{}]: ", table.table_number)).filter(|s| !s.is_empty()) {
        match s.parse::<i32>() {
            Ok(n) => patch.table_number = Some(n),
            Err(_) => {
                println!("'{}' is not a number.", s);
                return;
            }
        }
    }

    let current_name = table.name.as_deref().unwrap_or("");
    if let Some(s) = ctx.prompt(&format!("Name [{}]: ", current_name)).filter(|s| !s.is_empty()) {
        patch.name = Some(if s.eq_ignore_ascii_case("clear") { None } else { Some(s) });
    }

    if let Some(s) = ctx.prompt(&format!("Capacity [{}]: ", table.capacity)).filter(|s| !s.is_empty()) {
        match s.parse::<i32>() {
            Ok(n) => patch.capacity = Some(n),
            Err(_) => {
                println!("Capacity must be a number.");
                return;
            }
        }
    }

    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::UpdateTable {
        table_id: table.id,
        patch,
    });
    ctx.print_notification(&notification);
}

pub fn delete(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete-table <number>");
        return;
    }
    let Some(table) = ctx.find_table(args) else { return };
    if !ctx.confirm(&format!("Delete {}? Its guests become unassigned. (y/N): ", table.label())) {
        println!("Cancelled.");
        return;
    }

    let Some(mut board) = ctx.board() else { return };
    let notification = board.dispatch(BoardCommand::DeleteTable { table_id: table.id });
    ctx.print_notification(&notification);
}
