// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Taskwhen v{} - Natural-language dates for task commands",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} add <text...>", binary_name);
    println!(
        "    {} edit <index> <text...> [--deadline <iso>] [--start <iso> --end <iso>]",
        binary_name
    );
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    -v, --verbose         Log every extraction decision to stderr.");
    println!("    --now <iso>           Pretend the current instant is <iso> (RFC 3339).");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EDIT OPTIONS (the task's current dates):");
    println!("    --deadline <iso>      The task is due at <iso>.");
    println!("    --start <iso>         The task's range starts at <iso> (needs --end).");
    println!("    --end <iso>           The task's range ends at <iso> (needs --start).");
    println!();
    println!("INPUT SYNTAX:");
    println!("    from <date> to <date> Set a start and end (add, or edit both sides)");
    println!("    from <date>           Move the start of an existing range (edit)");
    println!("    to <date>             Move the end of an existing range (edit)");
    println!("    by <date>             Set a deadline");
    println!("    t/<tag>               Add a tag (repeatable, at the end)");
    println!();
    println!("DATES:");
    println!("    25 Apr, Apr 25 2025, 2025-04-25, 1st, the 25th");
    println!("    today, tonight, tomorrow (tmr), the day after tomorrow");
    println!("    fri, next mon, this wed, last sun");
    println!("    8pm, 8:30 pm, 20:00, noon, midnight, 25 Apr at 8pm");
    println!("    in 2 days, 2 days later, 3 hours from now, next week");
    println!("    8 days from 25 Apr, 2 hours after 8pm 25 Apr");
    println!();
    println!("    When editing, a bare time keeps the old date and a bare date keeps the");
    println!("    old time. Offsets like \"2 days later\" always count from now.");
    println!();
    println!("EXAMPLES:");
    println!("    {} add Meeting from next Mon 9am to next Mon 5pm t/work", binary_name);
    println!("    {} add Pay rent by 1st t/home", binary_name);
    println!(
        "    {} edit 1 by 25 Apr --deadline 2025-04-20T20:00:00Z",
        binary_name
    );
    println!(
        "    {} edit 2 to 6pm --start 2025-04-20T09:00:00Z --end 2025-04-20T17:00:00Z",
        binary_name
    );
    println!();
    println!("CONFIG:");
    println!("    config.toml keys: utc_offset_minutes, allow_relative_for_new, log_level");
}
