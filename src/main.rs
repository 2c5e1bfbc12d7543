use anyhow::Result;
use lottery_draw::{parse_draw_request, FileStore, Ledger};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run_ui_mode(),
        Some("draw") => run_draw(&args[2..]),
        Some("list") => run_list(args.get(2).map(String::as_str).unwrap_or("")),
        Some("reset") => run_reset(args.iter().any(|a| a == "--yes")),
        Some("help") | Some("--help") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("❌ Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("🎰 Lottery Draw v{}", lottery_draw::VERSION);
    println!();
    println!("Usage:");
    println!("  lottery-draw                       interactive form (TUI)");
    println!("  lottery-draw draw <name> <count> [digits]");
    println!("  lottery-draw list [term]");
    println!("  lottery-draw reset --yes");
    println!();
    println!("Data directory: LOTTERY_DATA_DIR (default ./lottery-data)");
}

fn data_dir() -> String {
    env::var("LOTTERY_DATA_DIR").unwrap_or_else(|_| "lottery-data".to_string())
}

fn open_store() -> Result<FileStore> {
    FileStore::open(data_dir())
}

fn run_draw(args: &[String]) -> Result<()> {
    let name = args.first().map(String::as_str).unwrap_or("");
    let count = args.get(1).map(String::as_str).unwrap_or("");
    let digits = args.get(2).map(String::as_str).unwrap_or("");

    let request = match parse_draw_request(name, count, digits) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("❌ {}", err);
            std::process::exit(1);
        }
    };

    let mut store = open_store()?;
    let mut ledger = Ledger::load(&store);

    let outcome = ledger.add_or_append(&mut store, &request.name, request.count, request.digits)?;

    if outcome.exhausted {
        eprintln!(
            "⚠️  Exceeding all possible numbers for {} digits, can't add {} tickets for {}",
            request.digits, request.count, request.name
        );
        std::process::exit(1);
    }

    let joined = outcome
        .numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    println!("🎟️  {}: {}", request.name, joined);
    println!("✓ Saved to {}", data_dir());

    Ok(())
}

fn run_list(term: &str) -> Result<()> {
    let store = open_store()?;
    let ledger = Ledger::load(&store);

    let term = term.trim();
    let entries = ledger.filter(term);

    if entries.is_empty() {
        if ledger.has_entries() {
            println!("🔍 No numbers match \"{}\"", term);
        } else {
            println!("📭 No participants yet.");
            println!("   Run: lottery-draw draw <name> <count> [digits]");
        }
        return Ok(());
    }

    if let Some(started) = ledger.date_generated {
        println!("🎰 Lottery started {}", started.format("%Y-%m-%d %H:%M"));
    }
    for entry in entries {
        let joined = entry
            .matching
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        println!("• {} ({} tickets): {}", entry.name, entry.total, joined);
    }

    Ok(())
}

fn run_reset(confirmed: bool) -> Result<()> {
    if !confirmed {
        eprintln!("⚠️  This erases all existing lottery data.");
        eprintln!("   Re-run with: lottery-draw reset --yes");
        std::process::exit(1);
    }

    let mut store = open_store()?;
    let mut ledger = Ledger::load(&store);
    ledger.reset(&mut store)?;

    println!("🆕 New lottery started");

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    use lottery_draw::ui;

    let store = open_store()?;
    let mut app = ui::App::new(Box::new(store));

    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the CLI: lottery-draw draw <name> <count> [digits]");
    std::process::exit(1);
}
