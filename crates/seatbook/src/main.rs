//! `seatbook` - CLI for the seat ledger
//!
//! This binary runs the interactive booking menu, or a single command against
//! the configured booking store.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use seatbook::cli::{BookCommand, Cli, Command, ConfigCommand, StatusCommand};
use seatbook::{
    init_logging, BookingReference, BookingStore, Config, MemoryStore, Menu, Passenger,
    SeatLedger, SqliteStore, StorageBackend,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config =
        Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    if cli.in_memory {
        config.storage.backend = StorageBackend::Memory;
    }

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let mut ledger = open_ledger(&config)?;
            let stdin = std::io::stdin();
            Menu::new(&mut ledger, stdin.lock(), std::io::stdout()).run()?;
        }
        Command::Check(arg) => {
            let ledger = open_ledger(&config)?;
            println!("{}", ledger.check_seat(&arg.seat)?);
        }
        Command::Book(book_cmd) => handle_book(&mut open_ledger(&config)?, book_cmd)?,
        Command::Cancel(arg) => {
            let mut ledger = open_ledger(&config)?;
            let booking = ledger.cancel_seat(&arg.seat)?;
            println!("Booking {} cancelled successfully.", booking.reference);
        }
        Command::Status(status_cmd) => handle_status(&open_ledger(&config)?, &status_cmd)?,
        Command::Remaining => {
            let ledger = open_ledger(&config)?;
            println!(
                "There are {} seat(s) available for booking.",
                ledger.count_free()
            );
        }
        Command::Lookup { reference } => {
            let reference = BookingReference::parse(&reference)?;
            match open_ledger(&config)?.find_booking(&reference)? {
                Some(booking) => println!("{booking}"),
                None => bail!("no booking with reference {reference}"),
            }
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
    }
    Ok(())
}

fn open_ledger(config: &Config) -> anyhow::Result<SeatLedger> {
    let layout = config.layout()?;
    let store: Box<dyn BookingStore> = match config.storage.backend {
        StorageBackend::Memory => Box::new(MemoryStore::new()),
        StorageBackend::Sqlite => {
            let path = config.database_path();
            let store = SqliteStore::open(&path)
                .with_context(|| format!("failed to open bookings at {}", path.display()))?;
            Box::new(store)
        }
    };
    Ok(SeatLedger::open(&layout, store)?)
}

fn handle_book(ledger: &mut SeatLedger, cmd: BookCommand) -> anyhow::Result<()> {
    let passenger = Passenger::new(cmd.passport, cmd.first_name, cmd.last_name);
    let reference = ledger.book_seat(&cmd.seat, passenger)?;
    println!("Seat booked successfully. Your booking reference is {reference}.");
    Ok(())
}

fn handle_status(ledger: &SeatLedger, cmd: &StatusCommand) -> anyhow::Result<()> {
    let bookings = ledger.bookings()?;
    if cmd.json {
        let status = serde_json::json!({
            "store": ledger.store().name(),
            "layout": ledger.grid().codes(),
            "free_seats": ledger.count_free(),
            "bookings": bookings,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Current Seat Layout:");
        print!("{}", ledger.render_layout());
        println!();
        println!("Free seats:    {}", ledger.count_free());
        println!("Store:         {}", ledger.store().name());
        println!("Bookings:      {}", bookings.len());
        for booking in &bookings {
            println!("  {booking}");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Backend:            {}", config.storage.backend);
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Cabin]");
                for (index, row) in config.cabin.layout.iter().enumerate() {
                    println!("  Row {:<3}            {row}", index + 1);
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
