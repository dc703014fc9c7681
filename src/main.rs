//! Console table: collects bets, rolls the dice, renders settlements. All
//! rule logic lives in the library; this binary is glue around the engine.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crapshoot::{BetType, CrapsTable, Error, Phase, Result, RoundOutcome};

/// Chip values accepted at this table.
const DENOMINATIONS: [u64; 5] = [5, 10, 25, 50, 100];

#[derive(Parser)]
#[command(name = "crapshoot")]
#[command(about = "Single-player craps at the console")]
struct Cli {
    /// Starting chip stack
    #[arg(long, default_value_t = 100)]
    chips: u64,

    /// Seed the dice for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose engine logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut table = match cli.seed {
        Some(seed) => CrapsTable::seeded(cli.chips, seed),
        None => CrapsTable::new(cli.chips),
    };

    println!("Welcome to Crapshoot!");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if table.balance() == 0 {
            println!("\nYou're out of chips! Game over.");
            break;
        }

        println!("\nYou have {} chips.", table.balance());
        collect_bets(&mut table, &mut lines)?;

        if table.round().active_bets().is_empty() {
            println!("No bets placed. Skipping round.");
        } else {
            while !table.is_resolved() {
                let outcome = table.roll()?;
                report(&outcome);
            }
            println!("Round complete.");
            table.new_round()?;
        }

        if table.balance() == 0 {
            println!("\nYou're out of chips! Game over.");
            break;
        }
        match prompt(&mut lines, "\nPlay another round? (y/n) ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    println!("Thanks for playing!");
    Ok(())
}

/// Run the bet menu until the player is done betting.
fn collect_bets(
    table: &mut CrapsTable,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    println!("\n--- Place your bets for the next roll ---");
    for (idx, bet_type) in BetType::ALL.iter().enumerate() {
        println!(" {}) {}", idx + 1, bet_type);
    }
    println!(" 0) Done betting");

    loop {
        let Some(choice) = prompt(lines, "Select bet (number), or 0 to finish: ")? else {
            return Ok(());
        };
        if choice == "0" {
            return Ok(());
        }
        let bet_type = match choice
            .parse::<u8>()
            .ok()
            .filter(|n| *n >= 1)
            .and_then(|n| BetType::try_from(n - 1).ok())
        {
            Some(bet_type) => bet_type,
            None => {
                println!("   -> Invalid selection.");
                continue;
            }
        };
        place_bet(table, bet_type, lines)?;
    }
}

/// Ask for an amount and put the wager on the table.
fn place_bet(
    table: &mut CrapsTable,
    bet_type: BetType,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    println!("  You have {} chips.", table.balance());
    println!("  Allowed chip values: {:?}", DENOMINATIONS);

    loop {
        let Some(answer) = prompt(lines, "  Enter bet amount: ")? else {
            return Ok(());
        };
        let amount = match answer.parse::<u64>() {
            Ok(amount) => amount,
            Err(_) => {
                println!("   -> Please enter a whole number.");
                continue;
            }
        };
        if !DENOMINATIONS.contains(&amount) {
            println!("   -> Bet must be one of {:?}.", DENOMINATIONS);
            continue;
        }
        match table.place_bet(bet_type, amount) {
            Ok(_) => {
                println!("   -> {} on {}.", amount, bet_type);
                return Ok(());
            }
            Err(Error::InsufficientFunds { available, .. }) => {
                println!("   -> You only have {} chips.", available);
            }
            Err(err) => {
                println!("   -> {}", err);
                return Ok(());
            }
        }
    }
}

/// Render one roll's outcome.
fn report(outcome: &RoundOutcome) {
    if let Some(roll) = outcome.roll {
        println!("\nRolled {}", roll);
    }
    for settlement in &outcome.settlements {
        if settlement.is_win() {
            println!("  {} wins {} chips.", settlement.bet_type, settlement.net);
        } else if settlement.is_loss() {
            println!("  {} loses {} chips.", settlement.bet_type, -settlement.net);
        } else if settlement.carries {
            println!("  {} rides.", settlement.bet_type);
        } else {
            println!("  {} pushes.", settlement.bet_type);
        }
    }
    if let Phase::Point(point) = outcome.phase {
        println!("  Point is {}.", point);
    }
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}
