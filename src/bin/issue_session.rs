use std::{error::Error, path::Path, process::exit, time::SystemTime};

use clap::Parser;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use time::Duration;

use spendlog::{OwnerId, create_session, initialize_db};

/// A utility for issuing a session token for an owner.
///
/// The identity provider normally provisions sessions; this tool covers
/// local development and manual testing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The owner the session acts on behalf of.
    #[arg(long)]
    owner_id: i64,

    /// The session token to register. A random token is generated when
    /// omitted.
    #[arg(long)]
    token: Option<String>,

    /// How many hours the session stays valid.
    #[arg(long, default_value_t = 24)]
    ttl_hours: i64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let db_path = Path::new(&args.db_path);
    validate_db_path(db_path);

    let conn = Connection::open(db_path)
        .unwrap_or_else(|_| panic!("Could not open the database at {db_path:?}"));
    initialize_db(&conn)?;

    let token = args.token.unwrap_or_else(generate_token);

    create_session(
        &token,
        OwnerId::new(args.owner_id),
        Duration::hours(args.ttl_hours),
        &conn,
    )?;

    println!(
        "Issued a session for owner {} valid for {} hour(s).",
        args.owner_id, args.ttl_hours
    );
    println!("Token: {token}");

    Ok(())
}

fn validate_db_path(db_path: &Path) {
    match db_path.extension() {
        None => {
            print_error("Database path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            print_error("Database path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }
}

/// Derive a token from the current time. Good enough for local testing,
/// not a substitute for the identity provider's token generation.
fn generate_token() -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();

    Sha256::digest(format!("{now}-{}", std::process::id()))
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string())
}
