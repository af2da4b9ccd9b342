use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "ricettario_admin")]
#[command(about = "Admin utilities for Ricettario (bootstrap users, load reference data)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./ricettario.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Load(Load),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
}

#[derive(Args, Debug)]
struct Load {
    #[command(subcommand)]
    command: LoadCommand,
}

#[derive(Subcommand, Debug)]
enum LoadCommand {
    /// Load ingredients from a headerless `name,measurement_unit` CSV file.
    Ingredients(LoadArgs),
    /// Load tags from a headerless `name,color,slug` CSV file.
    Tags(LoadArgs),
}

#[derive(Args, Debug)]
struct LoadArgs {
    #[arg(long)]
    file: PathBuf,
}

fn prompt_password() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    write!(out, "Password: ")?;
    out.flush()?;

    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']).to_string();

    if password.is_empty() {
        return Err("password must not be empty".into());
    }
    Ok(password)
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn load_ingredients(engine: &Engine, file: &PathBuf) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(file)?;

    let mut loaded = 0u64;
    let mut skipped = 0u64;
    for record in reader.records() {
        let record = record?;
        let (Some(name), Some(unit)) = (record.get(0), record.get(1)) else {
            return Err(format!("malformed ingredient row: {record:?}").into());
        };

        match engine.new_ingredient(name, unit).await {
            Ok(_) => loaded += 1,
            Err(EngineError::ExistingKey(_)) => skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }

    println!("loaded {loaded} ingredients ({skipped} already present)");
    Ok(())
}

async fn load_tags(engine: &Engine, file: &PathBuf) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(file)?;

    let mut loaded = 0u64;
    let mut skipped = 0u64;
    for record in reader.records() {
        let record = record?;
        let (Some(name), Some(color), Some(slug)) =
            (record.get(0), record.get(1), record.get(2))
        else {
            return Err(format!("malformed tag row: {record:?}").into());
        };

        match engine.new_tag(name, color, slug).await {
            Ok(_) => loaded += 1,
            Err(EngineError::ExistingKey(_)) => skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }

    println!("loaded {loaded} tags ({skipped} already present)");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build();

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password()?;

            match engine
                .new_user(
                    &args.username,
                    &args.email,
                    &password,
                    &args.first_name,
                    &args.last_name,
                )
                .await
            {
                Ok(()) => println!("created user: {}", args.username),
                Err(EngineError::ExistingKey(_)) => {
                    eprintln!("user already exists: {}", args.username);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Load(Load {
            command: LoadCommand::Ingredients(args),
        }) => load_ingredients(&engine, &args.file).await?,
        Command::Load(Load {
            command: LoadCommand::Tags(args),
        }) => load_tags(&engine, &args.file).await?,
    }

    Ok(())
}
