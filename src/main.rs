use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fieldcrypt::cli::{handle_convert_command, handle_init, handle_show_config, ConvertCommands};
use fieldcrypt::config::{paths::FieldCryptPaths, settings::Settings};
use fieldcrypt::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "fieldcrypt",
    version,
    about = "Field-level encryption for persisted record attributes",
    long_about = "fieldcrypt converts attribute values to and from their stored column text. \
                  When a shared key is configured, values are encrypted with AES/ECB/PKCS5Padding \
                  and stored as base64; without a key they are stored in canonical form."
)]
struct Cli {
    /// Shared encryption key (overrides FIELDCRYPT_ENCRYPTION_KEY and the settings file)
    #[arg(long, global = true, conflicts_with = "prompt_key")]
    key: Option<String>,

    /// Read the shared encryption key from the terminal without echo
    #[arg(long, global = true)]
    prompt_key: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Convert(ConvertCommands),

    /// Create the settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FieldCryptPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_level)?;

    let explicit_key = if cli.prompt_key {
        Some(rpassword::prompt_password("Encryption key: ").context("failed to read key")?)
    } else {
        cli.key
    };
    let keys = settings.key_provider(explicit_key);

    match cli.command {
        Some(Commands::Convert(cmd)) => {
            let output = handle_convert_command(&keys, cmd)?;
            println!("{}", output);
        }
        Some(Commands::Init) => handle_init(&paths, &settings)?,
        Some(Commands::Config) => handle_show_config(&paths, &settings, &keys),
        None => {
            println!("fieldcrypt - field-level encryption for record attributes");
            println!();
            println!("Run 'fieldcrypt --help' for usage information.");
        }
    }

    Ok(())
}
