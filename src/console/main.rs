use clap::{Parser, Subcommand};
use skinstore::console::commands::{ai, mobile, users, CallableTrait};
use skinstore::telemetry::{get_console_subscriber, init_subscriber};
use std::path::PathBuf;

/// Skinstore operator console
#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect accounts and reset passwords
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Mobile build helpers
    Mobile {
        #[command(subcommand)]
        command: MobileCommands,
    },
    /// Generative AI checks
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },
}

#[derive(Debug, Subcommand)]
enum UsersCommands {
    /// Print every user
    List,
    /// Set one password on every account (RESET_PASSWORD or prompt)
    ResetPasswords {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Set per-user passwords from a YAML map of username: password
    ResetFromFile {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Case-insensitive regex search over username, name and email
    Search {
        #[arg(long)]
        pattern: String,
    },
}

#[derive(Debug, Subcommand)]
enum MobileCommands {
    /// Add the livestream permissions to the Android manifest and Info.plist
    Permissions {
        /// AndroidManifest.xml rendered as JSON
        #[arg(long, value_name = "FILE")]
        manifest: PathBuf,
        /// Info.plist rendered as JSON
        #[arg(long, value_name = "FILE")]
        info_plist: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum AiCommands {
    /// Send one prompt to the generative API (GEMINI_API_KEY)
    Ping {
        #[arg(long)]
        prompt: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_console_subscriber("console".into(), "warn".into());
    init_subscriber(subscriber);

    let cli = Cli::parse();

    get_command(cli).call()
}

fn get_command(cli: Cli) -> Box<dyn CallableTrait> {
    match cli.command {
        Commands::Users { command } => match command {
            UsersCommands::List => Box::new(users::ListCommand::new()),
            UsersCommands::ResetPasswords { yes } => {
                Box::new(users::ResetPasswordsCommand::new(yes))
            }
            UsersCommands::ResetFromFile { file } => {
                Box::new(users::ResetFromFileCommand::new(file))
            }
            UsersCommands::Search { pattern } => Box::new(users::SearchCommand::new(pattern)),
        },
        Commands::Mobile { command } => match command {
            MobileCommands::Permissions {
                manifest,
                info_plist,
            } => Box::new(mobile::PermissionsCommand::new(manifest, info_plist)),
        },
        Commands::Ai { command } => match command {
            AiCommands::Ping { prompt } => Box::new(ai::PingCommand::new(prompt)),
        },
    }
}
