use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use skillswap_infrastructure::ConfigService;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "skillswap")]
#[command(about = "SkillSwap CLI - chat with your skill-exchange matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Account used by commands that talk to the server.
#[derive(Args, Clone)]
pub struct Login {
    /// Account email
    #[arg(long, env = "SKILLSWAP_EMAIL")]
    email: String,
    /// Account password
    #[arg(long, env = "SKILLSWAP_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or initialize the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        login: Login,
    },
    /// List your chats
    Chats {
        #[command(flatten)]
        login: Login,
    },
    /// Open a chat and print its messages (marks it read)
    Open {
        chat_id: i64,
        #[command(flatten)]
        login: Login,
    },
    /// Send a message to a chat
    Send {
        chat_id: i64,
        text: String,
        #[command(flatten)]
        login: Login,
    },
    /// Start (or reopen) a chat with a user
    Start {
        user_id: i64,
        #[command(flatten)]
        login: Login,
    },
    /// Rate the other participant of a chat
    Rate {
        chat_id: i64,
        /// Stars, 1 to 5
        score: u8,
        #[arg(long)]
        comment: Option<String>,
        #[command(flatten)]
        login: Login,
    },
    /// Browse match suggestions, three at a time
    Matches {
        /// Page of three cards to show (0-based)
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[command(flatten)]
        login: Login,
    },
    /// Show or edit your profile
    Profile {
        #[command(flatten)]
        edit: commands::profile::ProfileEdit,
        #[command(flatten)]
        login: Login,
    },
    /// Upload a new profile image (png, jpg, jpeg; max 5 MiB)
    Avatar {
        path: std::path::PathBuf,
        #[command(flatten)]
        login: Login,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init,
}

fn init_tracing(fallback_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_service = ConfigService::new();
    let config = config_service.get_config();
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config_service, &config)?,
            ConfigAction::Init => commands::config::init(&config_service)?,
        },
        Commands::Signup { name, login } => {
            let app = commands::App::connect(&config)?;
            app.signup(&name, &login).await?;
        }
        Commands::Chats { login } => {
            let app = commands::App::login(&config, &login).await?;
            commands::chats::list(&app).await?;
        }
        Commands::Open { chat_id, login } => {
            let app = commands::App::login(&config, &login).await?;
            commands::chats::open(&app, chat_id).await?;
        }
        Commands::Send {
            chat_id,
            text,
            login,
        } => {
            let app = commands::App::login(&config, &login).await?;
            commands::chats::send(&app, chat_id, &text).await?;
        }
        Commands::Start { user_id, login } => {
            let app = commands::App::login(&config, &login).await?;
            commands::chats::start(&app, user_id).await?;
        }
        Commands::Rate {
            chat_id,
            score,
            comment,
            login,
        } => {
            let app = commands::App::login(&config, &login).await?;
            commands::chats::rate(&app, chat_id, score, comment).await?;
        }
        Commands::Matches { page, login } => {
            let app = commands::App::login(&config, &login).await?;
            commands::matches::browse(&app, page).await?;
        }
        Commands::Profile { edit, login } => {
            let app = commands::App::login(&config, &login).await?;
            commands::profile::show_or_edit(&app, edit).await?;
        }
        Commands::Avatar { path, login } => {
            let app = commands::App::login(&config, &login).await?;
            commands::profile::avatar(&app, &path).await?;
        }
    }

    Ok(())
}
