use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodplay::{
    cli,
    config::{self, Config},
    error, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web UI
    Serve(ServeOptions),

    /// Print the Spotify authorization URL
    AuthUrl(AuthUrlOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS (e.g. 127.0.0.1:8501)
    #[clap(long)]
    addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AuthUrlOptions {
    /// Only print the URL, do not open a browser
    #[clap(long)]
    no_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            if let Err(e) = cli::serve(load_config(), opt.addr).await {
                error!("Server stopped: {}", e);
            }
        }
        Command::AuthUrl(opt) => cli::auth_url(&load_config(), !opt.no_browser),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
