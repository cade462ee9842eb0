use std::sync::Arc;

use clap::{
    ArgAction, Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlyzer::{
    analysis::{AnalysisOptions, DEFAULT_TOP_ARTIST_LIMIT},
    cli,
    config::{self, Config},
    error, logging,
    playlists::ListOptions,
    spotify::{PlaylistSource, SpotifyClient},
    utils::{self, AnalysisMode, DEFAULT_MAX_PLAYLISTS},
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
    /// List a user's public playlists
    Playlists(ListArgs),

    /// Find top artists and duplicate tracks in a user's playlists
    Analyse(AnalyseOptions),

    /// Interactive prompt loop
    Console(AnalysisArgs),

    /// Run the web front end
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Spotify user whose public playlists are read
    #[clap(long, short, default_value = "spotify")]
    pub user: String,

    /// Upper bound on the number of playlists
    #[clap(long, default_value_t = DEFAULT_MAX_PLAYLISTS, value_parser = utils::parse_max_playlists)]
    pub max_playlists: usize,

    /// Only playlists owned by the user
    #[clap(long)]
    pub owner_only: bool,

    /// Only playlists whose name contains this text; can be repeated
    #[clap(long, action = ArgAction::Append, num_args = 1)]
    pub name_contains: Vec<String>,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        let mut options = ListOptions::new(args.user, args.max_playlists);
        options.owner_only = args.owner_only;
        options.name_contains = args.name_contains;
        options
    }
}

#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Which statistics to compute
    #[clap(long, value_enum, default_value_t = AnalysisMode::All)]
    pub mode: AnalysisMode,

    /// Treat the same track on different albums as a duplicate
    #[clap(long)]
    pub ignore_album: bool,

    /// Most tied artists listed before the rest are summarized
    #[clap(long, default_value_t = DEFAULT_TOP_ARTIST_LIMIT)]
    pub top_limit: usize,
}

impl From<AnalysisArgs> for AnalysisOptions {
    fn from(args: AnalysisArgs) -> Self {
        AnalysisOptions {
            mode: args.mode,
            include_album: !args.ignore_album,
            top_artist_limit: args.top_limit,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyseOptions {
    #[clap(flatten)]
    pub list: ListArgs,

    #[clap(flatten)]
    pub analysis: AnalysisArgs,

    /// Print the report as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on, defaults to SERVER_ADDRESS
    #[clap(long)]
    pub address: Option<String>,

    /// Open the page in the default browser
    #[clap(long)]
    pub open: bool,

    #[clap(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn spotify_client() -> (Config, Arc<dyn PlaylistSource>) {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!(
            "Invalid configuration. Set it in {} or the environment. Err: {}",
            config::env_path().display(),
            e
        ),
    };
    let client: Arc<dyn PlaylistSource> = Arc::new(SpotifyClient::new(config.clone()));
    (config, client)
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Playlists(opt) => {
            let (_, source) = spotify_client();
            cli::list_playlists(source, opt.into()).await
        }
        Command::Analyse(opt) => {
            let (_, source) = spotify_client();
            cli::analyse(source, opt.list.into(), opt.analysis.into(), opt.json).await
        }
        Command::Console(opt) => {
            let (_, source) = spotify_client();
            cli::console(source, opt.into()).await
        }
        Command::Serve(opt) => {
            let (config, source) = spotify_client();
            let address = opt.address.unwrap_or(config.server_address);
            cli::serve(source, opt.analysis.into(), address, opt.open).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
