use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracker_core::export::export_log_to_path;
use tracker_core::*;

#[derive(Parser)]
#[command(name = "extrack")]
#[command(about = "Exercise tracking HTTP API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Directory of static files served outside /api
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// List registered users
    Users,

    /// Export a user's exercise log as CSV
    Export {
        /// User id
        #[arg(long)]
        user: String,

        /// Output CSV file
        #[arg(long)]
        out: PathBuf,

        /// Earliest day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Maximum number of entries
        #[arg(long)]
        limit: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracker_core::logging::init();

    let (data_dir, command) = Cli::parse_or_serve();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let tracker = Tracker::open(data_dir);

    match command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => cmd_serve(tracker, config, host, port, static_dir),
        Commands::Users => cmd_users(&tracker),
        Commands::Export {
            user,
            out,
            from,
            to,
            limit,
        } => {
            let query = LogQuery::parse(from.as_deref(), to.as_deref(), limit.as_deref())?;
            cmd_export(&tracker, &user, &query, &out)
        }
    }
}

impl Cli {
    /// Parse arguments, treating a missing subcommand as `serve`
    ///
    /// Re-parsing with `serve` appended runs clap's own `PORT` handling, so
    /// the default path accepts and rejects exactly what `serve` does.
    fn parse_or_serve() -> (Option<PathBuf>, Commands) {
        let mut cli = Cli::parse();
        if cli.command.is_none() {
            cli = Cli::parse_from(std::env::args_os().chain(std::iter::once("serve".into())));
        }

        match cli.command {
            Some(command) => (cli.data_dir, command),
            None => Cli::command()
                .error(ClapErrorKind::MissingSubcommand, "no command given")
                .exit(),
        }
    }
}

fn cmd_serve(
    tracker: Tracker,
    config: Config,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let mut server = config.server;
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    if static_dir.is_some() {
        server.static_dir = static_dir;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(tracker_server::serve(tracker, server))
}

fn cmd_users(tracker: &Tracker) -> Result<()> {
    let users = tracker.list_users()?;
    if users.is_empty() {
        println!("No users yet.");
        return Ok(());
    }

    for user in &users {
        println!("{}  {}", user.id, user.username);
    }
    println!("{} user(s)", users.len());
    Ok(())
}

fn cmd_export(tracker: &Tracker, user_id: &str, query: &LogQuery, out: &Path) -> Result<()> {
    let log = tracker.query_log(user_id, query)?;
    let count = export_log_to_path(&log, out)?;

    println!("✓ Exported {} entries for {}", count, log.username);
    println!("  CSV: {}", out.display());
    Ok(())
}
