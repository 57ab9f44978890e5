use clap::{Parser, Subcommand, ValueEnum};
use directory_core::constants::{ENV_BLUR_GRACE_MS, ENV_FETCH_TIMEOUT_SECS, ENV_SOURCE};
use directory_core::query::location_search;
use directory_core::source::encode_listing;
use directory_core::{
    parse_query, DataSource, DirectoryApp, DirectoryConfig, DoctorSource, SessionHistory, UiEvent,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "doctors")]
#[command(about = "Doctor directory CLI")]
struct Cli {
    /// Doctor list URL or JSON file (overrides DIRECTORY_SOURCE)
    #[arg(long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List doctors matching a query string
    List {
        /// Query string, e.g. "?specialties=Dentist&sort=fees"
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Show autocomplete suggestions for a partial name
    Suggest {
        /// Text typed into the search box
        text: String,
    },
    /// Render the directory page as HTML
    Render {
        #[arg(long, default_value = "")]
        query: String,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Normalise a query string without fetching anything
    Query {
        query: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("directory=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'doctors --help' for commands");
        return Ok(());
    };

    let mut config = DirectoryConfig::from_env_values(
        std::env::var(ENV_SOURCE).ok(),
        std::env::var(ENV_FETCH_TIMEOUT_SECS).ok(),
        std::env::var(ENV_BLUR_GRACE_MS).ok(),
    )?;
    if let Some(source) = cli.source.as_deref() {
        config = config.with_source(DoctorSource::parse(source)?);
    }

    match command {
        Commands::List { query, format } => {
            let app = load(&config, &query).await?;
            match format {
                Format::Table => println!("{}", app.render_table()),
                Format::Json => {
                    println!("{}", encode_listing(app.filters(), &app.displayed())?)
                }
            }
        }
        Commands::Suggest { text } => {
            let mut app = load(&config, "").await?;
            app.handle(UiEvent::Input(text));
            let suggestions = app.suggestions();
            if suggestions.is_empty() {
                println!("No suggestions.");
            }
            for doctor in suggestions {
                println!("{}", doctor.name);
            }
        }
        Commands::Render { query, out } => {
            let app = load(&config, &query).await?;
            let html = app.render_html();
            match out {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{html}"),
            }
        }
        Commands::Query { query } => {
            let filters = parse_query(&query);
            println!("{}", location_search(&filters));
        }
    }

    Ok(())
}

/// Mount the page at `query` and wait for the doctor list.
async fn load(
    config: &DirectoryConfig,
    query: &str,
) -> anyhow::Result<DirectoryApp<SessionHistory>> {
    let source = DataSource::new(config)?;
    let mut app = DirectoryApp::mount(SessionHistory::new(query), config);
    app.finish_loading(source.load_doctors().await);
    Ok(app)
}
