use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use directory_core::constants::{ENV_BLUR_GRACE_MS, ENV_FETCH_TIMEOUT_SECS, ENV_SOURCE};
use directory_core::{DataSource, DirectoryApp, DirectoryConfig, History, SessionHistory, UiEvent};

mod commands;

use commands::{Command, HELP};

type App = DirectoryApp<SessionHistory>;

/// Main entry point for the interactive doctor directory session
///
/// Mounts the directory page at the query string given as the first argument, starts the
/// one-off doctor list fetch and reads commands from stdin while the fetch is in flight. All
/// state changes happen on this single task.
///
/// # Environment Variables
/// - `DIRECTORY_SOURCE`: doctor list URL or JSON file (default: the public mock endpoint)
/// - `DIRECTORY_FETCH_TIMEOUT_SECS`: fetch timeout (default: 30)
/// - `DIRECTORY_BLUR_GRACE_MS`: how long suggestions stay open after blur (default: 150)
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("directory=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DirectoryConfig::from_env_values(
        std::env::var(ENV_SOURCE).ok(),
        std::env::var(ENV_FETCH_TIMEOUT_SECS).ok(),
        std::env::var(ENV_BLUR_GRACE_MS).ok(),
    )?;
    let initial_query = std::env::args().nth(1).unwrap_or_default();

    let source = DataSource::new(&config)?;
    let mut app = App::mount(SessionHistory::new(initial_query), &config);

    tracing::info!("++ Starting doctor directory session against {}", source.source());
    println!("{}", directory_core::view::LOADING_MESSAGE);
    println!("Type 'help' for commands.");

    let fetch = source.load_doctors();
    tokio::pin!(fetch);
    let mut fetched = false;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = app.search_box().close_deadline();
        let wake_at = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            doctors = &mut fetch, if !fetched => {
                fetched = true;
                app.finish_loading(doctors);
                println!("{} doctors loaded.", app.doctors().len());
                println!("{}", app.render_table());
            }
            _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
                app.handle(UiEvent::Tick { now: Instant::now() });
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => run(&mut app, command)?,
                    Err(message) => println!("{message}"),
                }
            }
        }
    }

    Ok(())
}

fn run(app: &mut App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Type(text) => {
            app.handle(UiEvent::Input(text));
            print_suggestions(app);
        }
        Command::Focus => {
            app.handle(UiEvent::Focus);
            print_suggestions(app);
        }
        Command::Blur => app.handle(UiEvent::Blur { at: Instant::now() }),
        Command::Enter => {
            app.handle(UiEvent::Enter);
            print_results(app);
        }
        Command::Pick(index) => {
            if app.pick_suggestion(index, Instant::now()) {
                print_results(app);
            } else {
                println!("No such suggestion.");
            }
        }
        Command::Consult(mode) => {
            app.handle(UiEvent::SelectConsultation(mode));
            print_results(app);
        }
        Command::Toggle(specialty) => {
            app.handle(UiEvent::ToggleSpecialty(specialty));
            print_results(app);
        }
        Command::Sort(key) => {
            app.handle(UiEvent::SelectSort(key));
            print_results(app);
        }
        Command::Open(query) => {
            app.history_mut().push(query);
            app.navigated();
            print_results(app);
        }
        Command::Back => {
            if app.history_mut().back() {
                app.navigated();
                print_results(app);
            } else {
                println!("Already at the oldest entry.");
            }
        }
        Command::Forward => {
            if app.history_mut().forward() {
                app.navigated();
                print_results(app);
            } else {
                println!("Already at the newest entry.");
            }
        }
        Command::Show => println!("{}", app.render_table()),
        Command::Url => println!("{}", display_location(app)),
        Command::Html(None) => print!("{}", app.render_html()),
        Command::Html(Some(path)) => {
            std::fs::write(&path, app.render_html())?;
            println!("Wrote {path}");
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn print_suggestions(app: &App) {
    for (n, doctor) in app.suggestions().iter().enumerate() {
        println!("  {}. {}", n + 1, doctor.name);
    }
}

fn print_results(app: &App) {
    println!("{}", display_location(app));
    if app.is_loading() {
        println!("{}", directory_core::view::LOADING_MESSAGE);
    } else {
        println!("{} of {} doctors shown.", app.displayed().len(), app.doctors().len());
    }
}

fn display_location(app: &App) -> String {
    let search = app.history().location_search();
    if search.is_empty() {
        "(no filters)".to_string()
    } else {
        search
    }
}
