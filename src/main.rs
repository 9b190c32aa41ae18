//! Command-line front end for the giveaway client.
//!
//! A thin shell over the library: parses arguments, builds the [`App`] and
//! drives one screen state manager per command.
//!
//! # Usage
//!
//! ```text
//! giveaway [--config <path>] <command>
//!
//! list [platform]     first page of giveaways, optionally for platforms, e.g. gog.switch
//! search <text>       titles containing <text> across the whole catalog
//! more                carousel and per-platform sections
//! detail <id>         full record of one giveaway
//! toggle <id>         add or remove a favorite
//! favorites           saved favorites
//! ```
//!
//! The configuration file may also be given through `GIVEAWAY_CONFIG`.

use giveaway::app::{DetailEvent, HomeViewModel};
use giveaway::domain::giveaway::MULTI_VALUE_SEPARATOR;
use giveaway::domain::FilterPlatform;
use giveaway::observability::init_tracing;
use giveaway::{initialize, ApiError, App, Config, GiveawayFilter, GiveawayItem};
use std::path::PathBuf;
use std::process::ExitCode;

const CONFIG_ENV_VAR: &str = "GIVEAWAY_CONFIG";

const USAGE: &str = "usage: giveaway [--config <path>] \
                     <list [platform] | search <text> | more | detail <id> | toggle <id> | favorites>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List(Option<String>),
    Search(String),
    More,
    Detail(i64),
    Toggle(i64),
    Favorites,
}

#[tokio::main]
async fn main() -> ExitCode {
    let (config_path, args) = split_config_flag(std::env::args().skip(1).collect());

    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("giveaway: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let app = match initialize(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "initialization failed");
            eprintln!("giveaway: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(command = ?command, "running command");
    match run(&app, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, "command failed");
            eprintln!("giveaway: {e}");
            ExitCode::FAILURE
        }
    }
}

fn split_config_flag(args: Vec<String>) -> (Option<PathBuf>, Vec<String>) {
    let mut config = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config = iter.next().map(PathBuf::from);
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config = Some(PathBuf::from(path));
        } else {
            rest.push(arg);
        }
    }

    (config, rest)
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let parse_id = |raw: Option<&String>| -> Result<i64, String> {
        let raw = raw.ok_or_else(|| "missing giveaway id".to_string())?;
        raw.parse().map_err(|_| format!("invalid giveaway id: {raw}"))
    };

    match args.first().map(String::as_str) {
        None | Some("list") => match args.get(1) {
            Some(value)
                if !value
                    .split(MULTI_VALUE_SEPARATOR)
                    .all(|part| FilterPlatform::from_value(part).is_some()) =>
            {
                Err(format!("unknown platform: {value} (try {})", quick_filters()))
            }
            platform => Ok(Command::List(platform.cloned())),
        },
        Some("search") => {
            let text = args[1..].join(" ");
            if text.is_empty() {
                Err("missing search text".to_string())
            } else {
                Ok(Command::Search(text))
            }
        }
        Some("more") => Ok(Command::More),
        Some("detail") => parse_id(args.get(1)).map(Command::Detail),
        Some("toggle") => parse_id(args.get(1)).map(Command::Toggle),
        Some("favorites") => Ok(Command::Favorites),
        Some(other) => Err(format!("unknown command: {other}")),
    }
}

fn quick_filters() -> String {
    FilterPlatform::home_filters()
        .iter()
        .map(|platform| platform.value())
        .collect::<Vec<_>>()
        .join(", ")
}

fn load_config(path: Option<PathBuf>) -> giveaway::Result<Config> {
    match path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)) {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

async fn run(app: &App, command: Command) -> Result<(), ApiError> {
    match command {
        Command::List(platform) => {
            let mut home = app.home();
            home.load_first_page_with(app.client(), platform.map(GiveawayFilter::platform))
                .await;
            print_home(&home)
        }
        Command::Search(text) => {
            let mut home = app.home();
            home.load_first_page_with(app.client(), None).await;
            home.set_search_text(text);
            print_home(&home)
        }
        Command::More => {
            let mut more = app.more();
            more.load_with(app.client()).await;
            if let Some(error) = more.state.error {
                return Err(error);
            }
            println!("Featured");
            for item in &more.state.carousel_items {
                println!("{}", format_item(item));
            }
            for (platform, items) in &more.state.sections {
                println!("\n{platform} ({})", items.len());
                for item in items {
                    println!("{}", format_item(item));
                }
            }
            Ok(())
        }
        Command::Detail(id) => {
            let detail = load_detail(app, id).await?;
            if let Some(item) = &detail.state.item {
                print_detail(item);
            }
            Ok(())
        }
        Command::Toggle(id) => {
            let mut detail = load_detail(app, id).await?;
            detail.handle_event(DetailEvent::ToggleFavorite);
            let verb = if detail.state.is_favorite { "added" } else { "removed" };
            println!("{verb} favorite {id}");
            Ok(())
        }
        Command::Favorites => {
            let favorites = app.favorites().favorites();
            if favorites.is_empty() {
                println!("no favorites yet");
            }
            for item in &favorites {
                println!("{}", format_item(item));
            }
            Ok(())
        }
    }
}

async fn load_detail(app: &App, id: i64) -> Result<giveaway::DetailViewModel, ApiError> {
    let mut detail = app.detail(id, app.favorites().contains(id));
    giveaway::app::dispatch(&mut detail, app.client(), DetailEvent::Load).await;
    match detail.state.error {
        Some(error) => Err(error),
        None => Ok(detail),
    }
}

fn print_home(home: &HomeViewModel) -> Result<(), ApiError> {
    if let Some(error) = home.state.error {
        return Err(error);
    }
    for item in home.displayed_items() {
        println!("{}", format_item(item));
    }
    if home.state.search_text.is_empty() && home.state.has_more_pages {
        let hidden = home
            .state
            .pages
            .iter()
            .map(Vec::len)
            .sum::<usize>()
            .saturating_sub(home.state.visible_items.len());
        println!("... {hidden} more");
    }
    Ok(())
}

fn format_item(item: &GiveawayItem) -> String {
    let marker = if item.is_favorite { '*' } else { ' ' };
    format!(
        "{marker} {:>6}  {}  [{}]  {}",
        item.id,
        item.title.as_deref().unwrap_or("untitled"),
        item.platforms.as_deref().unwrap_or("-"),
        item.worth.as_deref().unwrap_or("N/A"),
    )
}

fn print_detail(item: &GiveawayItem) {
    println!("{}", format_item(item));
    let fields = [
        ("type", item.kind.as_deref()),
        ("status", item.status.as_deref()),
        ("published", item.published_date.as_deref()),
        ("ends", item.end_date.as_deref()),
        ("claim", item.open_giveaway_url.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label:<10} {value}");
        }
    }
    if let Some(description) = &item.description {
        println!("\n{description}");
    }
    if let Some(instructions) = &item.instructions {
        println!("\n{instructions}");
    }
}
