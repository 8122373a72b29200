use anyhow::bail;
use clap::Parser;
use common::utils::config::get_config;
use photo_search::{
    app::{MORE_BUTTON, SEARCH_BUTTON},
    FetchOutcome, PhotoSearchApp, RedditClient, SearchOptions, UiEvent,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Searches Reddit for photos and prints the matching submissions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Include adult content in the results
    #[arg(long)]
    nsfw: bool,

    /// Number of result pages to fetch
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Search text
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let args = Args::parse();
    let config = get_config()?;
    let client = RedditClient::from_config(&config)?;

    let mut app = PhotoSearchApp::new(
        SearchOptions {
            include_over_18: args.nsfw,
        },
        config.thumbnail_size,
    );
    app.set_input(args.query.join(" "));

    let mut next = app.dispatch(&UiEvent::click(SEARCH_BUTTON));
    let mut pages = 0;
    let mut shown = 0;

    while let Some(request) = next {
        if app.run(&client, request).await == FetchOutcome::Failed {
            bail!("search request failed, see log for details");
        }
        pages += 1;

        for card in app.results().cards().iter().skip(shown) {
            println!("{card}\n");
        }
        shown = app.results().cards().len();

        next = if pages < args.pages {
            app.dispatch(&UiEvent::click(MORE_BUTTON))
        } else {
            None
        };
    }

    info!(pages, results = shown, "search finished");
    Ok(())
}
