use clap::{CommandFactory, Parser};
use glean::cli::Cli;
use glean::config::Config;
use glean::render;
use glean::search::Searcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only ever carries the rendered result.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if std::env::args_os().len() < 2 {
        println!("{}", Cli::command().render_usage());
        std::process::exit(1);
    }

    let config = Config::from_env();
    let invocation = Cli::parse().invocation(config.default_results);

    let searcher = Searcher::new(config)?;
    let result = searcher.search(&invocation.query).await;

    if invocation.json {
        println!("{}", render::to_json(&result)?);
    } else {
        println!("{}", render::to_text(&result));
    }
    Ok(())
}
