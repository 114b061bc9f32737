#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! github-activity — show a GitHub user's recent public activity.

mod cli;
mod commands;
mod github;
mod logging;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error, write_usage};
use github::{ActivityError, GitHubClient};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; every other parse error exits 1.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(err) = logging::init(cli.debug) {
        eprintln!("warning: {err:#}");
    }

    let ctx = OutputCtx::new(cli.output_mode(), cli.no_color, cli.debug);

    let Some(request) = cli.request() else {
        // Same as `report`: the exit code is what matters if stdout is gone.
        let _ = write_usage(&mut std::io::stdout().lock(), ctx.palette);
        std::process::exit(1);
    };

    let result = match GitHubClient::new(&cli.api_url) {
        Ok(client) => commands::run(&client, &request, &ctx, &mut std::io::stdout().lock()).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        report(&err, &ctx);
        std::process::exit(err.exit_code());
    }
}

fn report(err: &ActivityError, ctx: &OutputCtx) {
    tracing::debug!(code = err.code(), "run failed");
    // A failed write to stderr has nowhere left to be reported; the exit code still carries it.
    let _ = write_error(&mut std::io::stderr().lock(), ctx.error_palette, err);
}
