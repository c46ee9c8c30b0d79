mod build_cmd;
mod cli;
mod page_range;
mod roles_cmd;
mod scenes_cmd;
mod shared;
mod tokens_cmd;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        cli::Commands::Build {
            ref schedule,
            ref template,
            ref output,
            cast_split,
            tokens,
            debug,
            super_debug,
            ref changelog,
        } => build_cmd::run(&build_cmd::BuildArgs {
            schedule,
            template,
            output: output.as_deref(),
            cast_split,
            tokens,
            debug,
            super_debug,
            changelog: changelog.as_deref(),
        }),
        cli::Commands::Scenes {
            ref schedule,
            tokens,
            cast_split,
            ref format,
        } => scenes_cmd::run(schedule, tokens, cast_split, format),
        cli::Commands::Roles {
            ref schedule,
            tokens,
            ref format,
        } => roles_cmd::run(schedule, tokens, format),
        cli::Commands::Tokens {
            ref file,
            ref pages,
            ref output,
        } => tokens_cmd::run(file, pages.as_deref(), output.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

/// Log to stderr. `RUST_LOG` picks the filter, defaulting to `warn`;
/// `--verbose` forces `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
