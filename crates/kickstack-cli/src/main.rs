mod cmd;
mod output;
mod prompt;
mod root;

use clap::Parser;
use cmd::create::CreateArgs;
use kickstack_core::types::Variant;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "create-kickstack",
    about = "Scaffold a clean React + Vite starter without the demo clutter",
    version
)]
struct Cli {
    /// Project name; also the folder that is created
    name: Option<String>,

    /// Skip the variant prompt: react, react-tailwind, react-ts, react-ts-tailwind
    #[arg(long, value_name = "VARIANT")]
    variant: Option<Variant>,

    /// Include React Router without asking
    #[arg(long, conflicts_with = "no_router")]
    router: bool,

    /// Leave React Router out without asking
    #[arg(long)]
    no_router: bool,

    /// Start the dev server when done without asking
    #[arg(long, conflicts_with = "no_dev")]
    dev: bool,

    /// Do not start the dev server and do not ask
    #[arg(long)]
    no_dev: bool,

    /// Directory to create the project in (default: current directory)
    #[arg(long, env = "KICKSTACK_DIR")]
    dir: Option<PathBuf>,

    /// Path to a kickstack.yaml config file
    #[arg(long, env = "KICKSTACK_CONFIG")]
    config: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long, short = 'j')]
    json: bool,
}

fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CreateArgs {
        name: cli.name,
        variant: cli.variant,
        router: flag_pair(cli.router, cli.no_router),
        dev: flag_pair(cli.dev, cli.no_dev),
        base: root::resolve_base(cli.dir.as_deref()),
        config: cli.config,
        json: cli.json,
    };

    if let Err(e) = cmd::create::run(args) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
