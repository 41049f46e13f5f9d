use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};

mod env;
mod error;
mod plugins;
mod release;
mod util;

use error::{BuildError, Result};
use plugins::{JsonPluginCache, NodeModulesParser, NpmInstaller};
use release::ManifestBuilder;

#[derive(Parser, Debug)]
#[command(
    name = "heroku-build",
    author,
    version,
    about = "Release tooling for the Heroku CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// These commands are used to build the CLI. They are not intended to be used otherwise.
    #[command(subcommand, hide = true)]
    Build(BuildCommand),
}

#[derive(Subcommand, Debug)]
enum BuildCommand {
    /// Builds manifest.json to upload to S3
    #[command(hide = true)]
    Manifest(ManifestArgs),

    /// Installs core plugins
    #[command(hide = true)]
    Plugins(PluginsArgs),
}

#[derive(Args, Debug)]
struct ManifestArgs {
    /// Directory holding the built archives (kept for compatibility, unused).
    #[arg(short, long)]
    dir: PathBuf,

    #[arg(short, long)]
    version: String,

    #[arg(short, long)]
    channel: String,

    /// Comma-separated archive paths.
    #[arg(short, long)]
    targets: String,

    #[arg(long, env = "HEROKU_ASSETS_URL", default_value = release::DEFAULT_BASE_URL, hide = true)]
    base_url: String,
}

#[derive(Args, Debug)]
struct PluginsArgs {
    #[arg(long, env = "HEROKU_CORE_PLUGINS_DIR")]
    core_plugins_dir: Option<PathBuf>,

    #[arg(long, env = "HEROKU_PLUGIN_CACHE")]
    cache: Option<PathBuf>,

    #[arg(long, env = "HEROKU_NPM", default_value = "npm")]
    npm: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Build(BuildCommand::Manifest(args)) => build_manifest(args),
        Command::Build(BuildCommand::Plugins(args)) => build_plugins(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn build_manifest(args: ManifestArgs) -> Result<()> {
    let targets = util::split_targets(&args.targets);
    debug!("manifest: archive dir {}", args.dir.display());
    let manifest = ManifestBuilder::new(args.version, args.channel)
        .with_base_url(args.base_url)
        .build(&targets)?;
    info!(
        "manifest: {} build(s) for {} {} released at {}",
        manifest.builds().len(),
        manifest.channel(),
        manifest.version(),
        manifest.released_at()
    );
    let json = manifest.to_json()?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")
        .and_then(|()| stdout.flush())
        .map_err(BuildError::Output)
}

fn build_plugins(args: PluginsArgs) -> Result<()> {
    let dir = args.core_plugins_dir.unwrap_or_else(env::core_plugins_dir);
    let cache_path = args.cache.unwrap_or_else(env::plugin_cache_path);
    let installer = NpmInstaller::new(args.npm, &dir);
    let parser = NodeModulesParser::new(&dir);
    let mut cache = JsonPluginCache::open(cache_path)?;
    let plugins = plugins::install_core_plugins(&dir, &installer, &parser, &mut cache)?;
    info!(
        "plugins: {} core plugin(s) cached in {}",
        plugins.len(),
        cache.path().display()
    );
    Ok(())
}
