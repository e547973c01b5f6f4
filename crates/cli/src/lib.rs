mod check;
mod list;
mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use serve::{ServeArgs, parse_component};

#[derive(Parser)]
#[command(
    name = "pkglink",
    version,
    about = "Serve installed front-end packages under versioned URLs",
    long_about = "pkglink publishes bower-style component directories under immutable, \
                  version-qualified URLs and injects the script and stylesheet tags a page \
                  needs, dependencies first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an asset server
    #[command(
        long_about = "Serves every configured collection under /<signature>/<collection>/. \
                      Flags override the values read from the configuration file."
    )]
    Serve(ServeArgs),
    /// Load a components directory and print its dependency order
    Check {
        /// Path to the components directory (e.g. bower_components)
        #[arg(value_name = "COMPONENTS_DIR")]
        path: PathBuf,
    },
    /// Print every package of a components directory with its URLs
    List {
        /// Path to the components directory (e.g. bower_components)
        #[arg(value_name = "COMPONENTS_DIR")]
        path: PathBuf,
        /// Collection name used in the printed URLs
        #[arg(long, default_value = "components")]
        name: String,
        /// URL signature used in the printed URLs
        #[arg(long, default_value = pkglink_core::DEFAULT_SIGNATURE)]
        signature: String,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (component, to_stderr) = match &cli.command {
        Commands::Serve(_) => ("serve", true),
        _ => ("cli", false),
    };
    let _guard = pkglink_core::logging::init_logging(component, to_stderr);

    match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve::run(args))
        }
        Commands::Check { path } => check::run(&path),
        Commands::List {
            path,
            name,
            signature,
        } => list::run(&path, &name, &signature),
    }
}
