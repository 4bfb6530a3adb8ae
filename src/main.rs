use clap::{Parser, Subcommand};
use daily_thoughts::config::{self, SiteConfig};
use daily_thoughts::repository::EntryRepository;
use daily_thoughts::{output, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => &*Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

/// Overrides for the `[content]` config section.
#[derive(clap::Args, Clone)]
struct ContentArgs {
    /// Directory of `YYYY-MM-DD.md` entries
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory served for paths the router doesn't handle
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "daily-thoughts")]
#[command(about = "Web server for a blog of dated markdown entries")]
#[command(long_about = "\
Web server for a blog of dated markdown entries

Each entry is a markdown file named after its date. The entry list is read
from disk on every request, so new entries are live as soon as they're saved.

Content structure:

  content/daily/
  ├── 2024-03-01.md        # → /daily/2024-03-01
  ├── 2024-02-15.md
  └── 2024-01-10.md
  static/
  └── style.css            # → /style.css

Routes:
  /                        → 307 /daily
  /daily                   → list of entries
  /daily/YYYY-MM-DD        → one entry, with previous/next links
  anything else            → file under the static directory

Run 'daily-thoughts gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (optional; defaults apply if it doesn't exist)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:8000
        #[arg(long)]
        address: Option<String>,

        #[command(flatten)]
        content: ContentArgs,
    },
    /// List the entries the server would see
    Check(ContentArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { address, content } => {
            init_tracing();
            let mut site_config = config::load_config(&cli.config)?;
            if let Some(address) = address {
                site_config.server.address = address;
            }
            apply_content_args(&mut site_config, content);
            site_config.validate()?;
            server::serve(site_config).await?;
        }
        Command::Check(content) => {
            let mut site_config = config::load_config(&cli.config)?;
            apply_content_args(&mut site_config, content);
            site_config.validate()?;
            let repository = EntryRepository::new(
                &site_config.content.entries_dir,
                site_config.content.order,
            );
            let inventory = repository.inspect().await?;
            output::print_check_output(&inventory, site_config.content.order, repository.dir());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn apply_content_args(site_config: &mut SiteConfig, args: ContentArgs) {
    if let Some(dir) = args.content {
        site_config.content.entries_dir = dir;
    }
    if let Some(dir) = args.static_dir {
        site_config.content.static_dir = dir;
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
