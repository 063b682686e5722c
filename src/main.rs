use clap::{Parser, Subcommand};
use mdpress::{config, generate, output, scaffold, scan, serve};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(about = "Static site generator for markdown documentation")]
#[command(long_about = "\
Static site generator for markdown documentation

Your filesystem is the data source. Markdown files become pages, their
paths become URLs, and frontmatter controls titles, sidebar grouping,
and ordering.

Content structure:

  mdpress.toml                     # Site config (optional)
  client/                          # Ejected CSS/JS overrides (optional)
  docs/
  ├── index.md                     # → /
  ├── changelog.md                 # → /changelog
  ├── guides/
  │   ├── getting-started.md       # → /guides/getting-started
  │   └── deployment.md            # → /guides/deployment
  └── assets/                      # Static files → copied to output root
      └── logo.svg

Frontmatter keys (all optional):

  title:        Page title (falls back to first # heading, then filename)
  description:  Summary for search results and meta tags
  group:        Sidebar group; ungrouped pages sit at the top
  order:        Sort position within the group
  icon:         Icon name shown next to the nav entry
  hidden:       Render but keep out of nav and search

Run 'mdpress gen-config' to print a documented mdpress.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "docs", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Config file
    #[arg(long, default_value = "mdpress.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scaffold a new documentation project
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Serve the site with rebuild-on-change and live reload
    Dev {
        /// Port to listen on
        #[arg(long, default_value_t = 4173)]
        port: u16,
    },
    /// Build the static site
    Build,
    /// Serve an already-built output directory
    Preview {
        /// Port to listen on
        #[arg(long, default_value_t = 4174)]
        port: u16,
    },
    /// Generate deployment config for a hosting target
    Deploy {
        /// Hosting target
        #[arg(value_enum)]
        target: scaffold::DeployTarget,
    },
    /// Eject the embedded client assets (CSS/JS) for customization
    Client,
    /// Scan content into a manifest and print the discovered tree
    Scan,
    /// Print a stock mdpress.toml with all options documented
    GenConfig,
}

/// Ejected client assets live in `client/` next to the config file.
fn client_dir(config_path: &Path) -> Option<PathBuf> {
    let dir = config_path
        .parent()
        .unwrap_or(Path::new("."))
        .join("client");
    dir.is_dir().then_some(dir)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Init { dir } => {
            let created = scaffold::init(&dir)?;
            for path in &created {
                println!("Created {}", dir.join(path).display());
            }
            println!("==> Project ready. Run `mdpress dev` to start writing.");
        }
        Command::Dev { port } => {
            let client = client_dir(&cli.config);
            serve::dev(&cli.source, &cli.config, client.as_deref(), port)?;
        }
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            println!("==> Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source, &config)?;

            println!(
                "==> Rendering {} pages → {}",
                manifest.pages.len(),
                cli.output.display()
            );
            let opts = generate::RenderOptions {
                livereload: false,
                client_dir: client_dir(&cli.config),
            };
            let summary = generate::build(&manifest, &cli.source, &cli.output, &opts)?;
            output::print_build_output(&summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Preview { port } => {
            serve::preview(&cli.output, port)?;
        }
        Command::Deploy { target } => {
            let (created, skipped) = scaffold::write_deploy(Path::new("."), target)?;
            for path in &created {
                println!("Created {}", path.display());
            }
            for path in &skipped {
                println!("Skipped {} (already exists)", path.display());
            }
        }
        Command::Client => {
            let project_dir = cli.config.parent().unwrap_or(Path::new(".")).to_path_buf();
            let created = scaffold::eject_client(&project_dir)?;
            for path in &created {
                println!("Created {}", path.display());
            }
            println!("==> Builds now prefer the ejected files over the embedded ones.");
        }
        Command::Scan => {
            let config = config::load_config(&cli.config)?;
            let manifest = scan::scan(&cli.source, &config)?;
            std::fs::create_dir_all(&cli.output)?;
            let manifest_path = cli.output.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
            println!();
            println!("Manifest written to {}", manifest_path.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
