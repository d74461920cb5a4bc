//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::query::ListParams;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Blog content pipeline for a personal portfolio site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new draft post
    New {
        /// Title of the new post
        title: String,

        /// Slug (file name) for the post, defaults to the slugified title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List posts or tags
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Case-insensitive search over title, description and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Page size
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of posts to skip
        #[arg(short, long)]
        offset: Option<usize>,
    },

    /// Render a single post
    Show {
        /// Slug of the post
        slug: String,

        /// Print a full HTML page instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Start the HTTP server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let site = folio::Folio::new(&base_dir)?;
            let path = site.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List {
            r#type,
            search,
            tag,
            limit,
            offset,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let params = ListParams {
                search,
                tag,
                limit: limit.map(|l| l.to_string()),
                offset: offset.map(|o| o.to_string()),
            };
            let query = params.into_query(site.config.per_page);
            folio::commands::list::run(&site, &r#type, &query)?;
        }

        Commands::Show { slug, html } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::run(&site, &slug, html)?;
        }

        Commands::Server { port, ip } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
