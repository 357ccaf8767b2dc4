//! Art Deco CLI - Find artworks that look like an image
//!
//! Thin shell over the search service: builds adapters from the saved
//! configuration and prints results as text or JSON.

mod config;
mod output;

use anyhow::{bail, Context, Result};
use art_deco::{Artwork, ImageEmbedder, ImageRef};
use art_deco_adapters::{
    create_catalog_service, create_embedder, create_search_service, ArtDecoConfig, EmbedderKind,
    WireSchema,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "art-deco")]
#[command(about = "Art Deco CLI - Find artworks that look like an image", long_about = None)]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Artwork backend endpoint (overrides config and environment)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Wire schema of the backend: v1 (author) or v2 (artist)
    #[arg(long, global = true)]
    schema: Option<WireSchema>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find artworks similar to an image (path, URL, or data URI)
    Search {
        image: String,
    },

    /// Find artworks similar to one already in the catalog
    Similar {
        /// Artwork ID
        id: String,
    },

    /// Show a single artwork
    Show {
        /// Artwork ID
        id: String,
    },

    /// Print the embedding of an image
    Embed {
        image: String,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the artwork backend endpoint
    SetEndpoint {
        url: String,
    },
    /// Choose the image embedder (remote, clip)
    SetEmbedder {
        kind: EmbedderKind,
        /// Inference service endpoint (remote embedder)
        #[arg(long)]
        url: Option<String>,
    },
    /// Set the backend wire schema (v1, v2)
    SetSchema {
        schema: WireSchema,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = || -> Result<ArtDecoConfig> {
        let mut settings = Config::load()?.resolved();
        if let Some(endpoint) = &cli.endpoint {
            settings.store.endpoint = endpoint.clone();
        }
        if let Some(schema) = cli.schema {
            settings.store.schema = schema;
        }
        tracing::debug!(
            store = %settings.store.endpoint,
            embedder = %settings.embedder.kind,
            "Configuration resolved"
        );
        Ok(settings)
    };

    match &cli.command {
        Commands::Search { image } => cmd_search(&settings()?, image, cli.json).await,
        Commands::Similar { id } => cmd_similar(&settings()?, id, cli.json).await,
        Commands::Show { id } => cmd_show(&settings()?, id, cli.json).await,
        Commands::Embed { image } => cmd_embed(&settings()?, image, cli.json).await,
        Commands::Config { action } => cmd_config(action.as_ref().unwrap_or(&ConfigAction::Show)),
    }
}

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

// ============================================
// Command Implementations
// ============================================

async fn cmd_search(settings: &ArtDecoConfig, image: &str, json: bool) -> Result<()> {
    let service = create_search_service(settings)
        .await
        .context("Failed to set up search")?;

    let artworks = service
        .find_similar_artwork(&ImageRef::new(image))
        .await
        .with_context(|| format!("Search failed for {}", image))?;

    print_artworks(&artworks, json)
}

async fn cmd_similar(settings: &ArtDecoConfig, id: &str, json: bool) -> Result<()> {
    let catalog =
        create_catalog_service(&settings.store).context("Failed to set up artwork store")?;

    let Some(artworks) = catalog.find_similar_to_artwork(id).await? else {
        bail!("Artwork '{}' not found", id);
    };

    print_artworks(&artworks, json)
}

async fn cmd_show(settings: &ArtDecoConfig, id: &str, json: bool) -> Result<()> {
    let catalog =
        create_catalog_service(&settings.store).context("Failed to set up artwork store")?;

    let Some(artwork) = catalog.fetch_artwork(id).await? else {
        bail!("Artwork '{}' not found", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&artwork)?);
    } else {
        println!("{}", output::render_artwork(&artwork));
    }

    Ok(())
}

async fn cmd_embed(settings: &ArtDecoConfig, image: &str, json: bool) -> Result<()> {
    let embedder = create_embedder(&settings.embedder)
        .await
        .context("Failed to set up embedder")?;

    let embedding = embedder.embed(&ImageRef::new(image)).await?;

    if json {
        let value = serde_json::json!({
            "dimensions": embedding.dimensions(),
            "embedding": embedding,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", output::render_embedding(&embedding));
    }

    Ok(())
}

fn print_artworks(artworks: &[Artwork], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(artworks)?);
    } else {
        println!("{}", output::render_artworks(artworks));
    }
    Ok(())
}

fn cmd_config(action: &ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            let store = &config.settings.store;
            let embedder = &config.settings.embedder;

            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Store: {} ({})", store.backend.to_string().cyan(), store.endpoint);
            println!("  Schema: {}", store.schema);
            println!("  Embedder: {} ({})", embedder.kind.to_string().cyan(), embedder.endpoint);
            println!("  Model: {}", embedder.model);
            println!(
                "  API Key: {}",
                if embedder.api_key.is_some() { "Set".green() } else { "Not set".red() }
            );
            println!("{}", "Environment variables override these values.".dimmed());
            return Ok(());
        }
        ConfigAction::SetEndpoint { url } => {
            config.set_endpoint(url.clone());
            println!("{} Endpoint set to {}", "✓".green(), config.settings.store.endpoint);
        }
        ConfigAction::SetEmbedder { kind, url } => {
            config.set_embedder(*kind, url.clone());
            println!("{} Embedder set to {}", "✓".green(), kind);
        }
        ConfigAction::SetSchema { schema } => {
            config.set_schema(*schema);
            println!("{} Schema set to {}", "✓".green(), schema);
        }
    }

    config.save()?;
    Ok(())
}
