//! vaultsim Binary
//!
//! Seeds a simulated vault and drives it the way a crawling client would.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};
use vaultsim::crawl::crawl;
use vaultsim::protocol::{decode_lookup, Request};
use vaultsim::{Config, Namespace, Simulator};

/// vaultsim
#[derive(Parser, Debug)]
#[command(name = "vaultsim")]
#[command(about = "Deterministic simulator of a paginated block-listing API")]
#[command(version)]
struct Args {
    /// Logical blocks to generate
    #[arg(short, long, default_value = "20")]
    blocks: usize,

    /// Orphaned storage blocks to distribute
    #[arg(short, long, default_value = "0")]
    orphans: usize,

    /// Page length divisor
    #[arg(short, long, default_value = "3")]
    divisor: usize,

    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Vault id
    #[arg(short, long, default_value = "vault_0")]
    vault: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NamespaceArg {
    Metadata,
    Storage,
}

impl From<NamespaceArg> for Namespace {
    fn from(arg: NamespaceArg) -> Self {
        match arg {
            NamespaceArg::Metadata => Namespace::Metadata,
            NamespaceArg::Storage => Namespace::Storage,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a namespace page by page
    Crawl {
        #[arg(short, long, value_enum, default_value = "storage")]
        namespace: NamespaceArg,
    },

    /// Look up one block
    Head {
        #[arg(short, long, value_enum, default_value = "metadata")]
        namespace: NamespaceArg,

        /// Block id (metadata) or storage id (storage)
        id: String,
    },

    /// Print namespace sizes
    Summary,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vaultsim=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("vaultsim v{}", vaultsim::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("vaultsim failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> vaultsim::Result<()> {
    let mut builder = Config::builder()
        .vault_id(&args.vault)
        .page_fraction(args.divisor);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let sim = Simulator::new(builder.build())?;
    tracing::info!("Seed: {}", sim.seed());

    sim.generate_blocks(args.blocks)?;
    sim.generate_orphaned_blocks(args.orphans)?;

    match args.command {
        Commands::Crawl { namespace } => {
            let report = crawl(&sim, namespace.into())?;
            for (i, page) in report.pages.iter().enumerate() {
                println!("page {} ({} ids)", i + 1, page.len());
                for id in page {
                    println!("  {}", id);
                }
            }
            println!(
                "{} requests, {} ids served, {} distinct",
                report.requests(),
                report.served(),
                report.ids.len()
            );
        }
        Commands::Head { namespace, id } => {
            let request = Request::head(&sim.block_url(namespace.into(), &id)?)?;
            let response = sim.execute(&request);
            println!("{}", response.status.code());
            for (name, value) in &response.headers {
                println!("{}: {}", name, value);
            }
            if let Some(body) = response.body_text().filter(|b| !b.is_empty()) {
                println!("{}", body);
            }
            tracing::debug!("Decoded: {:?}", decode_lookup(&response)?);
        }
        Commands::Summary => {
            let universe = sim.universe();
            println!("vault:    {}", universe.vault_id());
            println!("metadata: {}", universe.len(Namespace::Metadata));
            println!("storage:  {}", universe.len(Namespace::Storage));
            println!("orphans:  {}", universe.orphan_count());
        }
    }

    Ok(())
}
