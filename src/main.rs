use anyhow::Context;
use clap::{Parser, Subcommand};
use specmatch_core::{AttributeRecord, IndexConfig, Requirement};
use specmatch_matching::{MatchConfig, Recommender};
use specmatch_storage::{load_catalog, IndexManager, SnapshotStore};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Match cable requirements against a product catalog
#[derive(Parser, Debug)]
#[command(name = "specmatch")]
#[command(about = "Deterministic cable spec matching", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an index from a catalog file and save a snapshot
    Index {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Snapshot file to write
        #[arg(short, long, default_value = "./data/index.snapshot")]
        out: PathBuf,

        /// Match configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the catalog items nearest to a query text
    Search {
        /// Snapshot file
        #[arg(short, long, default_value = "./data/index.snapshot")]
        index: PathBuf,

        /// Catalog to build from when the snapshot is missing
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(short, long)]
        query: String,

        /// Number of results
        #[arg(short, default_value_t = 5)]
        k: usize,
    },

    /// Recommend a catalog item for one requirement
    Match {
        /// Snapshot file
        #[arg(short, long, default_value = "./data/index.snapshot")]
        index: PathBuf,

        /// Catalog to build from when the snapshot is missing
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Requirement text
        #[arg(short, long)]
        query: String,

        #[command(flatten)]
        attributes: AttributeArgs,

        /// Match configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Requirement line item number
        #[arg(long, default_value_t = 1)]
        item_id: u64,
    },
}

/// Requirement attributes; values are normalized
#[derive(clap::Args, Debug)]
struct AttributeArgs {
    #[arg(long)]
    voltage: Option<String>,
    #[arg(long)]
    conductor_material: Option<String>,
    #[arg(long)]
    cross_section: Option<String>,
    #[arg(long)]
    core_count: Option<u32>,
    #[arg(long)]
    insulation: Option<String>,
    #[arg(long)]
    armouring: Option<String>,
    #[arg(long)]
    sheathing: Option<String>,
}

impl AttributeArgs {
    fn to_record(&self) -> AttributeRecord {
        let mut builder = AttributeRecord::builder();
        if let Some(v) = &self.voltage {
            builder = builder.voltage(v);
        }
        if let Some(v) = &self.conductor_material {
            builder = builder.conductor_material(v);
        }
        if let Some(v) = &self.cross_section {
            builder = builder.cross_section(v);
        }
        if let Some(n) = self.core_count {
            builder = builder.core_count(n);
        }
        if let Some(v) = &self.insulation {
            builder = builder.insulation(v);
        }
        if let Some(v) = &self.armouring {
            builder = builder.armouring(v);
        }
        if let Some(v) = &self.sheathing {
            builder = builder.sheathing(v);
        }
        builder.build()
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::from_json_file(path)
            .with_context(|| format!("invalid configuration {}", path.display())),
        None => Ok(MatchConfig::default()),
    }
}

fn open_index(
    config: &MatchConfig,
    index: PathBuf,
    catalog: Option<PathBuf>,
) -> anyhow::Result<IndexManager> {
    let manager = IndexManager::new(IndexConfig {
        dimension: config.embedding_dimension,
    });
    manager.open_or_build(&SnapshotStore::new(index), catalog)?;
    Ok(manager)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Results go to stdout; logs stay on stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Index { catalog, out, config } => {
            let config = load_config(config.as_ref())?;
            let manager = IndexManager::new(IndexConfig {
                dimension: config.embedding_dimension,
            });
            manager.rebuild(load_catalog(&catalog)?)?;
            let description = manager.save(&SnapshotStore::new(&out))?;
            info!("Indexed {} items into {:?}", description.items, description.path);
            println!("{}", serde_json::to_string_pretty(&description)?);
        }

        Command::Search { index, catalog, query, k } => {
            let manager = open_index(&MatchConfig::default(), index, catalog)?;
            let current = manager.current();
            for (item, distance) in current.search_with_distances(&query, k)? {
                println!("{}\t{:.4}\t{}", item.id, distance, item.name);
            }
        }

        Command::Match {
            index,
            catalog,
            query,
            attributes,
            config,
            item_id,
        } => {
            let config = load_config(config.as_ref())?;
            let requirement = Requirement::new(item_id, query, attributes.to_record());
            for issue in requirement.attributes.validate() {
                warn!(item_id, "{}", issue);
            }

            let manager = open_index(&config, index, catalog)?;
            let recommender = Recommender::new(&config)?;
            let recommendation = recommender.recommend(&manager.current(), &requirement)?;

            info!(
                "Recommended {:?} with score {}",
                recommendation.recommended_id, recommendation.recommended_score
            );
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
        }
    }

    Ok(())
}
