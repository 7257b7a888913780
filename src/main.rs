//! # Fabric Catalog CLI (`fabcat`)
//!
//! The `fabcat` binary is the primary interface to the pattern catalog. It
//! provides commands for browsing and filtering the catalog, inspecting
//! individual patterns, analyzing a selected stack for compatibility, and
//! exporting a stack as JSON or HTML.
//!
//! ## Usage
//!
//! ```bash
//! fabcat --config ./config/catalog.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fabcat list` | Browse the catalog with search and facet filters |
//! | `fabcat show <id>` | Print one pattern in full detail |
//! | `fabcat domains` | List the distinct domain facet values |
//! | `fabcat stats` | Catalog totals and per-domain breakdown |
//! | `fabcat analyze <id>...` | Compatibility analysis for a selected stack |
//! | `fabcat export <id>...` | Export a selected stack as JSON or HTML |
//! | `fabcat serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Filtered browse
//! fabcat list --search "lake" --domain Storage --complexity medium
//!
//! # Analyze a stack
//! fabcat analyze medallion-architecture direct-lake
//!
//! # Export to a file
//! fabcat export medallion-architecture direct-lake --format html --output stack.html
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fabric_catalog::config::{self, Config};
use fabric_catalog::filter::{complexity_counts, filter, Complexity, FilterCriteria, Maturity};
use fabric_catalog::models::Pattern;
use fabric_catalog::{catalog, export, resolver, server};

/// Fabric Catalog CLI — browse architecture patterns and build stacks.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/catalog.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "fabcat",
    about = "Fabric Catalog — browse Microsoft Fabric architecture patterns and build stacks",
    version,
    long_about = "Fabric Catalog holds a curated set of HR analytics architecture patterns for \
    Microsoft Fabric, with search and facet filtering, prerequisite and compatibility analysis \
    over a selected stack, and JSON/HTML stack exports."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/catalog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog.
    ///
    /// Applies the search and facet filters, then prints the matching
    /// patterns in catalog order together with complexity-bucket counts.
    List {
        /// Case-insensitive substring match on name, description, and summary.
        #[arg(long)]
        search: Option<String>,

        /// Restrict to a domain; repeat for multiple domains.
        #[arg(long = "domain")]
        domains: Vec<String>,

        /// Restrict to one complexity level.
        #[arg(long, value_enum)]
        complexity: Option<Complexity>,

        /// Restrict to one maturity level.
        #[arg(long, value_enum)]
        maturity: Option<Maturity>,
    },

    /// Print one pattern in full detail.
    ///
    /// Shows description, pros/cons, governance considerations, use cases,
    /// effort and cost labels, and reference links.
    Show {
        /// Pattern id.
        id: String,
    },

    /// List the distinct domain facet values.
    Domains,

    /// Catalog totals and per-domain breakdown.
    Stats,

    /// Analyze a selected stack for compatibility.
    ///
    /// Reports compatible pairings, missing prerequisites, and
    /// incompatibilities among the selected patterns, followed by the
    /// combined stack footprint. Unknown ids are skipped, never fatal.
    Analyze {
        /// Pattern ids to include in the stack.
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Export a selected stack.
    ///
    /// Writes the export to `--output` when given, otherwise to stdout.
    Export {
        /// Pattern ids to include in the stack.
        #[arg(required = true)]
        ids: Vec<String>,

        /// Export format.
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file path.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Start the JSON HTTP server.
    ///
    /// Binds to `[server].bind` and serves the catalog, analysis, and
    /// export endpoints for browser frontends.
    Serve,
}

/// Stack export formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ExportFormat {
    Json,
    Html,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::List {
            search,
            domains,
            complexity,
            maturity,
        } => {
            let criteria = FilterCriteria {
                search: search.unwrap_or_default(),
                domains,
                complexity,
                maturity,
            };
            run_list(&cfg, &criteria)?;
        }
        Commands::Show { id } => {
            run_show(&cfg, &id)?;
        }
        Commands::Domains => {
            run_domains(&cfg)?;
        }
        Commands::Stats => {
            run_stats(&cfg)?;
        }
        Commands::Analyze { ids } => {
            run_analyze(&cfg, &ids)?;
        }
        Commands::Export {
            ids,
            format,
            output,
        } => {
            run_export(&cfg, &ids, format, output.as_deref())?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}

fn run_list(config: &Config, criteria: &FilterCriteria) -> Result<()> {
    let patterns = catalog::load(&config.catalog.path)?;
    let view = filter(&patterns, criteria);
    let counts = complexity_counts(&view);

    println!(
        "{} pattern(s)   low: {}  medium: {}  high: {}",
        view.len(),
        counts.low,
        counts.medium,
        counts.high
    );
    println!();

    if view.is_empty() {
        println!("No patterns match the filters.");
        return Ok(());
    }

    for (i, p) in view.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, p.name, p.id);
        println!(
            "    domain: {}   complexity: {}   maturity: {}",
            p.domain.as_deref().unwrap_or("N/A"),
            p.complexity.as_deref().unwrap_or("N/A"),
            p.maturity.as_deref().unwrap_or("N/A")
        );
        if !p.summary.is_empty() {
            println!("    {}", p.summary);
        }
        println!();
    }

    Ok(())
}

fn run_show(config: &Config, id: &str) -> Result<()> {
    let patterns = catalog::load(&config.catalog.path)?;
    let Some(p) = catalog::find(&patterns, id) else {
        bail!("pattern not found: {}", id);
    };

    println!("--- {} ---", p.name);
    println!("id:         {}", p.id);
    println!("domain:     {}", p.domain.as_deref().unwrap_or("N/A"));
    println!("complexity: {}", p.complexity.as_deref().unwrap_or("N/A"));
    println!("maturity:   {}", p.maturity.as_deref().unwrap_or("N/A"));
    println!(
        "effort:     {}",
        p.estimated_implementation_effort.as_deref().unwrap_or("N/A")
    );
    println!(
        "cost:       {}",
        p.cost_implications.as_deref().unwrap_or("N/A")
    );
    println!();

    println!("--- Description ---");
    println!(
        "{}",
        if p.description.is_empty() {
            "No description available"
        } else {
            &p.description
        }
    );
    println!();

    if !p.pros.is_empty() {
        println!("--- Pros ---");
        for pro in &p.pros {
            println!("  + {}", pro);
        }
        println!();
    }

    if !p.cons.is_empty() {
        println!("--- Cons ---");
        for con in &p.cons {
            println!("  - {}", con);
        }
        println!();
    }

    println!("--- Governance ---");
    println!(
        "{}",
        p.governance_considerations
            .as_deref()
            .unwrap_or("No governance guidelines provided")
    );
    println!();

    if !p.people_analytics_use_cases.is_empty() {
        println!("--- Use Cases ---");
        for use_case in &p.people_analytics_use_cases {
            println!("  * {}", use_case);
        }
        println!();
    }

    if !p.prerequisites.is_empty() {
        println!("--- Prerequisites ---");
        for prereq in &p.prerequisites {
            let display = catalog::find(&patterns, prereq)
                .map(|other| other.name.as_str())
                .unwrap_or(prereq.as_str());
            println!("  * {}", display);
        }
        println!();
    }

    if !p.reference_links.is_empty() {
        println!("--- References ---");
        for link in &p.reference_links {
            println!("  * {}: {}", link.label, link.url);
        }
        println!();
    }

    Ok(())
}

fn run_domains(config: &Config) -> Result<()> {
    let patterns = catalog::load(&config.catalog.path)?;
    for domain in catalog::domains(&patterns) {
        println!("{}", domain);
    }
    Ok(())
}

fn run_stats(config: &Config) -> Result<()> {
    let patterns = catalog::load(&config.catalog.path)?;
    let all = filter(&patterns, &FilterCriteria::default());
    let counts = complexity_counts(&all);

    println!("Fabric Catalog — Stats");
    println!("======================");
    println!();
    println!("  Catalog:     {}", config.catalog.path.display());
    println!("  Patterns:    {}", patterns.len());
    println!(
        "  Complexity:  low: {}  medium: {}  high: {}",
        counts.low, counts.medium, counts.high
    );

    let domains = catalog::domains(&patterns);
    if !domains.is_empty() {
        println!();
        println!("  By domain:");
        println!("  {:<24} {:>8}", "DOMAIN", "PATTERNS");
        println!("  {}", "-".repeat(34));
        for domain in &domains {
            let count = patterns
                .iter()
                .filter(|p| p.domain.as_deref() == Some(domain.as_str()))
                .count();
            println!("  {:<24} {:>8}", domain, count);
        }
        let uncategorized = patterns.iter().filter(|p| p.domain.is_none()).count();
        if uncategorized > 0 {
            println!("  {:<24} {:>8}", "(uncategorized)", uncategorized);
        }
    }

    println!();
    Ok(())
}

fn run_analyze(config: &Config, ids: &[String]) -> Result<()> {
    let patterns = catalog::load(&config.catalog.path)?;
    let analysis = resolver::analyze(ids, &patterns);
    let selected = select(&patterns, ids);
    let summary = resolver::summarize(&selected);

    println!("Compatibility Analysis");
    println!("======================");
    println!();

    if analysis.compatible_pairs.is_empty() {
        println!("No direct compatible pairings found, but patterns may still work together.");
    } else {
        println!("Compatible Pairings ({})", analysis.compatible_pairs.len());
        for pairing in &analysis.compatible_pairs {
            println!("  * {}", pairing);
        }
    }
    println!();

    if !analysis.missing_prerequisites.is_empty() {
        println!(
            "Missing Prerequisites ({})",
            analysis.missing_prerequisites.len()
        );
        for prereq in &analysis.missing_prerequisites {
            println!("  ! {}", prereq);
        }
        println!();
    }

    if !analysis.incompatibilities.is_empty() {
        println!("Incompatibilities ({})", analysis.incompatibilities.len());
        for incomp in &analysis.incompatibilities {
            println!("  x {}", incomp);
        }
        println!();
    }

    println!("Stack Summary");
    println!("-------------");
    println!("  patterns:   {}", summary.names.join(", "));
    println!("  components: {}", summary.components.join(", "));
    println!("  effort:     {}", summary.efforts.join(", "));

    Ok(())
}

fn run_export(
    config: &Config,
    ids: &[String],
    format: ExportFormat,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let patterns = catalog::load(&config.catalog.path)?;
    let selected = select(&patterns, ids);

    let content = match format {
        ExportFormat::Json => export::to_stack_json(&selected)?,
        ExportFormat::Html => export::to_stack_html(&selected),
    };

    export::write_output(&content, output)
}

/// Resolve selected ids to pattern references, skipping unknown ids.
fn select<'a>(catalog: &'a [Pattern], ids: &[String]) -> Vec<&'a Pattern> {
    ids.iter()
        .filter_map(|id| catalog::find(catalog, id))
        .collect()
}
