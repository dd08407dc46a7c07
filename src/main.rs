use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;

use closfab::fabric::{FabricParameters, FabricSummary};

/// Output format for the fabric summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Derive and validate the dimensions of a two-tier Clos fabric
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of spines. Cannot be used with --leaves, the leaf count is derived. Example: --spines=4
    #[arg(long)]
    spines: Option<u32>,

    /// Number of leaves. Cannot be used with --spines, the spine count is derived. Example: --leaves=16
    #[arg(long)]
    leaves: Option<u32>,

    /// Speed of network ports in spine (1,10,40,100) Example: --spine-speed=40
    #[arg(long)]
    spine_speed: u32,

    /// Number of network ports in spine Example: --spine-ports=16
    #[arg(long)]
    spine_ports: u32,

    /// Speed of server-facing ports on the leaf (1,10,40,100) Example: --leaf-down-speed=10
    #[arg(long)]
    leaf_down_speed: u32,

    /// Number of server-facing ports Example: --leaf-down-ports=48
    #[arg(long)]
    leaf_down_ports: u32,

    /// Speed of spine-facing ports on the leaf (1,10,40,100) Example: --leaf-up-speed=40
    #[arg(long)]
    leaf_up_speed: u32,

    /// Number of spine-facing ports Example: --leaf-up-ports=4
    #[arg(long)]
    leaf_up_ports: u32,

    /// Base prefix and mask used to assign L3 addresses. Example: --base-prefix=192.168/16
    #[arg(short = 'b', long)]
    base_prefix: String,

    /// Network mask used for p2p networks. Value must be between 24 and 31
    #[arg(short = 'p', long)]
    p2p_mask: u8,

    /// Where to begin assigning autonomous system numbers. Example: --autonomous-system=64512
    #[arg(short = 'a', long)]
    autonomous_system: u32,

    /// How to print the fabric summary
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl Args {
    fn to_parameters(&self) -> FabricParameters {
        FabricParameters {
            spine_count: self.spines,
            leaf_count: self.leaves,
            spine_speed: self.spine_speed,
            spine_ports: self.spine_ports,
            leaf_down_speed: self.leaf_down_speed,
            leaf_down_ports: self.leaf_down_ports,
            leaf_up_speed: self.leaf_up_speed,
            leaf_up_ports: self.leaf_up_ports,
            base_prefix: self.base_prefix.clone(),
            p2p_mask: self.p2p_mask,
            asn: self.autonomous_system,
            derived: None,
        }
    }
}

fn render_summary(summary: &FabricSummary, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => summary.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(summary).wrap_err("Failed to render summary as JSON")?,
        OutputFormat::Yaml => serde_yaml::to_string(summary).wrap_err("Failed to render summary as YAML")?,
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Validating fabric parameters");
    let fabric = args
        .to_parameters()
        .validate()
        .wrap_err("Fabric parameters rejected")?;

    let summary = FabricSummary::from_validated(&fabric)?;
    println!("{}", render_summary(&summary, args.format)?);

    info!("Fabric validation completed successfully");
    Ok(())
}
