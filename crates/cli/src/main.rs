use anyhow::Result;
use clap::{Parser, Subcommand};
use opreport_drilldown::commands::{
    drilldown_command, dump_command, list_modules_command, DrilldownOptions,
};
use opreport_drilldown::init_tracing;

/// Binary -> symbol -> line drilldown over oprofile `opreport --xml` reports.
///
/// This CLI is a thin wrapper around `opreport-core` (exposed in code as
/// `opreport_core`). Parsing and model building live in the library; this
/// binary only locates the report and renders the result.
#[derive(Parser, Debug)]
#[command(
    name = "opreport-drilldown",
    version,
    about = "Drill into oprofile opreport XML reports",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every binary/module in the report with its sample share.
    Modules {
        /// Path to the XML produced by `opreport --xml --details`.
        #[arg(long)]
        report: String,

        /// Optional parse-options file (YAML, or JSON by `.json` extension).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the binary -> symbol (-> line) tree, hottest first.
    Drilldown {
        /// Path to the XML produced by `opreport --xml --details`.
        #[arg(long)]
        report: String,

        /// Optional parse-options file (YAML, or JSON by `.json` extension).
        #[arg(long)]
        config: Option<String>,

        /// Restrict output to one binary/module (exact name).
        #[arg(long)]
        module: Option<String>,

        /// Hide symbols below this percentage of their module's samples.
        #[arg(long)]
        threshold: Option<f64>,

        /// Include per-line sample counts under each symbol.
        #[arg(long, default_value_t = false)]
        lines: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the parsed model as a JSON snapshot.
    Dump {
        /// Path to the XML produced by `opreport --xml --details`.
        #[arg(long)]
        report: String,

        /// Optional parse-options file (YAML, or JSON by `.json` extension).
        #[arg(long)]
        config: Option<String>,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Modules { report, config, json } => {
            list_modules_command(&report, config.as_deref(), json)?
        }
        Command::Drilldown { report, config, module, threshold, lines, json } => {
            let options = DrilldownOptions { module, threshold, lines };
            drilldown_command(&report, config.as_deref(), &options, json)?
        }
        Command::Dump { report, config, out } => {
            dump_command(&report, config.as_deref(), out.as_deref())?
        }
    }

    Ok(())
}
