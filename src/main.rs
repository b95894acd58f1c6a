// Copyright 2024 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chart_it::config::HelmConfig;
use chart_it::types::overrides::{collect_overrides, parse_override};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::time::Duration;

shadow_rs::shadow!(build);

#[derive(Parser)]
#[command(name = "chart-it")]
#[command(version = build::PKG_VERSION)]
#[command(about = "Install the WebLogic operator chart for integration tests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the operator chart into its namespace
    Install {
        #[command(flatten)]
        helm: HelmConfig,

        /// Value override in key=value form, may be repeated
        #[arg(long = "set", value_parser = parse_override)]
        set: Vec<(String, Value)>,

        /// Wait for the operator deployment to become available
        #[arg(long)]
        wait_ready: bool,

        /// Seconds to wait for the operator deployment
        #[arg(long, default_value_t = 300)]
        ready_timeout: u64,
    },

    /// Render the operator chart without installing it
    Template {
        #[command(flatten)]
        helm: HelmConfig,

        /// Value override in key=value form, may be repeated
        #[arg(long = "set", value_parser = parse_override)]
        set: Vec<(String, Value)>,

        /// Optional output path. If not set, the output will be written to stdout.
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Uninstall the operator release
    Uninstall {
        #[command(flatten)]
        helm: HelmConfig,

        /// Also delete the operator namespace
        #[arg(long)]
        delete_namespace: bool,
    },

    /// Print the install arguments in YAML
    Args {
        /// Value override in key=value form, may be repeated
        #[arg(long = "set", value_parser = parse_override)]
        set: Vec<(String, Value)>,

        /// Optional output path. If not set, the output will be written to stdout.
        #[arg(short, long)]
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    chart_it::init_tracing();

    match cli.command {
        Commands::Install {
            helm,
            set,
            wait_ready,
            ready_timeout,
        } => {
            let timeout = wait_ready.then(|| Duration::from_secs(ready_timeout));
            chart_it::install(helm, collect_overrides(set), timeout).await?
        }
        Commands::Template { helm, set, file } => {
            chart_it::template(helm, collect_overrides(set), file).await?
        }
        Commands::Uninstall {
            helm,
            delete_namespace,
        } => chart_it::uninstall(helm, delete_namespace).await?,
        Commands::Args { set, file } => {
            chart_it::show_args(collect_overrides(set), file).await?
        }
    }

    Ok(())
}
