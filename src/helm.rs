// Copyright 2025 RustFS Team
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

use crate::chart::{self, Chart};
use crate::config::HelmConfig;
use crate::rendered::{self, RenderedChart};
use crate::types;
use crate::types::install_args::InstallArgs;
use snafu::{ResultExt, Snafu, ensure};
use std::io::Write;
use std::path::Path;
use strum::Display;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum HelmVerb {
    Install,
    Template,
    Uninstall,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(transparent)]
    Chart { source: chart::Error },

    #[snafu(transparent)]
    Types { source: types::error::Error },

    #[snafu(transparent)]
    Rendered { source: rendered::Error },

    #[snafu(display("failed to write values file: {}", source))]
    ValuesFile { source: std::io::Error },

    #[snafu(display("failed to run {} {:?}: {}", command, args, source))]
    Spawn {
        source: std::io::Error,
        command: String,
        args: Vec<String>,
    },

    #[snafu(display("helm {} failed, args: {:?}, stderr: {}", verb, args, stderr))]
    CommandFailed {
        verb: HelmVerb,
        args: Vec<String>,
        stderr: String,
    },

    #[snafu(display("helm output is not valid UTF-8: {}", source))]
    Utf8 { source: std::string::FromUtf8Error },
}

impl Error {
    /// Standard error of a failed helm command, if that is what this is.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Error::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

pub fn install_command_args(
    config: &HelmConfig,
    args: &InstallArgs,
    chart_dir: &Path,
    values_file: &Path,
) -> Vec<String> {
    let mut command = vec_to_strings![
        HelmVerb::Install,
        args.release_name(),
        chart_dir.display(),
        "--namespace",
        args.namespace(),
        "--values",
        values_file.display(),
        "--timeout",
        config.timeout
    ];
    if config.wait {
        command.push("--wait".to_string());
    }
    command
}

pub fn template_command_args(
    args: &InstallArgs,
    chart_dir: &Path,
    values_file: &Path,
) -> Vec<String> {
    vec_to_strings![
        HelmVerb::Template,
        args.release_name(),
        chart_dir.display(),
        "--namespace",
        args.namespace(),
        "--values",
        values_file.display()
    ]
}

pub fn uninstall_command_args(release: &str, namespace: &str) -> Vec<String> {
    vec_to_strings![HelmVerb::Uninstall, release, "--namespace", namespace]
}

/// Runs the helm binary against charts found under the configured charts directory.
#[derive(Clone, Debug)]
pub struct HelmClient {
    config: HelmConfig,
}

impl HelmClient {
    pub fn new(config: HelmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HelmConfig {
        &self.config
    }

    /// Runs `helm install <release> <chart_dir> -n <namespace> --values <file>`.
    pub async fn install(&self, args: &InstallArgs) -> Result<(), Error> {
        let chart = Chart::load(&self.config.charts_dir, args.chart_name()).await?;
        let values = write_values(args)?;

        info!(
            "installing chart {} {} as release {} in namespace {}",
            chart.metadata().name,
            chart.metadata().version,
            args.release_name(),
            args.namespace()
        );

        let command = install_command_args(&self.config, args, chart.dir(), values.path());
        self.run(HelmVerb::Install, command).await?;
        Ok(())
    }

    /// Runs `helm template` and parses the manifests it prints.
    pub async fn template(&self, args: &InstallArgs) -> Result<RenderedChart, Error> {
        let chart = Chart::load(&self.config.charts_dir, args.chart_name()).await?;
        let values = write_values(args)?;

        let command = template_command_args(args, chart.dir(), values.path());
        let stdout = self.run(HelmVerb::Template, command).await?;
        let text = String::from_utf8(stdout).context(Utf8Snafu)?;

        Ok(RenderedChart::parse(text)?)
    }

    /// Runs `helm uninstall <release> -n <namespace>`.
    pub async fn uninstall(&self, release: &str, namespace: &str) -> Result<(), Error> {
        info!("uninstalling release {} from namespace {}", release, namespace);
        self.run(HelmVerb::Uninstall, uninstall_command_args(release, namespace))
            .await?;
        Ok(())
    }

    async fn run(&self, verb: HelmVerb, args: Vec<String>) -> Result<Vec<u8>, Error> {
        let command = self.config.helm.display().to_string();
        debug!(%command, ?args, "helm {} command", verb);

        let output = Command::new(&self.config.helm)
            .args(&args)
            .output()
            .await
            .context(SpawnSnafu {
                command: command.clone(),
                args: args.clone(),
            })?;

        ensure!(
            output.status.success(),
            CommandFailedSnafu {
                verb,
                args,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
        );

        Ok(output.stdout)
    }
}

// The file is removed when the returned handle drops.
fn write_values(args: &InstallArgs) -> Result<NamedTempFile, Error> {
    let yaml = args.values_yaml()?;

    let mut file = tempfile::Builder::new()
        .prefix("values-")
        .suffix(".yaml")
        .tempfile()
        .context(ValuesFileSnafu)?;
    file.write_all(yaml.as_bytes()).context(ValuesFileSnafu)?;
    file.flush().context(ValuesFileSnafu)?;

    Ok(file)
}
