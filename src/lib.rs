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

use crate::chart::{OPERATOR_DEPLOYMENT, new_install_args};
use crate::config::HelmConfig;
use crate::context::Context;
use crate::helm::HelmClient;
use crate::types::install_args::ValueOverrides;
use std::pin::Pin;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[macro_use]
mod utils;

pub mod chart;
pub mod config;
pub mod context;
pub mod helm;
pub mod rendered;
pub mod types;

#[cfg(test)]
mod tests;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();
}

/// Install the operator chart, optionally waiting for its deployment.
pub async fn install(
    config: HelmConfig,
    overrides: ValueOverrides,
    ready_timeout: Option<Duration>,
) -> Result<(), Box<dyn std::error::Error>> {
    let args = new_install_args(overrides);
    let context = Context::try_default().await?;

    context.ensure_namespace(args.namespace()).await?;
    HelmClient::new(config).install(&args).await?;

    if let Some(timeout) = ready_timeout {
        context
            .wait_for_deployment(args.namespace(), OPERATOR_DEPLOYMENT, timeout)
            .await?;
    }

    info!("release {} installed", args.release_name());
    Ok(())
}

/// Render the operator chart to a file, or stdout when no file is given.
pub async fn template(
    config: HelmConfig,
    overrides: ValueOverrides,
    file: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let args = new_install_args(overrides);
    let rendered = HelmClient::new(config).template(&args).await?;
    info!("rendered {} manifests", rendered.len());

    write_output(file, rendered.source()).await
}

pub async fn uninstall(
    config: HelmConfig,
    delete_namespace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let args = new_install_args(ValueOverrides::new());
    HelmClient::new(config)
        .uninstall(args.release_name(), args.namespace())
        .await?;

    if delete_namespace {
        Context::try_default()
            .await?
            .delete_namespace(args.namespace())
            .await?;
    }

    Ok(())
}

/// Write the install arguments the given overrides produce, to a file or stdout.
pub async fn show_args(
    overrides: ValueOverrides,
    file: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let args = new_install_args(overrides);
    write_output(file, &serde_yaml_ng::to_string(&args)?).await
}

async fn write_output(
    file: Option<String>,
    content: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer: Pin<Box<dyn AsyncWrite + Send>> = if let Some(file) = file {
        Box::pin(
            tokio::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(file)
                .await?,
        )
    } else {
        Box::pin(tokio::io::stdout())
    };

    writer.write_all(content.as_bytes()).await?;
    writer.flush().await?;

    Ok(())
}
