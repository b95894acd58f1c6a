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

use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_HELM_BIN: &str = "helm";
pub const DEFAULT_CHARTS_DIR: &str = "kubernetes/charts";
pub const DEFAULT_TIMEOUT: &str = "5m";

/// How to reach the Helm binary and the charts it installs.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct HelmConfig {
    /// Helm binary to invoke
    #[arg(long, env = "HELM_BIN", default_value = DEFAULT_HELM_BIN)]
    pub helm: PathBuf,

    /// Directory holding one sub-directory per chart
    #[arg(long, env = "CHARTS_DIR", default_value = DEFAULT_CHARTS_DIR)]
    pub charts_dir: PathBuf,

    /// Helm duration for --timeout, e.g. 90s or 5m
    #[arg(long, default_value = DEFAULT_TIMEOUT)]
    pub timeout: String,

    /// Pass --wait to helm install
    #[arg(long)]
    pub wait: bool,
}

impl Default for HelmConfig {
    fn default() -> Self {
        HelmConfig {
            helm: PathBuf::from(DEFAULT_HELM_BIN),
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            timeout: DEFAULT_TIMEOUT.to_string(),
            wait: false,
        }
    }
}
