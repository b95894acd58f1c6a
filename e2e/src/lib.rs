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

//! Cluster tests for the operator chart. They need `helm`, a reachable
//! cluster and `CHARTS_DIR` pointing at the chart sources, so every test
//! is ignored by default.

use chart_it::config::HelmConfig;
use std::path::PathBuf;

pub fn helm_config() -> HelmConfig {
    let mut config = HelmConfig::default();
    if let Ok(helm) = std::env::var("HELM_BIN") {
        config.helm = PathBuf::from(helm);
    }
    if let Ok(dir) = std::env::var("CHARTS_DIR") {
        config.charts_dir = PathBuf::from(dir);
    }
    config
}
