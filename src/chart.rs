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

use crate::types::install_args::{InstallArgs, ValueOverrides};
use serde::Deserialize;
use snafu::{ResultExt, Snafu, ensure};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const OPERATOR_CHART: &str = "weblogic-operator";
pub const OPERATOR_RELEASE: &str = "weblogic-operator";
pub const OPERATOR_NAMESPACE: &str = "weblogic-operator";

/// Name of the Deployment the operator chart creates.
pub const OPERATOR_DEPLOYMENT: &str = "weblogic-operator";

const CHART_FILE: &str = "Chart.yaml";

/// Install arguments for the operator chart with the given overrides.
///
/// The chart, release and namespace are fixed; the overrides are passed
/// through untouched.
pub fn new_install_args(value_overrides: ValueOverrides) -> InstallArgs {
    InstallArgs::new(
        OPERATOR_CHART,
        OPERATOR_RELEASE,
        OPERATOR_NAMESPACE,
        value_overrides,
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("chart '{}' not found under {}", name, dir.display()))]
    ChartNotFound { name: String, dir: PathBuf },

    #[snafu(display("failed to read {}: {}", path.display(), source))]
    ReadChart {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to parse {}: {}", path.display(), source))]
    ParseChart {
        source: serde_yaml_ng::Error,
        path: PathBuf,
    },
}

/// Subset of a chart's Chart.yaml.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A chart directory on disk.
#[derive(Clone, Debug)]
pub struct Chart {
    dir: PathBuf,
    metadata: ChartMetadata,
}

impl Chart {
    /// Locate `<charts_dir>/<chart_name>` and read its Chart.yaml.
    pub async fn load(charts_dir: impl AsRef<Path>, chart_name: &str) -> Result<Self, Error> {
        let dir = charts_dir.as_ref().join(chart_name);
        let chart_file = dir.join(CHART_FILE);

        let is_file = tokio::fs::metadata(&chart_file)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        ensure!(
            is_file,
            ChartNotFoundSnafu {
                name: chart_name,
                dir: charts_dir.as_ref(),
            }
        );

        let content = tokio::fs::read_to_string(&chart_file)
            .await
            .context(ReadChartSnafu { path: &chart_file })?;
        let metadata: ChartMetadata =
            serde_yaml_ng::from_str(&content).context(ParseChartSnafu { path: &chart_file })?;

        if metadata.name != chart_name {
            warn!(
                "chart directory {} declares name '{}'",
                dir.display(),
                metadata.name
            );
        }
        debug!(chart = %metadata.name, version = %metadata.version, "loaded chart");

        Ok(Self { dir, metadata })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn metadata(&self) -> &ChartMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_install_args_empty() {
        let args = new_install_args(ValueOverrides::new());
        assert_eq!(args.chart_name(), "weblogic-operator");
        assert_eq!(args.release_name(), "weblogic-operator");
        assert_eq!(args.namespace(), "weblogic-operator");
        assert!(args.value_overrides().is_empty());
    }

    #[test]
    fn test_new_install_args_passes_overrides_through() {
        let mut overrides = ValueOverrides::new();
        overrides.insert("javaLoggingLevel".to_string(), json!("FINE"));
        let expected = overrides.clone();

        let args = new_install_args(overrides);
        assert_eq!(args.chart_name(), OPERATOR_CHART);
        assert_eq!(args.release_name(), OPERATOR_RELEASE);
        assert_eq!(args.namespace(), OPERATOR_NAMESPACE);
        assert_eq!(args.value_overrides(), &expected);
    }

    #[test]
    fn test_new_install_args_deterministic() {
        let overrides = crate::tests::sample_overrides();
        assert_eq!(
            new_install_args(overrides.clone()),
            new_install_args(overrides)
        );
    }

    #[tokio::test]
    async fn test_load_chart() {
        let charts = crate::tests::chart_dir(OPERATOR_CHART);
        let chart = Chart::load(charts.path(), OPERATOR_CHART).await.unwrap();

        assert_eq!(chart.metadata().name, OPERATOR_CHART);
        assert_eq!(chart.metadata().version, "4.0.0");
        assert_eq!(chart.dir(), charts.path().join(OPERATOR_CHART));
    }

    #[tokio::test]
    async fn test_load_missing_chart() {
        let charts = crate::tests::chart_dir(OPERATOR_CHART);
        let err = Chart::load(charts.path(), "missing").await.unwrap_err();
        assert!(matches!(err, Error::ChartNotFound { ref name, .. } if name == "missing"));
    }

    #[tokio::test]
    async fn test_load_chart_file_is_directory() {
        let charts = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(charts.path().join("odd").join(CHART_FILE)).unwrap();

        let err = Chart::load(charts.path(), "odd").await.unwrap_err();
        assert!(matches!(err, Error::ChartNotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_chart() {
        let charts = tempfile::tempdir().unwrap();
        let dir = charts.path().join("broken");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CHART_FILE), "description: no name\n").unwrap();

        let err = Chart::load(charts.path(), "broken").await.unwrap_err();
        assert!(matches!(err, Error::ParseChart { .. }));
    }
}
