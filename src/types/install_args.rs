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

use crate::types::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values handed to the chart at install time, keyed by top-level value name.
pub type ValueOverrides = BTreeMap<String, serde_json::Value>;

/// Everything needed to install one release of a chart.
///
/// Built once per test and never mutated afterwards.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallArgs {
    chart_name: String,
    release_name: String,
    namespace: String,
    #[serde(default)]
    value_overrides: ValueOverrides,
}

impl InstallArgs {
    pub fn new(
        chart_name: impl Into<String>,
        release_name: impl Into<String>,
        namespace: impl Into<String>,
        value_overrides: ValueOverrides,
    ) -> Self {
        Self {
            chart_name: chart_name.into(),
            release_name: release_name.into(),
            namespace: namespace.into(),
            value_overrides,
        }
    }

    pub fn chart_name(&self) -> &str {
        &self.chart_name
    }

    pub fn release_name(&self) -> &str {
        &self.release_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value_overrides(&self) -> &ValueOverrides {
        &self.value_overrides
    }

    /// Render the overrides as a Helm values document.
    pub fn values_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml_ng::to_string(&self.value_overrides)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_copied_verbatim() {
        let mut overrides = ValueOverrides::new();
        overrides.insert("javaLoggingLevel".to_string(), json!("FINE"));

        let args = InstallArgs::new("chart", "release", "ns", overrides.clone());
        assert_eq!(args.chart_name(), "chart");
        assert_eq!(args.release_name(), "release");
        assert_eq!(args.namespace(), "ns");
        assert_eq!(args.value_overrides(), &overrides);
    }

    #[test]
    fn test_values_yaml_nested() {
        let mut overrides = ValueOverrides::new();
        overrides.insert(
            "domainNamespaces".to_string(),
            json!(["default", "domain1"]),
        );
        overrides.insert("elkIntegrationEnabled".to_string(), json!(true));

        let args = InstallArgs::new("c", "r", "n", overrides);
        let yaml = args.values_yaml().unwrap();
        let back: ValueOverrides = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(&back, args.value_overrides());
        assert!(yaml.contains("elkIntegrationEnabled: true"));
    }

    #[test]
    fn test_empty_overrides_render_empty_mapping() {
        let args = InstallArgs::new("c", "r", "n", ValueOverrides::new());
        assert_eq!(args.values_yaml().unwrap().trim(), "{}");
    }
}
