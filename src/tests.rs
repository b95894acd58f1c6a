//  Copyright 2025 RustFS Team
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//      http:www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use crate::chart::new_install_args;
use crate::types::install_args::{InstallArgs, ValueOverrides};
use serde_json::json;
use tempfile::TempDir;

// Overrides shared by submodule tests via crate::tests
pub fn sample_overrides() -> ValueOverrides {
    let mut overrides = ValueOverrides::new();
    overrides.insert("javaLoggingLevel".to_string(), json!("FINE"));
    overrides.insert("domainNamespaces".to_string(), json!(["default"]));
    overrides.insert("remoteDebugNodePortEnabled".to_string(), json!(false));
    overrides
}

// Creates a charts root holding a single chart with a minimal Chart.yaml
pub fn chart_dir(name: &str) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join(name);
    std::fs::create_dir_all(dir.join("templates")).unwrap();
    std::fs::write(
        dir.join("Chart.yaml"),
        format!(
            "apiVersion: v2\nname: {name}\nversion: 4.0.0\nappVersion: \"4.0\"\ndescription: test chart\n"
        ),
    )
    .unwrap();
    root
}

// Output shaped like `helm template` for the operator chart
pub const RENDERED_OPERATOR: &str = r#"---
# Source: weblogic-operator/templates/main.yaml
apiVersion: v1
kind: ServiceAccount
metadata:
  name: weblogic-operator-sa
  namespace: weblogic-operator
---
# Source: weblogic-operator/templates/main.yaml
apiVersion: v1
kind: ConfigMap
metadata:
  name: weblogic-operator-cm
  namespace: weblogic-operator
data:
  javaLoggingLevel: FINE
  domainNamespaces: default
---
---
# Source: weblogic-operator/templates/main.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: weblogic-operator
  namespace: weblogic-operator
spec:
  replicas: 1
  selector:
    matchLabels:
      app: weblogic-operator
  template:
    metadata:
      labels:
        app: weblogic-operator
    spec:
      containers:
        - name: weblogic-operator
          image: weblogic-kubernetes-operator:4.0
"#;

#[tokio::test]
async fn test_show_args_writes_install_args_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("args.yaml");

    crate::show_args(sample_overrides(), Some(path.display().to_string()))
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let args: InstallArgs = serde_yaml_ng::from_str(&content).unwrap();
    assert_eq!(args, new_install_args(sample_overrides()));
}

#[tokio::test]
async fn test_write_output_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.yaml");
    std::fs::write(&path, "x".repeat(4096)).unwrap();

    crate::write_output(Some(path.display().to_string()), "kind: ConfigMap\n")
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "kind: ConfigMap\n");
}

#[tokio::test]
async fn test_write_output_defaults_to_stdout() {
    crate::write_output(None, "").await.unwrap();
}
