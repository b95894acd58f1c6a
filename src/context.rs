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

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use kube::api::{Api, DeleteParams, Patch, PatchParams};
use kube::runtime::wait::{self, await_condition};
use snafu::futures::TryFutureExt;
use snafu::{OptionExt, ResultExt, Snafu};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

pub const FIELD_MANAGER: &str = "chart-it";
const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Kubernetes API error: {}", source))]
    Kube { source: kube::Error },

    #[snafu(display("wait for deployment error: {}", source))]
    Wait { source: wait::Error },

    #[snafu(display(
        "deployment '{}' in namespace '{}' not available after {:?}",
        name,
        namespace,
        timeout
    ))]
    WaitTimeout {
        name: String,
        namespace: String,
        timeout: Duration,
    },
}

/// Cluster access for the steps around a chart install.
#[derive(Clone)]
pub struct Context {
    pub(crate) client: kube::Client,
}

impl Context {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    pub async fn try_default() -> Result<Self, Error> {
        let client = kube::Client::try_default().context(KubeSnafu).await?;
        Ok(Self::new(client))
    }

    /// Create the namespace if needed, or take ownership of the existing one.
    pub async fn ensure_namespace(&self, name: &str) -> Result<Namespace, Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let namespace = namespace_object(name);

        info!("ensuring namespace {}", name);
        api.patch(
            name,
            &PatchParams::apply(FIELD_MANAGER).force(),
            &Patch::Apply(&namespace),
        )
        .context(KubeSnafu)
        .await
    }

    /// Delete the namespace; a namespace that is already gone is not an error.
    pub async fn delete_namespace(&self, name: &str) -> Result<(), Error> {
        let api: Api<Namespace> = Api::all(self.client.clone());

        if api.get_opt(name).context(KubeSnafu).await?.is_none() {
            debug!("namespace {} does not exist, nothing to delete", name);
            return Ok(());
        }

        info!("deleting namespace {}", name);
        api.delete(name, &DeleteParams::default())
            .context(KubeSnafu)
            .await?;
        Ok(())
    }

    /// Block until the deployment reports all desired replicas available.
    pub async fn wait_for_deployment(
        &self,
        namespace: &str,
        name: &str,
        timeout: Duration,
    ) -> Result<(), Error> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);

        info!(
            "waiting up to {:?} for deployment {}/{}",
            timeout, namespace, name
        );
        within(
            timeout,
            namespace,
            name,
            await_condition(api, name, deployment_available),
        )
        .await?;

        info!("deployment {}/{} is available", namespace, name);
        Ok(())
    }
}

async fn within<T>(
    timeout: Duration,
    namespace: &str,
    name: &str,
    condition: impl Future<Output = Result<T, wait::Error>>,
) -> Result<T, Error> {
    tokio::time::timeout(timeout, condition)
        .await
        .ok()
        .context(WaitTimeoutSnafu {
            name,
            namespace,
            timeout,
        })?
        .context(WaitSnafu)
}

fn namespace_object(name: &str) -> Namespace {
    Namespace {
        metadata: metav1::ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(BTreeMap::from([(
                MANAGED_BY_LABEL.to_string(),
                FIELD_MANAGER.to_string(),
            )])),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A missing deployment is never available; replicas default to 1.
pub fn deployment_available(deployment: Option<&Deployment>) -> bool {
    let Some(deployment) = deployment else {
        return false;
    };

    let desired = deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.replicas)
        .unwrap_or(1);
    let available = deployment
        .status
        .as_ref()
        .and_then(|status| status.available_replicas)
        .unwrap_or(0);

    available >= desired
}
