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

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to parse rendered manifest #{}: {}", index, source))]
    ParseManifest {
        source: serde_yaml_ng::Error,
        index: usize,
    },

    #[snafu(display("rendered {} '{}' does not match its schema: {}", kind, name, source))]
    Decode {
        source: serde_json::Error,
        kind: String,
        name: String,
    },
}

/// Manifests produced by rendering a chart.
#[derive(Clone, Debug, Default)]
pub struct RenderedChart {
    source: String,
    documents: Vec<Value>,
}

impl RenderedChart {
    /// Split multi-document YAML, dropping empty documents.
    pub fn parse(text: impl Into<String>) -> Result<Self, Error> {
        let source = text.into();
        let mut documents = Vec::new();

        for (index, doc) in serde_yaml_ng::Deserializer::from_str(&source).enumerate() {
            let value = Value::deserialize(doc).context(ParseManifestSnafu { index })?;
            if !value.is_null() {
                documents.push(value);
            }
        }

        Ok(Self { source, documents })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.documents
            .iter()
            .filter(move |doc| doc.get("kind").and_then(Value::as_str) == Some(kind))
    }

    pub fn find(&self, kind: &str, name: &str) -> Option<&Value> {
        self.documents.iter().find(|doc| {
            doc.get("kind").and_then(Value::as_str) == Some(kind)
                && doc.pointer("/metadata/name").and_then(Value::as_str) == Some(name)
        })
    }

    /// Typed lookup of a rendered object by name.
    pub fn get<K>(&self, name: &str) -> Result<Option<K>, Error>
    where
        K: k8s_openapi::Resource + DeserializeOwned,
    {
        let Some(doc) = self.find(K::KIND, name) else {
            return Ok(None);
        };

        serde_json::from_value(doc.clone())
            .map(Some)
            .context(DecodeSnafu {
                kind: K::KIND,
                name,
            })
    }
}
