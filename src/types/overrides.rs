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

//! Helm `--set` style override expressions.

use crate::types::error::{EmptyOverrideKeySnafu, Error, InvalidOverrideSnafu};
use crate::types::install_args::ValueOverrides;
use serde_json::{Map, Value};
use snafu::{OptionExt, ensure};

/// Parse `key=value` the way `helm --set` types values: `{a,b}` is a list,
/// `true`/`false`/`null` and integers without a leading zero are typed,
/// everything else (`4.0`, `1.10`, `0123`) stays a string.
pub fn parse_override(expr: &str) -> Result<(String, Value), Error> {
    let (key, raw) = expr.split_once('=').context(InvalidOverrideSnafu { expr })?;

    ensure!(
        !key.is_empty() && key.split('.').all(|segment| !segment.is_empty()),
        EmptyOverrideKeySnafu { expr }
    );

    let value = match raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        Some("") => Value::Array(Vec::new()),
        Some(items) => Value::Array(items.split(',').map(typed_value).collect()),
        None => typed_value(raw),
    };

    Ok((key.to_string(), value))
}

fn typed_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if raw.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if raw == "0" {
        return Value::from(0);
    }
    if !raw.starts_with('0')
        && let Ok(number) = raw.parse::<i64>()
    {
        return Value::from(number);
    }
    Value::String(raw.to_string())
}

/// Insert `value` under a dotted key, creating nested maps along the way.
/// A non-map value sitting on the path is replaced.
pub fn insert_override(overrides: &mut ValueOverrides, key: &str, value: Value) {
    let mut segments = key.split('.');
    let Some(first) = segments.next() else {
        return;
    };
    let rest: Vec<&str> = segments.collect();

    if rest.is_empty() {
        overrides.insert(first.to_string(), value);
        return;
    }

    let slot = overrides
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    insert_nested(slot, &rest, value);
}

fn insert_nested(slot: &mut Value, path: &[&str], value: Value) {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    let Value::Object(map) = slot else {
        return;
    };

    match path {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, tail @ ..] => {
            let next = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            insert_nested(next, tail, value);
        }
    }
}

/// Fold parsed pairs into an override map; later pairs win.
pub fn collect_overrides<I>(pairs: I) -> ValueOverrides
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut overrides = ValueOverrides::new();
    for (key, value) in pairs {
        insert_override(&mut overrides, &key, value);
    }
    overrides
}
