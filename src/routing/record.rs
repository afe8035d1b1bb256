//! Parameter-resolved records.
//!
//! # Data Flow
//! ```text
//! RouteConfig + RawParams
//!     → select extraction strategy (once per call)
//!     → walk param_keys in declaration order
//!     → coerce each present value
//!     → Record (config snapshot + params)
//! ```
//!
//! # Design Decisions
//! - Missing values are omitted, never filled with a placeholder
//! - Keys the config does not declare are ignored
//! - The config is never mutated

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::routing::builder::RouteConfig;
use crate::routing::coerce::coerce_param;
use crate::routing::identity::RouteId;
use crate::routing::types::{Component, Meta, ParamValue, Params, Props, Redirect};

/// Raw parameter data produced by a match.
#[derive(Debug, Clone, PartialEq)]
pub enum RawParams {
    /// Regex-style captures; index 0 is the whole match.
    Positional(Vec<Option<String>>),
    /// Values keyed by parameter name; `None` stands for an explicit null.
    Named(BTreeMap<String, Option<ParamValue>>),
}

impl RawParams {
    /// Named params from string pairs.
    pub fn named<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        RawParams::Named(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), Some(value.into())))
                .collect(),
        )
    }

    /// Positional params from a full capture list (whole match first).
    pub fn positional<S: Into<String>>(captures: impl IntoIterator<Item = S>) -> Self {
        RawParams::Positional(captures.into_iter().map(|c| Some(c.into())).collect())
    }
}

/// Plain-data part of a record. Deep-copied by the cloner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordData {
    pub id: RouteId,
    pub name: Option<String>,
    pub path: String,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub params: Params,
}

/// Non-data part of a record. Shared by reference by the cloner.
#[derive(Debug, PartialEq, Serialize)]
pub struct Attachments {
    pub redirect: Option<Redirect>,
    pub component: Component,
    pub props: Props,
    pub meta: Arc<Meta>,
}

impl Attachments {
    /// Re-attach every field by reference. Callback identity is preserved.
    pub(crate) fn share(&self) -> Self {
        Self {
            redirect: self.redirect.clone(),
            component: self.component.clone(),
            props: self.props.clone(),
            meta: Arc::clone(&self.meta),
        }
    }
}

/// One matched config resolved for a single navigation.
#[derive(Debug, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    pub(crate) data: RecordData,
    #[serde(flatten)]
    pub(crate) attachments: Attachments,
}

impl Record {
    pub fn id(&self) -> RouteId {
        self.data.id
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.data.path
    }

    pub fn is_async(&self) -> bool {
        self.data.is_async
    }

    pub fn params(&self) -> &Params {
        &self.data.params
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.attachments.redirect.as_ref()
    }

    pub fn component(&self) -> &Component {
        &self.attachments.component
    }

    pub fn props(&self) -> &Props {
        &self.attachments.props
    }

    pub fn meta(&self) -> &Arc<Meta> {
        &self.attachments.meta
    }
}

type Extractor<'a> = Box<dyn Fn(usize, &str) -> Option<ParamValue> + 'a>;

fn select_strategy(raw: &RawParams) -> Extractor<'_> {
    match raw {
        RawParams::Positional(captures) => Box::new(move |index: usize, _key: &str| {
            captures
                .get(index + 1)
                .and_then(|capture| capture.clone())
                .map(ParamValue::Str)
        }),
        RawParams::Named(values) => {
            Box::new(move |_index: usize, key: &str| values.get(key).and_then(|value| value.clone()))
        }
    }
}

/// Resolve `raw` against the config's declared parameter keys.
pub fn build_record(config: &RouteConfig, raw: &RawParams) -> Record {
    let extract = select_strategy(raw);
    let params: Params = config
        .param_keys
        .iter()
        .enumerate()
        .filter_map(|(index, key)| {
            extract(index, key.as_str()).map(|value| (key.clone(), coerce_param(value)))
        })
        .collect();

    tracing::debug!(
        id = %config.id,
        path = %config.path,
        declared = config.param_keys.len(),
        resolved = params.len(),
        "Route record built"
    );

    Record {
        data: RecordData {
            id: config.id,
            name: config.name.clone(),
            path: config.path.clone(),
            is_async: config.is_async,
            params,
        },
        attachments: Attachments {
            redirect: config.redirect.clone(),
            component: config.component.clone(),
            props: config.props.clone(),
            meta: Arc::clone(&config.meta),
        },
    }
}

/// Resolve every config of a matched stack against the same raw params.
pub fn build_records(stack: &[Arc<RouteConfig>], raw: &RawParams) -> Vec<Record> {
    stack.iter().map(|config| build_record(config, raw)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::builder::{build_config, CompiledPattern};
    use crate::routing::matcher::NeverMatcher;
    use crate::routing::prefab::{Declared, RouteConfigPrefab};
    use crate::routing::types::{ComponentHandle, Generator};
    use serde_json::json;

    fn user_config() -> RouteConfig {
        let mut config = build_config(Some(
            &RouteConfigPrefab::new("/u/:id/:slug")
                .with_name("user")
                .with_meta(json!({"section": "people"}))
                .with_component(Declared::factory(|| Arc::new("user") as ComponentHandle)),
        ))
        .unwrap();
        config.install_pattern(CompiledPattern {
            param_keys: vec!["id".into(), "slug".into()],
            matcher: Arc::new(NeverMatcher),
            generator: Generator::empty(),
        });
        config
    }

    #[test]
    fn test_positional_params() {
        let config = user_config();
        let record = build_record(&config, &RawParams::positional(["/u/42/abc", "42", "abc"]));

        assert_eq!(record.params().get("id"), Some(&ParamValue::Int(42)));
        assert_eq!(record.params().get("slug"), Some(&ParamValue::Str("abc".into())));
        assert_eq!(record.params().len(), 2);
    }

    #[test]
    fn test_named_params_omit_missing() {
        let config = user_config();
        let record = build_record(&config, &RawParams::named([("id", "42"), ("other", "x")]));

        assert_eq!(record.params().len(), 1);
        assert_eq!(record.params().get("id"), Some(&ParamValue::Int(42)));
        assert!(record.params().get("other").is_none());
    }

    #[test]
    fn test_named_null_omitted() {
        let config = user_config();
        let mut values = BTreeMap::new();
        values.insert("id".to_string(), Some(ParamValue::Float(1.5)));
        values.insert("slug".to_string(), None);
        let record = build_record(&config, &RawParams::Named(values));

        assert_eq!(record.params().get("id"), Some(&ParamValue::Float(1.5)));
        assert!(!record.params().contains_key("slug"));
    }

    #[test]
    fn test_positional_out_of_range_omitted() {
        let config = user_config();
        let record = build_record(&config, &RawParams::positional(["/u/7", "7"]));
        assert_eq!(record.params().len(), 1);
        assert_eq!(record.params().get("id"), Some(&ParamValue::Int(7)));

        let unmatched_group = RawParams::Positional(vec![Some("/u".into()), None, Some("x".into())]);
        let record = build_record(&config, &unmatched_group);
        assert!(!record.params().contains_key("id"));
        assert_eq!(record.params().get("slug"), Some(&ParamValue::Str("x".into())));
    }

    #[test]
    fn test_record_snapshots_config() {
        let config = user_config();
        let record = build_record(&config, &RawParams::named(Vec::<(String, String)>::new()));

        assert_eq!(record.id(), config.id());
        assert_eq!(record.name(), Some("user"));
        assert_eq!(record.path(), "/u/:id/:slug");
        assert!(Arc::ptr_eq(record.meta(), config.meta()));
        assert_eq!(record.component(), config.component());
        assert!(record.params().is_empty());
    }

    #[test]
    fn test_record_serializes_plain_view() {
        let config = user_config();
        let record = build_record(&config, &RawParams::positional(["/u/1/a", "1", "a"]));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["name"], json!("user"));
        assert_eq!(value["async"], json!(false));
        assert_eq!(value["params"], json!({"id": 1, "slug": "a"}));
        assert_eq!(value["component"], json!("[factory]"));
        assert_eq!(value["meta"], json!({"section": "people"}));
        assert_eq!(value["redirect"], json!(null));
    }
}
