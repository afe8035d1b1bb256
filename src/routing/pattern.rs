//! Pattern compiler seam.
//!
//! The production URL matcher lives outside this crate and plugs in through
//! [`PatternCompiler`]. [`SegmentCompiler`] is a small reference compiler for
//! `:name` and `:name?` segments, used by the CLI and in tests.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::routing::builder::CompiledPattern;
use crate::routing::matcher::{NeverMatcher, PathMatcher, RegexMatcher};
use crate::routing::types::Generator;

/// Turns a full route pattern into matcher artifacts.
pub trait PatternCompiler: Send + Sync {
    fn compile(&self, pattern: &str) -> CompiledPattern;
}

static PARAM_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([A-Za-z_][A-Za-z0-9_]*)(\?)?$").expect("param segment grammar"));

/// True for a `:name` or `:name?` segment.
pub(crate) fn is_param_segment(segment: &str) -> bool {
    PARAM_SEGMENT.is_match(segment)
}

/// Names of the non-optional `:name` segments of a pattern, in order.
pub fn required_params(pattern: &str) -> Vec<String> {
    pattern
        .split('/')
        .filter_map(|segment| PARAM_SEGMENT.captures(segment))
        .filter(|caps| caps.get(2).is_none())
        .map(|caps| caps[1].to_string())
        .collect()
}

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Param { name: String, optional: bool },
}

/// Compiles `/users/:id/:tab?` style patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentCompiler;

impl PatternCompiler for SegmentCompiler {
    fn compile(&self, pattern: &str) -> CompiledPattern {
        let parts: Vec<Part> = pattern
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match PARAM_SEGMENT.captures(segment) {
                Some(caps) => Part::Param {
                    name: caps[1].to_string(),
                    optional: caps.get(2).is_some(),
                },
                None => Part::Literal(segment.to_string()),
            })
            .collect();

        let mut source = String::from("^");
        let mut param_keys = Vec::new();
        for part in &parts {
            match part {
                Part::Literal(text) => {
                    source.push('/');
                    source.push_str(&regex::escape(text));
                }
                Part::Param { name, optional } => {
                    param_keys.push(name.clone());
                    source.push_str(if *optional { "(?:/([^/]+))?" } else { "/([^/]+)" });
                }
            }
        }
        source.push_str("/?$");

        let matcher: Arc<dyn PathMatcher> = match RegexMatcher::new(&source) {
            Ok(matcher) => Arc::new(matcher),
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "Pattern did not compile, route will never match");
                Arc::new(NeverMatcher)
            }
        };

        tracing::trace!(pattern = %pattern, regex = %source, keys = ?param_keys, "Pattern compiled");

        CompiledPattern {
            param_keys,
            matcher,
            generator: Generator::new(move |params| {
                let mut path = String::new();
                for part in &parts {
                    match part {
                        Part::Literal(text) => {
                            path.push('/');
                            path.push_str(text);
                        }
                        Part::Param { name, optional } => match params.get(name) {
                            Some(value) => {
                                path.push('/');
                                path.push_str(&value.to_string());
                            }
                            None if *optional => {}
                            None => {
                                path.push_str("/:");
                                path.push_str(name);
                            }
                        },
                    }
                }
                if path.is_empty() {
                    path.push('/');
                }
                path
            }),
        }
    }
}
