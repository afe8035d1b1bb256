//! route-model CLI.
//!
//! Loads a route manifest, assembles the route tree and prints either the
//! tree or the resolved route for a named entry.
//!
//! ```text
//! route-model check routes.toml
//! route-model inspect routes.toml --route user --param id=42 --query tab=posts --hash top
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use route_model::config::registry::referenced_components;
use route_model::config::{load_manifest, ComponentRegistry, ObservabilityConfig};
use route_model::observability::init_logging;
use route_model::routing::{
    build_records, build_route, required_params, Action, Location, ParamValue, RandomIds,
    RawParams, RouteTree, SegmentCompiler,
};

#[derive(Parser)]
#[command(name = "route-model")]
#[command(about = "Inspect route manifests and resolved routes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest and print the route tree
    Check {
        manifest: PathBuf,
    },
    /// Resolve a named route and print it as JSON
    Inspect {
        manifest: PathBuf,

        /// Route name to resolve
        #[arg(short, long)]
        route: String,

        /// Route parameter (repeatable)
        #[arg(short, long = "param", value_parser = parse_pair)]
        params: Vec<(String, String)>,

        /// Query parameter (repeatable)
        #[arg(short, long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,

        /// URL fragment
        #[arg(long, default_value = "")]
        hash: String,

        /// Navigation action (push, replace, pop)
        #[arg(short, long, default_value = "push")]
        action: Action,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let manifest_path = match &cli.command {
        Commands::Check { manifest } | Commands::Inspect { manifest, .. } => manifest.clone(),
    };
    let manifest = match load_manifest(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            // No manifest settings to honor; report through the default subscriber.
            init_logging(&ObservabilityConfig::default())?;
            tracing::error!(manifest = %manifest_path.display(), error = %e, "Failed to load manifest");
            return Err(e.into());
        }
    };
    init_logging(&manifest.observability)?;

    tracing::info!(
        manifest = %manifest_path.display(),
        routes = manifest.routes.len(),
        "Manifest loaded"
    );

    let registry = ComponentRegistry::stubbed(referenced_components(&manifest.routes));
    let tree = manifest.assemble(&registry, &RandomIds, Some(&SegmentCompiler))?;

    match cli.command {
        Commands::Check { .. } => print_tree(&tree),
        Commands::Inspect {
            route,
            params,
            query,
            hash,
            action,
            ..
        } => {
            let Some(leaf) = tree.find_by_name(&route) else {
                return Err(format!("no route named `{}`", route).into());
            };

            let raw = RawParams::Named(
                params
                    .into_iter()
                    .map(|(key, value)| (key, Some(ParamValue::Str(value))))
                    .collect(),
            );
            let records = build_records(&tree.ancestry(leaf.id()), &raw);

            let mut location = Location::new("").with_hash(hash).with_action(action);
            if let Some(record) = records.last() {
                let pattern = tree.full_pattern(leaf.id()).unwrap_or(leaf.path());
                let missing: Vec<_> = required_params(pattern)
                    .into_iter()
                    .filter(|key| !record.params().contains_key(key))
                    .collect();
                if !missing.is_empty() {
                    tracing::warn!(
                        route = %route,
                        missing = ?missing,
                        "Required params not given, path keeps their placeholders"
                    );
                }
                location.path = leaf.generator().generate(record.params());
            }
            for (key, value) in query {
                location.query.insert(key, Value::String(value));
            }

            let resolved = build_route(&location, records);
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
    }

    Ok(())
}

fn print_tree(tree: &RouteTree) {
    for (depth, config) in tree.iter() {
        let pattern = tree.full_pattern(config.id()).unwrap_or(config.path());
        let mut flags = Vec::new();
        if config.is_async() {
            flags.push("async");
        }
        if config.redirect().is_some() {
            flags.push("redirect");
        }
        if config.component().is_none() {
            flags.push("no-component");
        }
        println!(
            "{:indent$}{} {}{}",
            "",
            pattern,
            config.name().map(|n| format!("({})", n)).unwrap_or_default(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            },
            indent = depth * 2
        );
    }
}
