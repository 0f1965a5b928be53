//! `network` command handler.

use std::path::Path;

use creatormap_core::{load_candidates, AppConfig};
use creatormap_network::{build_graph, write_graphml_file, MetricsConfig, NetworkConfig, NetworkPayload};

/// Command-line settings that take precedence over the environment.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Overrides {
    pub renormalize: bool,
    pub edge_threshold: Option<f64>,
}

/// Network settings from config with command-line overrides applied.
///
/// # Errors
///
/// Returns an error if the threshold override is outside `[0, 1]`.
pub(crate) fn network_config(config: &AppConfig, overrides: Overrides) -> anyhow::Result<NetworkConfig> {
    let mut network = NetworkConfig::from(config);
    network.renormalize |= overrides.renormalize;

    if let Some(threshold) = overrides.edge_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("--edge-threshold must be within [0, 1], got {threshold}");
        }
        network.edge_threshold = threshold;
    }

    Ok(network)
}

/// Build the similarity network, print it, and optionally export GraphML.
///
/// # Errors
///
/// Returns an error if the candidates cannot be loaded, the overrides are
/// invalid, or the output cannot be written.
pub(crate) fn run_network(
    config: &AppConfig,
    candidates_path: &Path,
    overrides: Overrides,
    graphml: Option<&Path>,
) -> anyhow::Result<()> {
    let candidates = load_candidates(candidates_path)?;
    let network = network_config(config, overrides)?;

    let graph = build_graph(&candidates, &network);
    let payload = NetworkPayload::from_graph(&graph, &MetricsConfig::from(config));

    if let Some(path) = graphml {
        write_graphml_file(&graph, path)?;
    }

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
