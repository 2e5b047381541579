use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use partyspace_core::{
    PanelError, PanelErrorKind, PanelSource, RawVoterRecord, SimulationConfig,
};

/// Survey rows stored as a JSON array of voter records.
#[derive(Debug, Clone)]
pub struct JsonPanelFile {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PanelFileError {
    #[error("failed to read panel {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("panel {path} rejected: {source}")]
    Schema {
        path: String,
        #[source]
        source: PanelError,
    },
}

impl PanelFileError {
    /// Panel error category when the file was read but its rows were not.
    pub const fn kind(&self) -> Option<PanelErrorKind> {
        match self {
            Self::Read { .. } => None,
            Self::Schema { source, .. } => Some(source.kind()),
        }
    }
}

impl JsonPanelFile {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PanelSource for JsonPanelFile {
    type Error = PanelFileError;

    fn load_records(&self) -> Result<Vec<RawVoterRecord>, Self::Error> {
        let path = self.path.display().to_string();
        let text = std::fs::read_to_string(&self.path).map_err(|source| PanelFileError::Read {
            path: path.clone(),
            source,
        })?;
        RawVoterRecord::parse_list(&text)
            .map_err(|source| PanelFileError::Schema { path, source })
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub replications: Option<usize>,
    pub max_iter: Option<usize>,
    pub tolerance: Option<f64>,
}

impl Overrides {
    pub fn apply(self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(replications) = self.replications {
            config.replications = replications;
        }
        if let Some(max_iter) = self.max_iter {
            config.solver.max_iter = max_iter;
        }
        if let Some(tolerance) = self.tolerance {
            config.solver.tolerance = tolerance;
        }
    }
}

/// Read the optional configuration file, then layer overrides on top.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SimulationConfig::from_json(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate().context("invalid simulation configuration")?;
    Ok(config)
}
