use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Deployment configuration.
///
/// Passed by reference into the validator, dispatcher, and status client;
/// never held as ambient global state.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Deployment instance name, sent with every status query.
    pub instance: String,
    /// Cloud project this deployment runs in. Empty for pure
    /// shared-filesystem deployments.
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub zone: String,
    /// True when the client and all workers see the same filesystem paths.
    pub shared_filesystem: bool,
    pub output_dir: PathBuf,
    /// Remote function endpoint answering task status queries.
    pub status_function_url: String,
    /// Ingress endpoint accepting serialized processing requests.
    pub submit_endpoint_url: String,
    pub poll_interval_secs: u64,
    /// Default lookback window for `status` with no explicit filter.
    pub days_history: u64,
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let bytes: Vec<u8> = if let Some(p) = path {
        std::fs::read(p)?
    } else {
        include_bytes!("../config/default.yml").to_vec()
    };

    let config: Config = serde_yaml::from_slice(&bytes)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::load_config;

    #[test]
    fn embedded_default_parses() {
        let cfg = load_config(None).expect("config");
        assert_eq!(cfg.instance, "tracehawk-main");
        assert!(cfg.poll_interval_secs > 0);
    }

    #[test]
    fn explicit_path_overrides_default() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "instance: lab-west\nproject: forensics-lab\nzone: us-west1-b\n\
             shared_filesystem: true\noutput_dir: /tmp/out\n\
             status_function_url: http://lab/status\n\
             submit_endpoint_url: http://lab/requests\n\
             poll_interval_secs: 30\ndays_history: 7"
        )
        .expect("write");
        let cfg = load_config(Some(file.path())).expect("config");
        assert_eq!(cfg.instance, "lab-west");
        assert!(cfg.shared_filesystem);
        assert_eq!(cfg.days_history, 7);
    }
}
