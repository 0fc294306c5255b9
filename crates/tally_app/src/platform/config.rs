use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tally_engine::PipelineConfig;

use super::cli::Cli;

pub const DEFAULT_URL: &str = "https://www.gutenberg.org/files/1342/1342-0.txt";
pub const DEFAULT_TOP: usize = 10;

/// Settings read from a RON file. Every field is optional; missing fields
/// fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub workers: Option<usize>,
    pub top: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub stage_deadline_secs: Option<u64>,
    pub redirect_limit: Option<usize>,
    pub max_bytes: Option<u64>,
    pub output: Option<PathBuf>,
}

/// Everything one run needs, after merging the file and the flags.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub url: String,
    pub top: usize,
    pub output: Option<PathBuf>,
    pub pipeline: PipelineConfig,
}

pub fn load(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Flags win over the file, the file wins over defaults.
pub fn resolve(cli: &Cli, file: FileConfig) -> RunSettings {
    let mut pipeline = PipelineConfig::default();
    if let Some(workers) = cli.workers.or(file.workers) {
        pipeline.workers = workers.max(1);
    }
    if let Some(secs) = cli.deadline.or(file.stage_deadline_secs) {
        pipeline.stage_deadline = Some(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.timeout.or(file.request_timeout_secs) {
        pipeline.fetch.request_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = cli.connect_timeout.or(file.connect_timeout_secs) {
        pipeline.fetch.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(limit) = file.redirect_limit {
        pipeline.fetch.redirect_limit = limit;
    }
    if let Some(max_bytes) = file.max_bytes {
        pipeline.fetch.max_bytes = max_bytes;
    }

    RunSettings {
        url: cli
            .url
            .clone()
            .or(file.url)
            .unwrap_or_else(|| DEFAULT_URL.to_string()),
        top: cli.top.or(file.top).unwrap_or(DEFAULT_TOP),
        output: cli.output.clone().or(file.output),
        pipeline,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = resolve(&Cli::default(), FileConfig::default());
        assert_eq!(settings.url, DEFAULT_URL);
        assert_eq!(settings.top, DEFAULT_TOP);
        assert_eq!(settings.output, None);
        assert_eq!(settings.pipeline.stage_deadline, None);
        assert!(settings.pipeline.workers >= 1);
    }

    #[test]
    fn flags_override_file() {
        let cli = Cli {
            workers: Some(2),
            top: Some(3),
            ..Cli::default()
        };
        let file = FileConfig {
            url: Some("https://example.com/file.txt".to_string()),
            workers: Some(16),
            top: Some(25),
            stage_deadline_secs: Some(9),
            max_bytes: Some(1024),
            ..FileConfig::default()
        };

        let settings = resolve(&cli, file);
        assert_eq!(settings.url, "https://example.com/file.txt");
        assert_eq!(settings.pipeline.workers, 2);
        assert_eq!(settings.top, 3);
        assert_eq!(settings.pipeline.stage_deadline, Some(Duration::from_secs(9)));
        assert_eq!(settings.pipeline.fetch.max_bytes, 1024);
    }

    #[test]
    fn loads_partial_ron_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(workers: Some(4), request_timeout_secs: Some(12))").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.request_timeout_secs, Some(12));
        assert_eq!(config.url, None);

        let settings = resolve(&Cli::default(), config);
        assert_eq!(settings.pipeline.fetch.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(wokers: Some(4))").unwrap();
        assert!(load(file.path()).is_err());
    }
}
