//! Report generation and export settings.

use serde::{Deserialize, Serialize};

fn default_link_base_url() -> String {
    "https://www.theguardian.com/".to_string()
}

fn default_export_dir() -> String {
    "./reports".to_string()
}

const fn default_top_answers() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Prefix joined with a crossword id to build its link.
    #[serde(default = "default_link_base_url")]
    pub link_base_url: String,

    /// Directory receiving one `<report>.json` data file per report.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// How many answers the most-used-answers report keeps.
    #[serde(default = "default_top_answers")]
    pub top_answers: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            link_base_url: default_link_base_url(),
            export_dir: default_export_dir(),
            top_answers: default_top_answers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReportConfig::default();
        assert_eq!(config.link_base_url, "https://www.theguardian.com/");
        assert_eq!(config.export_dir, "./reports");
        assert_eq!(config.top_answers, 50);
    }
}
