//! Package metadata carried alongside the hook configuration
//!
//! The hook never reads any of this; it exists so `extbuild info` can show
//! what the source distribution declares.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageMetadata {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "default_license")]
    pub license: String,
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            description: default_description(),
            url: Some("https://01.org/yask".to_string()),
            author: Some("Intel Corporation".to_string()),
            license: default_license(),
            packages: default_packages(),
        }
    }
}

fn default_name() -> String {
    "yask".to_string()
}

fn default_version() -> String {
    "v2-alpha".to_string()
}

fn default_description() -> String {
    "YASK--Yet Another Stencil Kernel: A framework to facilitate exploration of the HPC \
     stencil-performance design space"
        .to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

fn default_packages() -> Vec<String> {
    vec!["yask".to_string()]
}
