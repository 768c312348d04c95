//! Plugin parameter strings (`--vmicro_out=<params>:<dir>`).

use crate::config::Config;
use crate::error::{CodegenError, Result};

/// Activation token of this generator.
pub const PLUGIN_NAME: &str = "vmicro";

const PLUGINS_KEY: &str = "plugins=";

/// Add this generator to a comma separated parameter string.
///
/// An existing `plugins=` entry gets `vmicro+` prepended so plugins chain,
/// otherwise a `plugins=vmicro` entry is appended. Entries with other keys
/// are left untouched, and a list that already has `vmicro` is unchanged.
///
/// ```rust
/// use vmicro_codegen::add_plugin_to_params;
///
/// assert_eq!(add_plugin_to_params(""), "plugins=vmicro");
/// assert_eq!(add_plugin_to_params("foo=bar"), "foo=bar,plugins=vmicro");
/// assert_eq!(add_plugin_to_params("plugins=other"), "plugins=vmicro+other");
/// ```
pub fn add_plugin_to_params(params: &str) -> String {
    if params.is_empty() {
        return format!("{PLUGINS_KEY}{PLUGIN_NAME}");
    }

    let mut found = false;
    let mut entries: Vec<String> = params
        .split(',')
        .map(|entry| {
            let Some(list) = entry.trim_start().strip_prefix(PLUGINS_KEY) else {
                return entry.to_string();
            };
            found = true;
            if list.split('+').any(|p| p == PLUGIN_NAME) {
                entry.to_string()
            } else if list.is_empty() {
                format!("{PLUGINS_KEY}{PLUGIN_NAME}")
            } else {
                format!("{PLUGINS_KEY}{PLUGIN_NAME}+{list}")
            }
        })
        .collect();

    if !found {
        entries.push(format!("{PLUGINS_KEY}{PLUGIN_NAME}"));
    }
    entries.join(",")
}

/// Parsed parameter string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginParams {
    /// Requested plugins; `None` when the string has no `plugins=` entry
    pub plugins: Option<Vec<String>>,
    pub config: Config,
}

impl PluginParams {
    /// Recognized keys: `plugins` (`+` separated), `runtime`, `client`,
    /// `server` and `comments`. A bare boolean key means `true`.
    pub fn parse(params: &str) -> Result<Self> {
        let mut plugins = None;
        let mut builder = Config::builder();

        for entry in params.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
            match key {
                "plugins" => {
                    plugins = Some(
                        value
                            .split('+')
                            .filter(|p| !p.is_empty())
                            .map(str::to_string)
                            .collect(),
                    );
                }
                "runtime" => builder = builder.runtime_path(value),
                "client" => builder = builder.emit_client(parse_bool(key, value)?),
                "server" => builder = builder.emit_server(parse_bool(key, value)?),
                "comments" => builder = builder.emit_comments(parse_bool(key, value)?),
                _ => log::debug!("Ignoring unknown plugin parameter '{entry}'"),
            }
        }

        Ok(Self {
            plugins,
            config: builder.build()?,
        })
    }

    /// Whether this generator should run.
    pub fn is_enabled(&self) -> bool {
        self.plugins
            .as_ref()
            .map_or(true, |plugins| plugins.iter().any(|p| p == PLUGIN_NAME))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "" | "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(CodegenError::InvalidParameter {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
