//! Adapter configuration types.

use std::fs;
use std::path::{Path, PathBuf};

use prophet_spi::{ProphetError, Result};
use serde::{Deserialize, Serialize};

/// Engine option: flexibility of the trend at changepoints.
pub const CHANGEPOINT_PRIOR_SCALE: &str = "changepoint_prior_scale";
/// Engine option: share of history in which changepoints may be placed.
pub const CHANGEPOINT_RANGE: &str = "changepoint_range";
/// Engine option: width of the uncertainty interval.
pub const INTERVAL_WIDTH: &str = "interval_width";
/// Engine option: number of future periods appended before predicting.
pub const FUTURE_DATAFRAME_PERIODS: &str = "future_dataframe_periods";
/// Engine option: frequency code of the future periods.
pub const FUTURE_DATAFRAME_FREQ: &str = "future_dataframe_freq";

/// Interpreter used when nothing else is configured.
pub const DEFAULT_INTERPRETER: &str = "python3";
/// Environment variable overriding the interpreter.
pub const PYTHON_ENV_VAR: &str = "PROPHET_PYTHON";

// ============================================================================
// Engine Options
// ============================================================================

/// Options forwarded to the forecasting engine.
///
/// `None` leaves the engine default in place. `Some` is transmitted as-is,
/// zero and empty values included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProphetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changepoint_prior_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changepoint_range: Option<f64>,
    /// Uncertainty interval width (0.8 = 80% interval)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_width: Option<f64>,
    /// Future periods to forecast past the end of the dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_periods: Option<u32>,
    /// Frequency code for future periods (e.g. "10s", "D")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_freq: Option<String>,
}

impl ProphetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_changepoint_prior_scale(mut self, value: f64) -> Self {
        self.changepoint_prior_scale = Some(value);
        self
    }

    pub fn with_changepoint_range(mut self, value: f64) -> Self {
        self.changepoint_range = Some(value);
        self
    }

    pub fn with_interval_width(mut self, value: f64) -> Self {
        self.interval_width = Some(value);
        self
    }

    pub fn with_future_periods(mut self, periods: u32) -> Self {
        self.future_periods = Some(periods);
        self
    }

    pub fn with_future_freq(mut self, freq: impl Into<String>) -> Self {
        self.future_freq = Some(freq.into());
        self
    }

    /// Overlay `overrides` on top of this configuration; set values in
    /// `overrides` win.
    pub fn merged_with(self, overrides: ProphetConfig) -> Self {
        Self {
            changepoint_prior_scale: overrides
                .changepoint_prior_scale
                .or(self.changepoint_prior_scale),
            changepoint_range: overrides.changepoint_range.or(self.changepoint_range),
            interval_width: overrides.interval_width.or(self.interval_width),
            future_periods: overrides.future_periods.or(self.future_periods),
            future_freq: overrides.future_freq.or(self.future_freq),
        }
    }

    /// Engine arguments, one `--name=value` per set option.
    ///
    /// Floats are written with six fixed decimals so the engine never sees
    /// exponent or locale-dependent forms.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        let floats = [
            (CHANGEPOINT_PRIOR_SCALE, self.changepoint_prior_scale),
            (CHANGEPOINT_RANGE, self.changepoint_range),
            (INTERVAL_WIDTH, self.interval_width),
        ];
        for (name, value) in floats {
            if let Some(value) = value {
                args.push(format!("--{}={:.6}", name, value));
            }
        }
        if let Some(periods) = self.future_periods {
            args.push(format!("--{}={}", FUTURE_DATAFRAME_PERIODS, periods));
        }
        if let Some(freq) = &self.future_freq {
            args.push(format!("--{}={}", FUTURE_DATAFRAME_FREQ, freq));
        }
        args
    }
}

// ============================================================================
// Engine Process
// ============================================================================

/// How the engine process is launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Interpreter binary
    pub program: String,
    /// Script on disk to run instead of the embedded one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
    /// Arguments placed before the script
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leading_args: Vec<String>,
}

impl EngineConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Default configuration with the interpreter taken from
    /// `PROPHET_PYTHON` when set.
    pub fn from_env() -> Self {
        match std::env::var(PYTHON_ENV_VAR) {
            Ok(program) if !program.trim().is_empty() => Self::new(program.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_INTERPRETER.to_string(),
            script: None,
            leading_args: Vec::new(),
        }
    }
}

// ============================================================================
// Settings File
// ============================================================================

/// Engine options plus process settings, as stored in a JSON file.
///
/// ```json
/// {
///   "prophet": { "interval_width": 0.95, "future_periods": 24, "future_freq": "H" },
///   "engine": { "program": "/opt/venv/bin/python" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub prophet: ProphetConfig,
    pub engine: EngineConfig,
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ProphetError::Config {
            reason: format!("invalid settings: {}", e),
        })
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ProphetError::Config {
            reason: format!("cannot read '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }
}
