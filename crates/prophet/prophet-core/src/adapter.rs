//! The forecast adapter.

use prophet_api::{ProphetConfig, Settings};
use prophet_spi::{Dataset, ForecastEngine, ForecastSequence, ProphetError, Result};
use tracing::{debug, info_span};

use crate::decode::decode_forecast_stream;
use crate::engine::ProcessEngine;

/// Runs forecasts through an external engine.
///
/// Holds an immutable configuration and an engine; every call to
/// [`forecast`](Prophet::forecast) is independent, so one instance can be
/// shared across threads.
///
/// # Example
///
/// ```no_run
/// use prophet_api::ProphetConfig;
/// use prophet_core::{CsvDatasetLoader, Prophet};
/// use std::path::Path;
///
/// let dataset = CsvDatasetLoader::new().load_file(Path::new("data.csv"))?;
/// let prophet = Prophet::new(ProphetConfig::new().with_interval_width(0.95));
/// let forecast = prophet.forecast(&dataset)?;
/// println!("{} points", forecast.len());
/// # Ok::<(), prophet_spi::ProphetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Prophet<E = ProcessEngine> {
    config: ProphetConfig,
    engine: E,
}

impl Prophet<ProcessEngine> {
    /// Adapter backed by the process engine, running `PROPHET_PYTHON` when
    /// set and `python3` otherwise.
    pub fn new(config: ProphetConfig) -> Self {
        Self::with_engine(config, ProcessEngine::from_env())
    }

    /// Adapter built from a settings file's engine options and process
    /// settings.
    pub fn from_settings(settings: Settings) -> Self {
        Self::with_engine(settings.prophet, ProcessEngine::from_config(settings.engine))
    }
}

impl Default for Prophet<ProcessEngine> {
    fn default() -> Self {
        Self::new(ProphetConfig::default())
    }
}

impl<E: ForecastEngine> Prophet<E> {
    /// Adapter backed by any engine implementation.
    pub fn with_engine(config: ProphetConfig, engine: E) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &ProphetConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Arguments passed to the engine on every call.
    pub fn args(&self) -> Vec<String> {
        self.config.to_args()
    }

    /// Forecast `dataset`.
    ///
    /// Blocks until the engine finishes. Returns the records in emission
    /// order; an engine that succeeds without output yields an empty
    /// sequence. Any decode failure discards the whole output.
    pub fn forecast(&self, dataset: &Dataset) -> Result<ForecastSequence> {
        let span = info_span!("forecast", engine = self.engine.name(), points = dataset.len());
        let _guard = span.enter();

        let payload = serde_json::to_vec(dataset).map_err(ProphetError::Serialization)?;
        let args = self.config.to_args();

        let output = self.engine.execute(&payload, &args)?;
        let forecast = decode_forecast_stream(&output)?;

        debug!(records = forecast.len(), "decoded forecast");
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prophet_spi::DataPoint;
    use std::sync::{Arc, Mutex};

    /// Mock implementation: records each call and replays a fixed result
    #[derive(Clone)]
    struct StubEngine {
        stdout: Vec<u8>,
        exit_code: i32,
        calls: Arc<Mutex<Vec<(Vec<u8>, Vec<String>)>>>,
    }

    impl StubEngine {
        fn replay(stdout: &str) -> Self {
            Self {
                stdout: stdout.as_bytes().to_vec(),
                exit_code: 0,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn exiting(code: i32, stdout: &str) -> Self {
            Self {
                exit_code: code,
                ..Self::replay(stdout)
            }
        }

        fn calls(&self) -> Vec<(Vec<u8>, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ForecastEngine for StubEngine {
        fn name(&self) -> &str {
            "stub"
        }

        fn execute(&self, payload: &[u8], args: &[String]) -> Result<Vec<u8>> {
            self.calls
                .lock()
                .unwrap()
                .push((payload.to_vec(), args.to_vec()));
            if self.exit_code != 0 {
                return Err(ProphetError::ExitCode {
                    code: self.exit_code,
                });
            }
            Ok(self.stdout.clone())
        }
    }

    fn sample_dataset() -> Dataset {
        vec![
            DataPoint::new("2024-01-01 00:00:00", 10.0),
            DataPoint::new("2024-01-01 00:00:10", 12.5),
        ]
        .into()
    }

    fn records(n: usize) -> String {
        (0..n)
            .map(|i| format!(r#"{{"ds":{},"yhat":{}.5}}"#, i * 10_000, i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_forecast_returns_records_in_order() {
        let engine = StubEngine::replay(&records(4));
        let prophet = Prophet::with_engine(ProphetConfig::new(), engine);

        let forecast = prophet.forecast(&sample_dataset()).unwrap();
        assert_eq!(forecast.len(), 4);
        assert_eq!(
            forecast.iter().map(|p| p.ds).collect::<Vec<_>>(),
            vec![0, 10_000, 20_000, 30_000]
        );
        assert_eq!(forecast[3].yhat, 3.5);
    }

    #[test]
    fn test_payload_is_json_array_of_ds_y() {
        let engine = StubEngine::replay("");
        let prophet = Prophet::with_engine(ProphetConfig::new(), engine.clone());
        prophet.forecast(&sample_dataset()).unwrap();

        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        let payload: serde_json::Value = serde_json::from_slice(&calls[0].0).unwrap();
        assert_eq!(
            payload,
            serde_json::json!([
                {"ds": "2024-01-01 00:00:00", "y": 10.0},
                {"ds": "2024-01-01 00:00:10", "y": 12.5},
            ])
        );
    }

    #[test]
    fn test_only_set_options_are_forwarded() {
        let engine = StubEngine::replay("");
        let config = ProphetConfig::new()
            .with_interval_width(0.95)
            .with_future_periods(12);
        let prophet = Prophet::with_engine(config, engine.clone());
        prophet.forecast(&sample_dataset()).unwrap();

        let calls = engine.calls();
        let args = &calls[0].1;
        assert_eq!(
            args,
            &vec![
                "--interval_width=0.950000".to_string(),
                "--future_dataframe_periods=12".to_string(),
            ]
        );
        assert_eq!(prophet.args(), *args);
    }

    #[test]
    fn test_no_options_means_no_args() {
        let engine = StubEngine::replay("");
        let prophet = Prophet::with_engine(ProphetConfig::default(), engine.clone());
        prophet.forecast(&sample_dataset()).unwrap();
        assert!(engine.calls()[0].1.is_empty());
    }

    #[test]
    fn test_empty_dataset_and_output() {
        let engine = StubEngine::replay("");
        let prophet = Prophet::with_engine(ProphetConfig::new(), engine.clone());

        let forecast = prophet.forecast(&Dataset::new()).unwrap();
        assert!(forecast.is_empty());
        assert_eq!(engine.calls()[0].0, b"[]");
    }

    #[test]
    fn test_exit_code_propagates() {
        let engine = StubEngine::exiting(2, &records(3));
        let prophet = Prophet::with_engine(ProphetConfig::new(), engine);

        let err = prophet.forecast(&sample_dataset()).unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
    }

    #[test]
    fn test_partial_output_is_discarded() {
        let output = format!("{}\n{{\"ds\":10000,\"yh", records(1));
        let prophet = Prophet::with_engine(ProphetConfig::new(), StubEngine::replay(&output));

        let err = prophet.forecast(&sample_dataset()).unwrap_err();
        assert!(matches!(err, ProphetError::Decode { .. }));
    }

    #[test]
    fn test_non_finite_value_fails_before_engine_runs() {
        let engine = StubEngine::replay("");
        let prophet = Prophet::with_engine(ProphetConfig::new(), engine.clone());
        let dataset: Dataset = vec![DataPoint::new("a", 1.0), DataPoint::new("b", f64::NAN)].into();

        let err = prophet.forecast(&dataset).unwrap_err();
        assert!(matches!(err, ProphetError::Serialization(_)));
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_calls_are_independent() {
        let engine = StubEngine::replay(&records(2));
        let prophet = Prophet::with_engine(ProphetConfig::new(), engine.clone());

        let first = prophet.forecast(&sample_dataset()).unwrap();
        let second = prophet.forecast(&Dataset::new()).unwrap();

        assert_eq!(first, second);
        assert_eq!(engine.calls().len(), 2);
    }

    #[test]
    fn test_shared_across_threads() {
        let prophet = Arc::new(Prophet::with_engine(
            ProphetConfig::new(),
            StubEngine::replay(&records(3)),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let prophet = Arc::clone(&prophet);
                std::thread::spawn(move || prophet.forecast(&sample_dataset()).unwrap().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
        assert_eq!(prophet.engine().calls().len(), 4);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings::from_json_str(
            r#"{"prophet": {"future_periods": 5}, "engine": {"program": "python3.12"}}"#,
        )
        .unwrap();
        let prophet = Prophet::from_settings(settings);

        assert_eq!(prophet.args(), vec!["--future_dataframe_periods=5"]);
        assert_eq!(prophet.engine().name(), "python3.12");
    }

    #[test]
    fn test_default_adapter() {
        let prophet = Prophet::default();
        assert!(prophet.args().is_empty());
        assert_eq!(prophet.config(), &ProphetConfig::default());
    }

    #[test]
    fn test_new_honors_interpreter_env() {
        std::env::set_var("PROPHET_PYTHON", "/opt/venv/bin/python");
        let prophet = Prophet::new(ProphetConfig::new());
        std::env::remove_var("PROPHET_PYTHON");

        assert_eq!(prophet.engine().name(), "/opt/venv/bin/python");
    }
}
