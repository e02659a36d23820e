//! End-to-end tests for the prophet facade
//!
//! Runs the real process engine against small `sh` programs standing in
//! for the Python forecaster.

#![cfg(unix)]

use prophet_facade::{
    CsvDatasetLoader, Dataset, EngineConfig, ProcessEngine, Prophet, ProphetConfig, ProphetError,
};
use std::io::Write;
use tempfile::NamedTempFile;

struct StubProgram {
    prophet: Prophet,
    _script: NamedTempFile,
}

fn stub(body: &str, config: ProphetConfig) -> StubProgram {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "{}", body).unwrap();
    script.flush().unwrap();

    let engine = ProcessEngine::from_config(EngineConfig::new("sh").with_script(script.path()));
    StubProgram {
        prophet: Prophet::with_engine(config, engine),
        _script: script,
    }
}

fn record(ds: i64, yhat: f64) -> String {
    format!(
        r#"{{"ds":{},"trend":{},"yhat_lower":{},"yhat_upper":{},"trend_lower":{},"trend_upper":{},"additive_terms":0.0,"additive_terms_lower":0.0,"additive_terms_upper":0.0,"daily":0.0,"daily_lower":0.0,"daily_upper":0.0,"multiplicative_terms":0.0,"multiplicative_terms_lower":0.0,"multiplicative_terms_upper":0.0,"yhat":{}}}"#,
        ds,
        yhat,
        yhat - 1.0,
        yhat + 1.0,
        yhat,
        yhat,
        yhat
    )
}

fn csv_dataset(rows: usize) -> Dataset {
    let mut csv = String::from("ds,y\n");
    for i in 0..rows {
        csv.push_str(&format!("2024-01-01 00:00:{:02},{}.0\n", i * 10 % 60, i));
    }
    CsvDatasetLoader::new().load(csv.as_bytes()).unwrap()
}

#[test]
fn e2e_stub_returns_n_points_in_order() {
    let output: String = (0..5).map(|i| record(i * 10_000, i as f64)).collect();
    let program = stub(
        &format!("cat >/dev/null\nprintf '%s' '{}'", output),
        ProphetConfig::new(),
    );

    let forecast = program.prophet.forecast(&csv_dataset(3)).unwrap();
    assert_eq!(forecast.len(), 5);
    assert_eq!(
        forecast.iter().map(|p| p.ds).collect::<Vec<_>>(),
        vec![0, 10_000, 20_000, 30_000, 40_000]
    );
    assert_eq!(forecast[4].yhat_upper, 5.0);
}

#[test]
fn e2e_json_lines_output() {
    let output = format!("{}\n{}\n", record(1, 1.0), record(2, 2.0));
    let program = stub(
        &format!("cat >/dev/null\nprintf '%s' '{}'", output),
        ProphetConfig::new(),
    );

    let forecast = program.prophet.forecast(&csv_dataset(2)).unwrap();
    assert_eq!(forecast.len(), 2);
}

#[test]
fn e2e_exit_code_two_ignores_stdout() {
    let program = stub(
        &format!("cat >/dev/null\nprintf '%s' '{}'\nexit 2", record(1, 1.0)),
        ProphetConfig::new(),
    );

    let err = program.prophet.forecast(&csv_dataset(3)).unwrap_err();
    assert!(matches!(err, ProphetError::ExitCode { code: 2 }));
}

#[test]
fn e2e_truncated_output_discards_valid_prefix() {
    let program = stub(
        &format!(
            "cat >/dev/null\nprintf '%s' '{}{{\"ds\":2,\"trend\":'",
            record(1, 1.0)
        ),
        ProphetConfig::new(),
    );

    let err = program.prophet.forecast(&csv_dataset(3)).unwrap_err();
    assert!(matches!(err, ProphetError::Decode { .. }));
}

#[test]
fn e2e_empty_dataset_empty_output() {
    // Fails with a distinct code unless stdin is exactly an empty array.
    let program = stub(
        "input=$(cat)\n[ \"$input\" = \"[]\" ] || exit 9",
        ProphetConfig::new(),
    );

    let forecast = program.prophet.forecast(&csv_dataset(0)).unwrap();
    assert!(forecast.is_empty());
}

#[test]
fn e2e_stdin_carries_dataset() {
    let program = stub(
        "input=$(cat)\n[ \"$input\" = '[{\"ds\":\"2024-01-01 00:00:00\",\"y\":0.0},{\"ds\":\"2024-01-01 00:00:10\",\"y\":1.0}]' ] || exit 9",
        ProphetConfig::new(),
    );

    let forecast = program.prophet.forecast(&csv_dataset(2)).unwrap();
    assert!(forecast.is_empty());
}

#[test]
fn e2e_arguments_reach_engine() {
    let program = stub(
        "cat >/dev/null\n[ \"$#\" = 2 ] || exit 8\n[ \"$1\" = '--interval_width=0.950000' ] || exit 9\n[ \"$2\" = '--future_dataframe_periods=3' ] || exit 10",
        ProphetConfig::new()
            .with_interval_width(0.95)
            .with_future_periods(3),
    );

    assert!(program.prophet.forecast(&csv_dataset(1)).is_ok());
}

#[test]
fn e2e_no_arguments_for_unset_options() {
    let program = stub("cat >/dev/null\n[ \"$#\" = 0 ] || exit 8", ProphetConfig::new());
    assert!(program.prophet.forecast(&csv_dataset(1)).is_ok());
}

#[test]
fn e2e_missing_interpreter_is_launch_error() {
    let engine = ProcessEngine::from_config(EngineConfig::new("/nonexistent/python3"));
    let prophet = Prophet::with_engine(ProphetConfig::new(), engine);

    let err = prophet.forecast(&csv_dataset(1)).unwrap_err();
    assert!(matches!(err, ProphetError::ProcessLaunch { .. }));
}

#[test]
fn e2e_parallel_calls_each_spawn_a_process() {
    let output: String = (0..3).map(|i| record(i, i as f64)).collect();
    let program = stub(
        &format!("cat >/dev/null\nprintf '%s' '{}'", output),
        ProphetConfig::new(),
    );

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| program.prophet.forecast(&csv_dataset(2)).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 3);
        }
    });
}
