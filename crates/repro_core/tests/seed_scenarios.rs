//! Seed setter behaviour against recording backends.
//!
//! These tests verify:
//! - each available backend is seeded exactly once with the given seed
//! - accelerator entry points are called only when reported present
//! - one notice per unavailable backend, and no call into it
//! - backend failures propagate and stop the pass

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use repro_core::backend::{BackendKind, Backends, SeedBackend, TensorBackend};
use repro_core::{set_random_seeds, set_random_seeds_to, SeedError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Seed(&'static str, i64),
    CudaAll(i64),
    Mps(i64),
}

type Log = Arc<Mutex<Vec<Call>>>;

struct Recorder {
    name: &'static str,
    log: Log,
    fail: bool,
}

impl SeedBackend for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        self.log.lock().unwrap().push(Call::Seed(self.name, seed));
        if self.fail {
            return Err(SeedError::backend(self.name, "rejected"));
        }
        Ok(())
    }
}

struct TensorRecorder {
    log: Log,
    cuda: bool,
    mps: bool,
}

impl SeedBackend for TensorRecorder {
    fn name(&self) -> &str {
        "tensor"
    }

    fn manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        self.log.lock().unwrap().push(Call::Seed("tensor", seed));
        Ok(())
    }
}

impl TensorBackend for TensorRecorder {
    fn cuda_is_available(&self) -> bool {
        self.cuda
    }

    fn cuda_manual_seed_all(&self, seed: i64) -> Result<(), SeedError> {
        self.log.lock().unwrap().push(Call::CudaAll(seed));
        Ok(())
    }

    fn mps_is_available(&self) -> bool {
        self.mps
    }

    fn mps_manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        self.log.lock().unwrap().push(Call::Mps(seed));
        Ok(())
    }
}

fn recorder(name: &'static str, log: &Log) -> Recorder {
    Recorder {
        name,
        log: Arc::clone(log),
        fail: false,
    }
}

/// Build recording backends for the kinds in `present`.
fn recording_backends(present: &[BackendKind], cuda: bool, mps: bool) -> (Backends, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut backends = Backends::none();
    for kind in present {
        backends = match kind {
            BackendKind::Random => backends.with_random(recorder("random", &log)),
            BackendKind::Numeric => backends.with_numeric(recorder("numeric", &log)),
            BackendKind::Tensor => backends.with_tensor(TensorRecorder {
                log: Arc::clone(&log),
                cuda,
                mps,
            }),
            BackendKind::Scientific => backends.with_scientific(recorder("scientific", &log)),
        };
    }
    (backends, log)
}

fn run(seed: i64, backends: &Backends) -> Result<Vec<String>, SeedError> {
    let mut buffer = Vec::new();
    set_random_seeds_to(seed, backends, &mut buffer)?;
    Ok(String::from_utf8(buffer)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect())
}

fn calls(log: &Log) -> Vec<Call> {
    log.lock().unwrap().clone()
}

#[test]
fn test_only_tensor_without_accelerators() {
    let (backends, log) = recording_backends(&[BackendKind::Tensor], false, false);

    let notices = run(42, &backends).unwrap();

    assert_eq!(calls(&log), vec![Call::Seed("tensor", 42)]);
    assert_eq!(
        notices,
        vec![
            BackendKind::Random.skip_notice(),
            BackendKind::Numeric.skip_notice(),
            BackendKind::Scientific.skip_notice(),
        ]
    );
}

#[test]
fn test_nothing_available() {
    let (backends, log) = recording_backends(&[], false, false);

    let notices = run(0, &backends).unwrap();

    assert!(calls(&log).is_empty());
    assert_eq!(notices.len(), 4);
    for (notice, kind) in notices.iter().zip(BackendKind::ALL) {
        assert_eq!(notice, &kind.skip_notice());
    }
}

#[test]
fn test_nothing_available_on_stdout() {
    assert!(set_random_seeds(0, &Backends::none()).is_ok());
}

#[test]
fn test_everything_available_with_both_accelerators() {
    let (backends, log) = recording_backends(&BackendKind::ALL, true, true);

    let notices = run(-1, &backends).unwrap();

    assert!(notices.is_empty());
    assert_eq!(
        calls(&log),
        vec![
            Call::Seed("random", -1),
            Call::Seed("numeric", -1),
            Call::Seed("tensor", -1),
            Call::CudaAll(-1),
            Call::Mps(-1),
            Call::Seed("scientific", -1),
        ]
    );
}

#[test]
fn test_cuda_only_skips_mps_entry_point() {
    let (backends, log) = recording_backends(&[BackendKind::Tensor], true, false);
    run(5, &backends).unwrap();
    assert_eq!(calls(&log), vec![Call::Seed("tensor", 5), Call::CudaAll(5)]);
}

#[test]
fn test_mps_only_skips_cuda_entry_point() {
    let (backends, log) = recording_backends(&[BackendKind::Tensor], false, true);
    run(5, &backends).unwrap();
    assert_eq!(calls(&log), vec![Call::Seed("tensor", 5), Call::Mps(5)]);
}

#[test]
fn test_failure_propagates_and_stops() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let backends = Backends::none()
        .with_random(recorder("random", &log))
        .with_numeric(Recorder {
            name: "numeric",
            log: Arc::clone(&log),
            fail: true,
        })
        .with_scientific(recorder("scientific", &log));

    let mut buffer = Vec::new();
    let err = set_random_seeds_to(9, &backends, &mut buffer).unwrap_err();

    assert!(matches!(err, SeedError::Backend { ref backend, .. } if backend == "numeric"));
    assert_eq!(
        calls(&log),
        vec![Call::Seed("random", 9), Call::Seed("numeric", 9)]
    );
    assert!(buffer.is_empty(), "tensor notice must not be printed after failure");
}

fn subset() -> impl Strategy<Value = Vec<BackendKind>> {
    proptest::sample::subsequence(BackendKind::ALL.to_vec(), 0..=4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every present backend is seeded exactly once with the seed.
    #[test]
    fn prop_each_available_backend_seeded_once(
        seed in any::<i64>(),
        cuda in any::<bool>(),
        mps in any::<bool>(),
    ) {
        let (backends, log) = recording_backends(&BackendKind::ALL, cuda, mps);
        run(seed, &backends).unwrap();

        let calls = calls(&log);
        for name in ["random", "numeric", "tensor", "scientific"] {
            let count = calls.iter().filter(|c| **c == Call::Seed(name, seed)).count();
            prop_assert_eq!(count, 1, "backend {} seeded {} times", name, count);
        }
        prop_assert_eq!(calls.contains(&Call::CudaAll(seed)), cuda);
        prop_assert_eq!(calls.contains(&Call::Mps(seed)), mps);
        prop_assert_eq!(calls.len(), 4 + usize::from(cuda) + usize::from(mps));
    }

    /// One notice per missing backend, and missing backends are never called.
    #[test]
    fn prop_missing_backends_noticed_once(seed in any::<i64>(), present in subset()) {
        let (backends, log) = recording_backends(&present, true, true);
        let notices = run(seed, &backends).unwrap();

        let missing: Vec<BackendKind> = BackendKind::ALL
            .into_iter()
            .filter(|kind| !present.contains(kind))
            .collect();
        let expected: Vec<String> = missing.iter().map(|k| k.skip_notice()).collect();
        prop_assert_eq!(notices, expected);

        let calls = calls(&log);
        for kind in &missing {
            prop_assert!(
                !calls.iter().any(|c| matches!(c, Call::Seed(name, _) if *name == kind.name())),
                "missing backend {} was called",
                kind
            );
        }
        if missing.contains(&BackendKind::Tensor) {
            prop_assert!(!calls.iter().any(|c| matches!(c, Call::CudaAll(_) | Call::Mps(_))));
        }
    }
}
