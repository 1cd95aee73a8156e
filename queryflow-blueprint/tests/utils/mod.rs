use anyhow::Context;
use queryflow_blueprint::optimizer::{Optimizer, OptimizerOptions};
use queryflow_blueprint::plan::explain::explain_to_string;
use queryflow_blueprint::plan::{Blueprint, QueryNode};
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub options: OptimizerOptions,
    pub query: QueryNode,
    pub expected_optimized_plan: String,
}

pub struct TestCaseRunner {
    /// Input file paths, relative to the crate root.
    pub paths: Vec<PathBuf>,
}

impl TestCaseRunner {
    pub fn run(self) {
        for path in &self.paths {
            let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
            let file = File::options()
                .read(true)
                .open(&path)
                .with_context(|| format!("Failed to open test case file: {:?}", &path))
                .unwrap();

            let test_cases: Vec<TestCase> = serde_yaml::from_reader(file)
                .with_context(|| format!("Failed to load test cases from file: {:?}", &path))
                .unwrap();

            for test_case in test_cases {
                self.run_case(&path, test_case);
            }
        }
    }

    fn run_case<P: AsRef<Path> + Debug>(&self, path: &P, test_case: TestCase) {
        let blueprint = Blueprint::try_from(test_case.query).unwrap();
        let optimized = Optimizer::new(test_case.options)
            .unwrap()
            .optimize(blueprint);

        let optimized_plan_string = explain_to_string(&optimized).unwrap();

        assert_eq!(
            test_case.expected_optimized_plan, optimized_plan_string,
            "Plan for {} in {:?} is different.",
            test_case.name, path
        );
    }
}

pub fn assert_close(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
