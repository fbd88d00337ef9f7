//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use distmap_core::Grid;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from environment variable or string
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "edt")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable. Log
    /// output from the library crates is routed to the test harness and
    /// filtered by `RUST_LOG`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        let _ = env_logger::builder().is_test(true).try_init();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two integer grids for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the grids are identical, `false` otherwise.
    pub fn compare_grids(&mut self, grid1: &Grid<i32>, grid2: &Grid<i32>) -> bool {
        self.index += 1;

        if !grid1.same_dimensions(grid2) || grid1.channels() != grid2.channels() {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.fail(msg);
            return false;
        }

        for y in 0..grid1.height() {
            for x in 0..grid1.width() {
                if grid1.pixel(x, y) != grid2.pixel(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: grid comparison for index {} - value mismatch at ({}, {}): {:?} vs {:?}",
                        self.test_name,
                        self.index,
                        x,
                        y,
                        grid1.pixel(x, y),
                        grid2.pixel(x, y)
                    );
                    self.fail(msg);
                    return false;
                }
            }
        }

        true
    }

    /// Write a grid to file and check against golden file
    ///
    /// # Returns
    ///
    /// `Ok(())` if successful, error otherwise.
    pub fn write_grid_and_check(&mut self, grid: &Grid<i32>) -> TestResult<()> {
        self.index += 1;

        let local_path = format!("{}/{}.{:02}.grid", regout_dir(), self.test_name, self.index);

        grid.write_to_file(&local_path)
            .map_err(|e| TestError::GridWrite {
                path: local_path.clone(),
                message: e.to_string(),
            })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with golden file.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    let msg = format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    );
                    self.fail(msg);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !Self::same_grid_contents(&local_data, &golden_data)
                {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.fail(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Compare two serialized grids value by value
    fn same_grid_contents(data1: &[u8], data2: &[u8]) -> bool {
        match (Grid::read_from_bytes(data1), Grid::read_from_bytes(data2)) {
            (Ok(g1), Ok(g2)) => g1 == g2,
            _ => false,
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
