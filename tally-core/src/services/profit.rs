//! Profit service - calculate and store a profit report

use std::fs;
use std::path::PathBuf;

use crate::domain::result::Result;
use crate::domain::{Financials, ProfitInputs};

/// Report file name inside the data directory
pub const RESULTS_FILE: &str = "results.txt";

pub struct ProfitService {
    data_dir: PathBuf,
}

impl ProfitService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn calculate(&self, inputs: &ProfitInputs) -> Result<Financials> {
        Financials::calculate(inputs)
    }

    /// Write the report, replacing any previous one
    pub fn store(&self, financials: &Financials) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(RESULTS_FILE);
        fs::write(&path, financials.report())?;
        Ok(path)
    }
}
