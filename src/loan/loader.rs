//! Load loan terms from a JSON file
//!
//! Missing fields fall back to the defaults, so a file may override only the
//! values it cares about:
//!
//! ```json
//! { "principal": 450000, "fixed": { "annual_rate_percent": 6.5 } }
//! ```

use super::LoanTerms;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load and validate loan terms from a JSON file
pub fn load_terms<P: AsRef<Path>>(path: P) -> Result<LoanTerms, Box<dyn Error>> {
    let file = File::open(path)?;
    load_terms_from_reader(BufReader::new(file))
}

/// Load and validate loan terms from any reader (e.g., string buffer, request body)
pub fn load_terms_from_reader<R: std::io::Read>(reader: R) -> Result<LoanTerms, Box<dyn Error>> {
    let terms: LoanTerms = serde_json::from_reader(reader)?;
    terms.validate()?;
    Ok(terms)
}
