//! Schema command implementation

use crate::Result;
use crate::app::models::Schema;

/// Print the header line a valid upload must start with
pub fn run_schema() -> Result<()> {
    println!("{}", Schema::REQUIRED.header_line());
    Ok(())
}
