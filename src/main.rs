//! # code-reader CLI
//!
//! Command-line interface for the CodeReader store.
//!
//! ## Usage
//! ```bash
//! code-reader init
//! code-reader history add "4006381333931" --format EAN-13
//! code-reader --output json history list
//! ```

mod cli;

use code_reader::Result;

fn main() -> Result<()> {
    code_reader::init_tracing();
    cli::run()
}
