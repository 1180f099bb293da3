//! # Food Shop Entry Point
//!
//! ```text
//! $ foodshop --member-discount 15
//! $ FOODSHOP_PAIR_ELIGIBLE_CODES=RED,BLUE foodshop -v
//! $ foodshop --print-config
//! ```
//!
//! The actual setup is in lib.rs for better testability.

fn main() -> anyhow::Result<()> {
    foodshop_cli::run()
}
