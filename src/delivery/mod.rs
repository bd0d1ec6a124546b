//! Downstream delivery of the scraped article archive.
//!
//! Two independent paths, mirroring how the site ingests content:
//!
//! - [`api`]: POST the JSON array to the import REST endpoint
//! - [`db`]: generate a SQL script and run it through the database CLI
//!
//! Neither path retries. A failed delivery is reported to the operator and
//! the archive stays on disk for another attempt.

pub mod api;
pub mod db;
