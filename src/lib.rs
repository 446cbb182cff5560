//! # Registry Hive Differ
//!
//! Reports which registry keys and values exist in one hive snapshot but not
//! in another, for before/after comparisons during incident response.
//!
//! ## How a comparison works
//!
//! 1. Each hive is opened read-only and memory-mapped ([`Hive`]).
//! 2. Its tree is walked depth-first ([`walker::walk`]), turning every key
//!    and value below the root into a [`CanonicalPath`] such as
//!    `Software/Vendor/Ver___value`.
//! 3. The two resulting [`PathSet`]s are subtracted ([`diff::diff`]): the
//!    result is everything in the first set that is absent from the second.
//!
//! Only names are compared. Value data, types and timestamps are ignored, so
//! a value whose data changed is not reported, and a renamed key shows up as
//! a path unique to the first hive.
//!
//! ## Canonical paths
//!
//! ```text
//! ROOT                      (not recorded)
//! └── Software              Software
//!     ├── Ver = 1           Software/Ver___value
//!     ├── (default)         Software/NONETYPE___value
//!     └── Sub               Software/Sub
//! ```
//!
//! Names are reduced to ASCII before joining ([`canonical::ascii_encode`]).
//! Names differing only in non-ASCII characters therefore share one path.
//!
//! ## Examples
//!
//! ```no_run
//! use reg_diff::report::{render, ReportOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let before = Path::new("/evidence/before/SOFTWARE");
//! let after = Path::new("/evidence/after/SOFTWARE");
//!
//! let result = reg_diff::compare_files(before, after)?;
//! render(&result, before, &ReportOptions::default(), &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! Any type implementing [`tree::HiveNode`] can be walked, including the
//! in-memory [`tree::MemoryKey`]:
//!
//! ```
//! use reg_diff::{diff::diff, tree::MemoryKey, walker::walk};
//!
//! let a = MemoryKey::new("ROOT").with_subkey(
//!     MemoryKey::new("Software")
//!         .with_value("Ver")
//!         .with_subkey(MemoryKey::new("Sub")),
//! );
//! let b = MemoryKey::new("ROOT").with_subkey(MemoryKey::new("Software"));
//!
//! let result = diff(&walk(&&a)?, &walk(&&b)?);
//! assert_eq!(result.len(), 2);
//! assert!(result.unique().contains("Software/Sub"));
//! # Ok::<(), reg_diff::RegistryError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod cell;
pub mod compare;
pub mod diff;
pub mod error;
pub mod header;
pub mod hive;
pub mod key;
pub mod path_set;
pub mod report;
pub mod subkey_list;
pub mod tree;
pub mod utils;
pub mod value;
pub mod walker;

// Re-export main types for convenience
pub use canonical::{CanonicalPath, EntryKind};
pub use compare::compare_files;
pub use diff::DiffResult;
pub use error::{RegistryError, Result};
pub use hive::{Hive, RegistryKey, RegistryValue};
pub use path_set::PathSet;
pub use report::{ReportFormat, ReportOptions};
pub use tree::{HiveNode, HiveValue, RawName};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
