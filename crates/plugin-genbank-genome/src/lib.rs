//! # Plugin Genbank Genome
//!
//! Converts a Genbank genome directory into `KBaseGenomes.Genome` and
//! `KBaseGenomes.ContigSet` workspace objects by driving the external Java
//! converter (`us.kbase.genbank.ConvertGBK`).
//!
//! The crate owns no conversion logic. It verifies the converter's
//! classpath, builds the command line, launches the tool and maps its exit
//! status to a result. The tool itself writes to the workspace service.

pub mod classpath;
pub mod error;
pub mod executor;
pub mod invocation;
pub mod models;
pub mod state;
pub mod transformer;

pub use classpath::{Classpath, ClasspathManifest};
pub use error::ConversionError;
pub use executor::{ExitOutcome, ProcessExecutor, ProcessLauncher};
pub use invocation::Invocation;
pub use models::{TransformParams, TransformReport};
pub use state::TransformState;
pub use transformer::GenbankTransformer;
