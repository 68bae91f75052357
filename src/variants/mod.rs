//! Concrete data sources: each pairs a naming scheme with a bottom-up builder.

pub mod error;
pub mod filesystem;
pub mod papers;

pub use error::{VariantError, VariantResult};
pub use filesystem::{build_file_system_tree, FileSystemNaming, FileSystemTree};
pub use papers::{
    build_paper_tree, load_papers, read_papers, CategoryEntry, CategoryMap, CategoryNaming,
    PaperMeta, PaperRecord, PaperTree,
};
