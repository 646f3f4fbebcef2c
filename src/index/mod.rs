pub mod build;
pub mod cancel;
pub mod progress;
pub mod snapshot;
pub mod table;
pub mod tokenizer;
pub mod types;
pub mod walk;

pub use build::IndexBuilder;
pub use cancel::CancelToken;
pub use snapshot::Index;
pub use table::IndexTable;
pub use types::*;
