// crates/spaces-core/src/lib.rs
pub mod units;
pub mod edges;
pub mod props;
pub mod space;
pub mod document;

pub use units::*;
pub use edges::*;
pub use props::*;
pub use space::*;
pub use document::*;

#[derive(Debug, thiserror::Error)]
pub enum SpacesError {
    #[error("Space already registered: {0}")]
    DuplicateId(SpaceId),

    #[error("Space not found: {0}")]
    UnknownSpace(SpaceId),

    #[error("Parent space not found: {0}")]
    UnknownParent(SpaceId),

    #[error("Anchored space {0} has no anchor")]
    MissingAnchor(SpaceId),

    #[error("Invalid layout document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout document parse error: {0}")]
    Document(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpacesError>;
