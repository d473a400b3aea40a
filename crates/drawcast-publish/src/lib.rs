//! Output side: document builder, placeholder metrics, and the static-file publisher.

pub mod documents;
mod error;
pub mod metrics;
mod publisher;

pub use documents::{
    BuildContext, DocumentKind, DocumentSet, ErrorDocument, RenderedDocument, build_documents,
};
pub use error::{BuildError, WriteError};
pub use metrics::{PlaceholderMetrics, RandomPlaceholderMetrics};
pub use publisher::{ErrorPublishReport, Publisher};
