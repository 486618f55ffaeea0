pub mod classifier;
pub mod replies;

pub use classifier::{AffectClassifier, ClassificationResult};
pub use replies::{AffectConfigError, ReplyBook, ReplyPool};
