pub mod attribute;
pub mod present;
pub mod presets;
pub mod query;
pub mod report;
pub mod score;
pub mod taxonomy;

pub use attribute::{PolicyAttribute, Severity};
pub use query::{QueryError, normalize_query};
pub use report::{Grade, TrustReport};
pub use score::{BarTone, ScoreBreakdown};
pub use taxonomy::{Category, CategoryGroup, STANDARD_TAXONOMY, Taxonomy};
