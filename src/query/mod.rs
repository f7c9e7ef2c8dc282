pub mod criteria;
pub mod engine;
pub mod related;

pub use criteria::{QueryCriteria, weights};
pub use engine::{QueryEngine, RankedComponent, ScoredId, DEFAULT_RESULT_LIMIT};
pub use related::{RelationshipFinder, DEFAULT_RELATED_LIMIT};
