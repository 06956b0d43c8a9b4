pub mod canonical;
pub mod field_node;
pub mod flat;
pub mod report;
pub mod scalar;

pub use canonical::{CanonicalFieldRecord, SchemaDictionary};
pub use field_node::{DynamicMapping, FieldNode, FieldTree, LeafAttributes};
pub use flat::{FieldOrigin, FlatFieldRecord};
pub use report::{Classification, ReconciliationEntry, ReconciliationSummary};
