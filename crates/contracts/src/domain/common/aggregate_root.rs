use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Instance accessors plus the static metadata every aggregate class
/// declares (index, table name, UI names).
pub trait AggregateRoot {
    /// Aggregate identifier type
    type Id;

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for the database (e.g. "sale_entry")
    fn collection_name() -> &'static str;

    /// UI name, singular
    fn element_name() -> &'static str;

    /// UI name, plural
    fn list_name() -> &'static str;

    /// Full system name (e.g. "a001_sale_entry"), also the table name
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
