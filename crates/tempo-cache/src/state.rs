/// Observable state of one entity cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheState<E> {
    /// Cached entities, in remote order with newer creations prepended.
    pub entities: Vec<E>,
    /// An operation is in flight. Last writer wins when several overlap.
    pub loading: bool,
    /// Message of the most recent failure. Cleared when an operation starts.
    pub error: Option<String>,
}

impl<E> Default for CacheState<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            loading: false,
            error: None,
        }
    }
}
