
pub use self::in_memory_test::{
    InMemoryTestConnector, InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedQuery,
};
