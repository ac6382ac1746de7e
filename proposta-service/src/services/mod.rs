pub mod memory;
pub mod metrics;
pub mod repository;
pub mod storage;

pub use memory::MemoryRepository;
pub use metrics::{get_metrics, init_metrics};
pub use repository::MongoRepository;
pub use storage::Storage;
