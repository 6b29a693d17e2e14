pub mod collective;
pub mod config;
pub mod error;
pub mod protocol;
pub mod run;
pub mod stage;
pub mod topology;
pub mod transport;
pub mod types;

pub use collective::{barrier, gather};
pub use config::PipesortConfig;
pub use error::{PipesortError, Result};
pub use protocol::{MessageTag, PipesortMessage};
pub use run::{sort_random, sort_values};
pub use stage::{generate_values, run_collection, run_pipeline, run_source, PipelineStage};
pub use topology::ChainTopology;
pub use transport::{bootstrap_local, Endpoint};
pub use types::{Rank, Value, ROOT_RANK};
