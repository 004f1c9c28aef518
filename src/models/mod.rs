pub mod alert;
pub mod astronomical;
pub mod environment;
pub mod recommendation;
pub mod score;
pub mod snapshot;
pub mod task;
pub mod text;
pub mod vegetation;

pub use alert::*;
pub use astronomical::*;
pub use environment::*;
pub use recommendation::*;
pub use score::*;
pub use snapshot::*;
pub use task::*;
pub use text::*;
pub use vegetation::*;
