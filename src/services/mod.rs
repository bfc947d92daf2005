pub mod relay;
pub use relay::{Projection, RelayError, RelayService};
