//! Shout relay core.
//!
//! # Data Flow
//! ```text
//! ShoutRequest (decoded by the HTTP handler)
//!     → upstream.rs (POST to the upstream shout endpoint)
//!     → transform.rs (? → ‽, then . → !)
//!     → ShoutRequest with OUTPUT populated
//! ```

pub mod error;
pub mod transform;
pub mod types;
pub mod upstream;

pub use error::{RelayError, RelayResult};
pub use transform::proify;
pub use types::ShoutRequest;
pub use upstream::UpstreamClient;

/// Run a decoded request through the upstream service and the local
/// substitution. The input is echoed back unchanged.
pub async fn process(shout: ShoutRequest, upstream: &UpstreamClient) -> RelayResult<ShoutRequest> {
    let shouted = upstream.shout(&shout).await?;

    Ok(ShoutRequest {
        output: proify(&shouted),
        ..shout
    })
}
