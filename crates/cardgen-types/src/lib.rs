// cardgen-types: the passive data model shared by the client crate.

use std::future::Future;
use std::pin::Pin;

use futures_core::Stream;

pub mod batch;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod stream;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed stream that is Send.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

pub use batch::{BatchFailure, BatchOutcome};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use error::{Error, ErrorKind};
pub use request::GenerationRequest;
pub use response::{CardEnvelope, GenerationResult};
pub use stream::StreamEvent;
