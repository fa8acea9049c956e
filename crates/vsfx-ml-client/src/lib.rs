//! Clients for the external model services.
//!
//! The pipeline consumes two black-box capabilities:
//! - [`SceneCaptioner`]: image + instruction prompt -> free-text description
//! - [`AudioSynthesizer`]: description + duration -> audio file
//!
//! Both are traits so callers can inject deterministic fakes; the HTTP
//! implementations talk to a model-serving endpoint. Calls are never retried.

pub mod captioner;
pub mod endpoint;
pub mod error;
pub mod synthesizer;

pub use captioner::{HttpSceneCaptioner, SceneCaptioner};
pub use endpoint::ServiceEndpoint;
pub use error::{MlClientError, MlResult};
pub use synthesizer::{AudioSynthesizer, HttpAudioSynthesizer};
