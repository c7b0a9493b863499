pub mod builder;
pub mod sender;
pub mod template;

pub use crate::domain::model::{Envelope, EnvelopeArgs, EnvelopeRequest, EnvelopeSummary};
pub use crate::domain::ports::{ConfigProvider, EnvelopeApi, Storage};
pub use crate::utils::error::Result;
