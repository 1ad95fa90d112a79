pub mod error;
pub mod http;
pub mod image;
pub mod messages;
pub mod traits;
pub mod types;
pub mod util;

pub use error::{ErrorKind, RequestError};
pub use image::{ImageMeta, ImageTensor};
pub use messages::{ContentPart, ImageUrl, Message, MessageContent, Role};
pub use traits::{EventLog, ImageCodec, ProviderConfig, RequestAdapter, TracingLog};
pub use types::{Completion, CompletionRequest, ImageSource, RequestMode, Severity};
