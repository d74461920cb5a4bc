//! Display helpers shared by the HTTP surface and the CLI

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
