//! Contains the Tez HTTP types.

mod headers;
pub use headers::*;

mod method;
pub use method::*;

mod mime;
pub use mime::*;

mod request;
pub use request::{HttpVersion, Request};

mod response;
pub use response::*;

mod status;
pub use status::*;
