//! Tez is a small synchronous web application layer. It maps requests to handlers by path
//! pattern and method, runs a chain of middleware around every request and renders the
//! response the handler filled in once processing is over.
//!
//! ```
//! use tez::{ApplicationBuilder, PathParams, Request, Response, TezResult};
//!
//! fn greeting(_: &Request, resp: &mut Response, params: &PathParams) -> TezResult<()> {
//!   resp.set_text(format!("Hello from {}", params.get("name").unwrap_or_default()));
//!   Ok(())
//! }
//!
//! let app = ApplicationBuilder::builder(|builder| builder.add_route("/hello/{name}", greeting))
//!   .unwrap();
//!
//! let resp = app.test_client().get("/hello/davron").unwrap();
//! assert_eq!(resp.status(), 200);
//! assert_eq!(resp.text(), "Hello from davron");
//! ```

#![warn(missing_docs)]

mod logging;

pub mod http;
pub use http::*;

mod tez_error;
pub use tez_error::*;

mod path_params;
pub use path_params::*;

mod handler;
pub use handler::*;

mod router;
pub use router::*;

mod default_functions;

mod dispatcher;
pub use dispatcher::*;

mod middleware;
pub use middleware::*;

mod templates;
pub use templates::*;

mod static_files;
pub use static_files::*;

mod app;
pub use app::*;

mod connection;

mod test_client;
pub use test_client::*;
