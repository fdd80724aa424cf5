#![feature(type_alias_impl_trait)]
//#![feature(return_position_impl_trait_in_trait)]
#![feature(async_fn_in_trait)]
#![feature(impl_trait_projections)]

pub mod body;
pub mod config;
pub mod date;
pub mod extract;
mod fn_trait;
pub mod handler;
pub mod request;
pub mod responder;
pub mod router;
pub mod server;
pub mod wrapper;

pub use body::{OptionReqBody, ResponseBody};
pub use config::ServerConfig;
pub use extract::FromRequest;
pub use fn_trait::FnTrait;
pub use handler::{FnHandler, RequestHandler, handler_fn};
pub use request::{PathParams, RequestContext};
pub use responder::Responder;
pub use server::{Server, ServerBuilder};
