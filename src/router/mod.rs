mod options;
mod route;
mod service;

pub use options::{
    RouterConfig, RouterConfigBuilder, RouterConfigError, RouterOptions, RouterOptionsBuilder,
    RouterOptionsError,
};
pub use route::{Route, RouteMatch};
pub use service::{Router, STATIC_FILE_PARAM};
