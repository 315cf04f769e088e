pub mod credentials;
pub mod error;
pub mod types;

pub use credentials::Credentials;
pub use error::{ErrorKind, ExchangeError, ValidationError};
pub use types::{OrderRequest, OrderSide, OrderType, TimeInForce};
