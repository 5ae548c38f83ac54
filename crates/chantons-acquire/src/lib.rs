pub mod config;
pub mod detail;
pub mod error;
pub mod markup;
pub mod results;
pub mod session;
pub mod transport;

pub use config::CatalogueConfig;
pub use detail::DetailPage;
pub use error::AcquireError;
pub use session::SessionClient;
pub use transport::{HttpTransport, Transport};
