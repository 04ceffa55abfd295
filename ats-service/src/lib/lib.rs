pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::auth as auth_domain;
pub use domain::tracking;
pub use domain::user;
pub use outbound::repositories;
