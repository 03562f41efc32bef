pub mod client;
pub mod error;
pub mod flatten;
pub mod nested;
pub mod throttle;

pub use client::{normalize_country, normalize_postal_code, CornershopClient};
pub use error::FetchError;
pub use flatten::{flatten_response, flatten_results, flatten_today, has_results_list};
pub use nested::get_nested;
pub use throttle::Throttle;
