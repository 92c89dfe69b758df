//! Payment endpoints - intent creation and status retrieval.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateIntentRequest, CreateIntentResponse, PaymentStatusResponse};
pub use handlers::{create_intent, get_payment_status};
pub use routes::routes;
