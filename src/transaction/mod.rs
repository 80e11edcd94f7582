pub mod builder;
pub mod script;

pub use builder::{calculate_transaction_fee, create_micropayment_transaction, demo_transaction};
