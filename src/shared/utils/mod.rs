pub mod case_conversion;
pub mod logger;
pub mod validation;

pub use case_conversion::{to_camel_case, to_snake_case};
pub use logger::{init_logger, LogContext, TimedOperation};
pub use validation::Validator;
