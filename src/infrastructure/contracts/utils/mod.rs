pub mod numeric;
pub mod redact;
