pub mod batch;
pub mod issue;
pub mod lookup;
pub mod register;
