pub mod binding;
pub mod jwt;
pub mod number;
pub mod password;
pub mod validation;
