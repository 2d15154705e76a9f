mod client;
mod phone;
mod phone_type;

pub use client::{Client, NewClient};
pub use phone::Phone;
pub use phone_type::PhoneType;
