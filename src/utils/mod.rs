pub mod draw_token;
pub mod jwt;

pub use draw_token::*;
pub use jwt::*;
