mod activity;
mod category;
mod user;

pub use activity::{Activity, Mood};
pub use category::Category;
pub use user::{Gender, NewUser, User};
