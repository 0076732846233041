pub mod brands;
pub mod middleware;
pub mod social_links;
pub mod users;
pub mod watches;
