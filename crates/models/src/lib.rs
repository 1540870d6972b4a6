pub mod errors;
pub mod db;
pub mod admin_user;
pub mod category;
pub mod service;
pub mod inquiry;
pub mod site_settings;

#[cfg(test)]
mod tests;
