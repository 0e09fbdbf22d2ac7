pub mod app;
pub mod events;
pub mod layout;
pub mod theme;
pub mod views;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_support;
