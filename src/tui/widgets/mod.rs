pub mod severity_card;
