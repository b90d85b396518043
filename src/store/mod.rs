pub mod sessions;
pub mod ticketstore;
