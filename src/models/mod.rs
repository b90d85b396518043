pub mod sessionmodel;
pub mod ticketmodel;
