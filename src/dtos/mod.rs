pub mod authdtos;
pub mod ticketdtos;
