pub mod dhcp;
pub mod http;
