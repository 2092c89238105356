#![allow(dead_code)]

pub mod page_server;
pub mod whois_server;
