#![allow(dead_code)]

mod memory;
mod user_service;
