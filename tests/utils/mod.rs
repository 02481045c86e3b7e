#![allow(dead_code)]

pub mod fake_studio;
pub mod fixtures;
