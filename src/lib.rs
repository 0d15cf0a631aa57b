#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod advice;
pub mod demand;
pub mod error;
pub mod fee;
pub mod optimizer;
pub mod prelude;
pub mod quantity;
pub mod tariff;
