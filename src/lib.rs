//! equilibrio: personal finance ledger (income/expense transactions, categories) with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
