//! Implements UidGenerator with random v4 UUIDs.

use crate::domain::TransactionId;
use crate::ports::UidGenerator;

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl UuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl UidGenerator for UuidGenerator {
    fn generate(&self) -> String {
        TransactionId::generate().into_inner()
    }
}
