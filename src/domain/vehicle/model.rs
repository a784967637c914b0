//! Vehicle domain entity

/// A rentable car, identified by a positive integer id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
}
