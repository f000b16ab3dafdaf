use serde::{Deserialize, Serialize};

use super::macros::string_enum;

/// One directory record, employee or manager. Sourced from the external
/// directory table; this crate never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub personnel_id: String,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub centre_code: String,
    pub role: Role,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    pub enum Role {
        Employee => "EMPLOYEE",
        Manager => "MANAGER",
    }
}
