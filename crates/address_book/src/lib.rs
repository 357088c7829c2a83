//! Address book tools described with doctool.
//!
//! Every tool here goes through the `doctool` umbrella crate only, so the
//! `#[describe]` output resolves `doctool::doctool_schema` paths.

use doctool::prelude::*;

/// Look up a user by email.
///
/// @param email [String] Email address.
/// @param include_deleted [Boolean] Also search deleted accounts.
#[describe]
pub fn find_user(email: String, include_deleted: Option<bool>) -> Option<u64> {
    let _ = (email, include_deleted);
    None
}

/// An address book entry.
///
/// @items_type phones String
/// @max_items phones 3
#[describe]
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Display name.
    pub name: String,
    /// Phone numbers.
    pub phones: Vec<String>,
}

/// Schemas of every address book tool, in a stable order.
pub fn tool_schemas() -> Result<Vec<SchemaResult>, ConvertError> {
    let converter = Converter::default();
    [FindUserSchema::describe_type(), Contact::describe_type()]
        .iter()
        .map(|target| converter.convert_structured(target))
        .collect()
}
