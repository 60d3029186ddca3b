//! Conversion options
//!
//! Options are plain values: build one per call (or share an immutable one)
//! and pass it by reference to the entry point.

use serde::{Deserialize, Serialize};

/// Default separator placed between member names.
pub const DEFAULT_SEPARATOR: &str = ".";

/// How a static member (one reached without an owning object) is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StaticMemberConversion {
    /// `Member`
    #[default]
    MemberNameOnly,
    /// `DeclaringType.Member`
    ParentTypeName,
    /// `Namespace.DeclaringType.Member`
    ParentTypeFullName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Text placed between consecutive member names. Brackets never get one.
    pub separator: String,
    pub static_member_conversion: StaticMemberConversion,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            static_member_conversion: StaticMemberConversion::default(),
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_static_member_conversion(mut self, conversion: StaticMemberConversion) -> Self {
        self.static_member_conversion = conversion;
        self
    }
}
