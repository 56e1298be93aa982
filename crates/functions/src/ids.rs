//! Function identifiers.
//!
//! Identifiers are built from a version prefix and a local name; only the names other crates are
//! likely to reference directly get a constant.

pub const XACML1: &str = "urn:oasis:names:tc:xacml:1.0:function:";
pub const XACML2: &str = "urn:oasis:names:tc:xacml:2.0:function:";
pub const XACML3: &str = "urn:oasis:names:tc:xacml:3.0:function:";

pub fn xacml1(local: &str) -> String {
    format!("{XACML1}{local}")
}

pub fn xacml2(local: &str) -> String {
    format!("{XACML2}{local}")
}

pub fn xacml3(local: &str) -> String {
    format!("{XACML3}{local}")
}

pub const STRING_EQUAL: &str = "urn:oasis:names:tc:xacml:1.0:function:string-equal";
pub const INTEGER_EQUAL: &str = "urn:oasis:names:tc:xacml:1.0:function:integer-equal";
pub const INTEGER_ADD: &str = "urn:oasis:names:tc:xacml:1.0:function:integer-add";
pub const INTEGER_GREATER_THAN: &str = "urn:oasis:names:tc:xacml:1.0:function:integer-greater-than";
pub const STRING_REGEXP_MATCH: &str = "urn:oasis:names:tc:xacml:1.0:function:string-regexp-match";
pub const STRING_INTERSECTION: &str = "urn:oasis:names:tc:xacml:1.0:function:string-intersection";
pub const STRING_BAG: &str = "urn:oasis:names:tc:xacml:1.0:function:string-bag";

pub const ANY_OF: &str = "urn:oasis:names:tc:xacml:3.0:function:any-of";
pub const ALL_OF: &str = "urn:oasis:names:tc:xacml:3.0:function:all-of";
pub const ANY_OF_ANY: &str = "urn:oasis:names:tc:xacml:3.0:function:any-of-any";
pub const ALL_OF_ANY: &str = "urn:oasis:names:tc:xacml:3.0:function:all-of-any";
pub const ANY_OF_ALL: &str = "urn:oasis:names:tc:xacml:3.0:function:any-of-all";
pub const ALL_OF_ALL: &str = "urn:oasis:names:tc:xacml:3.0:function:all-of-all";
pub const MAP: &str = "urn:oasis:names:tc:xacml:3.0:function:map";

pub const DATETIME_ADD_DAYTIMEDURATION: &str = "urn:oasis:names:tc:xacml:3.0:function:dateTime-add-dayTimeDuration";
pub const DATE_FROM_STRING: &str = "urn:oasis:names:tc:xacml:3.0:function:date-from-string";

pub const XPATH_NODE_COUNT: &str = "urn:oasis:names:tc:xacml:3.0:function:xpath-node-count";
pub const XPATH_NODE_EQUAL: &str = "urn:oasis:names:tc:xacml:3.0:function:xpath-node-equal";
pub const XPATH_NODE_MATCH: &str = "urn:oasis:names:tc:xacml:3.0:function:xpath-node-match";
