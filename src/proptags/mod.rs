//! Property tag arithmetic
//!
//! A property tag is a packed 32-bit value: the high 16 bits carry the
//! property identifier, the low 16 bits the property type. These helpers
//! mirror the legacy MAPI `PROP_TYPE` / `PROP_ID` / `PROP_TAG` /
//! `CHANGE_PROP_TYPE` macros bit for bit, plus a small vocabulary of
//! well-known type and tag constants with reverse name lookup.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Mask selecting the property-type half of a tag
pub const PROP_TYPE_MASK: u32 = 0x0000_FFFF;

/// Extract the property type (low 16 bits) of a tag.
#[inline]
pub const fn prop_type(tag: u32) -> u32 {
    tag & PROP_TYPE_MASK
}

/// Extract the property identifier (high 16 bits) of a tag.
#[inline]
pub const fn prop_id(tag: u32) -> u32 {
    tag >> 16
}

/// Extract both halves of a tag as `(type, id)`.
#[inline]
pub const fn prop_type_and_id(tag: u32) -> (u32, u32) {
    (prop_type(tag), prop_id(tag))
}

/// Pack a property type and identifier into a tag.
#[inline]
pub const fn prop_tag(ptype: u32, id: u32) -> u32 {
    (id << 16) | ptype
}

/// Replace the property type of a tag, keeping its identifier.
#[inline]
pub const fn change_prop_type(tag: u32, ptype: u32) -> u32 {
    (tag & !PROP_TYPE_MASK) | ptype
}

// Property types (MAPIDefS.h)
pub const PT_UNSPECIFIED: u32 = 0x0000;
pub const PT_NULL: u32 = 0x0001;
pub const PT_I2: u32 = 0x0002;
pub const PT_LONG: u32 = 0x0003;
pub const PT_R4: u32 = 0x0004;
pub const PT_DOUBLE: u32 = 0x0005;
pub const PT_CURRENCY: u32 = 0x0006;
pub const PT_APPTIME: u32 = 0x0007;
pub const PT_ERROR: u32 = 0x000A;
pub const PT_BOOLEAN: u32 = 0x000B;
pub const PT_OBJECT: u32 = 0x000D;
pub const PT_I8: u32 = 0x0014;
pub const PT_STRING8: u32 = 0x001E;
pub const PT_UNICODE: u32 = 0x001F;
pub const PT_SYSTIME: u32 = 0x0040;
pub const PT_CLSID: u32 = 0x0048;
pub const PT_BINARY: u32 = 0x0102;
/// Multi-valued flag, OR-ed onto a base property type
pub const PT_MV_FLAG: u32 = 0x1000;

// Well-known tags used by the surrounding tooling
pub const PR_MESSAGE_CLASS_W: u32 = prop_tag(PT_UNICODE, 0x001A);
pub const PR_MESSAGE_CLASS_A: u32 = prop_tag(PT_STRING8, 0x001A);
pub const PR_ENTRYID: u32 = prop_tag(PT_BINARY, 0x0FFF);
pub const PR_BODY_W: u32 = prop_tag(PT_UNICODE, 0x1000);
pub const PR_BODY_A: u32 = prop_tag(PT_STRING8, 0x1000);
pub const PR_INTERNET_MESSAGE_ID_W: u32 = prop_tag(PT_UNICODE, 0x1035);
pub const PR_INTERNET_MESSAGE_ID_A: u32 = prop_tag(PT_STRING8, 0x1035);
pub const PR_DEFAULT_STORE: u32 = prop_tag(PT_BOOLEAN, 0x3400);
pub const PR_SERVICE_UID: u32 = prop_tag(PT_BINARY, 0x3D0C);
pub const PR_PROFILE_USER_SMTP_EMAIL_ADDRESS_W: u32 = prop_tag(PT_UNICODE, 0x6641);
pub const PR_PROFILE_USER_SMTP_EMAIL_ADDRESS_A: u32 = prop_tag(PT_STRING8, 0x6641);
pub const PR_PST_PATH_W: u32 = prop_tag(PT_UNICODE, 0x6700);

static PROP_TYPE_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (PT_UNSPECIFIED, "PT_UNSPECIFIED"),
        (PT_NULL, "PT_NULL"),
        (PT_I2, "PT_I2"),
        (PT_LONG, "PT_LONG"),
        (PT_R4, "PT_R4"),
        (PT_DOUBLE, "PT_DOUBLE"),
        (PT_CURRENCY, "PT_CURRENCY"),
        (PT_APPTIME, "PT_APPTIME"),
        (PT_ERROR, "PT_ERROR"),
        (PT_BOOLEAN, "PT_BOOLEAN"),
        (PT_OBJECT, "PT_OBJECT"),
        (PT_I8, "PT_I8"),
        (PT_STRING8, "PT_STRING8"),
        (PT_UNICODE, "PT_UNICODE"),
        (PT_SYSTIME, "PT_SYSTIME"),
        (PT_CLSID, "PT_CLSID"),
        (PT_BINARY, "PT_BINARY"),
    ])
});

static PROP_TAG_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (PR_MESSAGE_CLASS_W, "PR_MESSAGE_CLASS_W"),
        (PR_MESSAGE_CLASS_A, "PR_MESSAGE_CLASS_A"),
        (PR_ENTRYID, "PR_ENTRYID"),
        (PR_BODY_W, "PR_BODY_W"),
        (PR_BODY_A, "PR_BODY_A"),
        (PR_INTERNET_MESSAGE_ID_W, "PR_INTERNET_MESSAGE_ID_W"),
        (PR_INTERNET_MESSAGE_ID_A, "PR_INTERNET_MESSAGE_ID_A"),
        (PR_DEFAULT_STORE, "PR_DEFAULT_STORE"),
        (PR_SERVICE_UID, "PR_SERVICE_UID"),
        (
            PR_PROFILE_USER_SMTP_EMAIL_ADDRESS_W,
            "PR_PROFILE_USER_SMTP_EMAIL_ADDRESS_W",
        ),
        (
            PR_PROFILE_USER_SMTP_EMAIL_ADDRESS_A,
            "PR_PROFILE_USER_SMTP_EMAIL_ADDRESS_A",
        ),
        (PR_PST_PATH_W, "PR_PST_PATH_W"),
    ])
});

/// Symbolic name of a well-known property type, if registered.
pub fn prop_type_name(ptype: u32) -> Option<&'static str> {
    PROP_TYPE_NAMES.get(&ptype).copied()
}

/// Symbolic name of a well-known property tag, if registered.
pub fn prop_tag_name(tag: u32) -> Option<&'static str> {
    PROP_TAG_NAMES.get(&tag).copied()
}

/// A packed property tag.
///
/// Thin typed face over the same arithmetic as the free functions, for Rust
/// callers that want tags to be distinguishable from bare integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropTag(pub u32);

impl PropTag {
    pub const fn new(ptype: u32, id: u32) -> Self {
        Self(prop_tag(ptype, id))
    }

    pub const fn ptype(self) -> u32 {
        prop_type(self.0)
    }

    pub const fn id(self) -> u32 {
        prop_id(self.0)
    }

    pub const fn with_type(self, ptype: u32) -> Self {
        Self(change_prop_type(self.0, ptype))
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PropTag {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl From<PropTag> for u32 {
    fn from(tag: PropTag) -> u32 {
        tag.0
    }
}

impl fmt::Display for PropTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match prop_tag_name(self.0) {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}
