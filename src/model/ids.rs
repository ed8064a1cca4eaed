//! Type-safe identifiers.
//!
//! Every record type gets its own `u32` newtype so a `BranchId` can never be
//! passed where a `TenantId` is expected. The store mints them from a counter
//! through `From<u32>`; `Display` renders the prefixed form (`tenant_3`).

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($($name:ident => $prefix:literal),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Identifier of a `", stringify!($name), "` record.")]
                #[derive(
                    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
                )]
                #[serde(transparent)]
                pub struct [<$name Id>](pub u32);

                impl From<u32> for [<$name Id>] {
                    fn from(id: u32) -> Self {
                        Self(id)
                    }
                }

                impl fmt::Display for [<$name Id>] {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, concat!($prefix, "_{}"), self.0)
                    }
                }
            )+
        }
    };
}

record_id! {
    Tenant => "tenant",
    Branch => "branch",
    Client => "client",
    Staff => "staff",
    StaffBranch => "staff_branch",
    UserRole => "role",
    Identity => "user",
    Component => "component",
    Service => "service",
    Faq => "faq",
    AuditLog => "audit",
}
