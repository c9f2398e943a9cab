//! Signed-in identity display model

use serde::Serialize;
use tabled::Tabled;

use super::common::or_dash;
use crate::output::formatters::format_datetime_local;
use crate::session::Identity;

/// Identity summary for `whoami`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct IdentityDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "SELLER")]
    pub seller: String,

    #[tabled(rename = "EXPIRES")]
    pub expires: String,
}

impl From<&Identity> for IdentityDisplay {
    fn from(identity: &Identity) -> Self {
        let field = |v: &Option<String>| or_dash(v.as_deref().unwrap_or_default());
        Self {
            name: field(&identity.name),
            email: field(&identity.email),
            role: field(&identity.role),
            seller: identity
                .seller_profile
                .as_ref()
                .map(|s| field(&s.name))
                .unwrap_or_else(|| "--".to_string()),
            expires: identity
                .expires_at()
                .map(format_datetime_local)
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}
