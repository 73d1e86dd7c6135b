/// Everything required to talk to a single Oomnitza tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The tenant's subdomain, e.g. `example` for `example.oomnitza.com`.
    pub organization_name: String,
    /// The API token, sent as-is within the `Authorization2` header.
    pub api_key: String,
}

impl ClientConfig {
    pub fn new(organization_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            organization_name: organization_name.into(),
            api_key: api_key.into(),
        }
    }

    /// The root of the v3 API for this organization.
    ///
    /// No validation is performed on the organization name;
    /// whatever we were given ends up within the hostname.
    pub fn base_url(&self) -> String {
        format!("https://{}.oomnitza.com/api/v3", self.organization_name)
    }
}
