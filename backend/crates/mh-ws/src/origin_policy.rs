/// Decides which `Origin` header values may open a subscriber connection.
///
/// Built once from a comma-separated allow-list. An empty list, or a `*`
/// entry, allows every origin. Entries are compared after trimming.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Vec<String>,
    allow_all: bool,
}

impl OriginPolicy {
    pub fn from_allow_list(allow_list: &str) -> Self {
        let allowed: Vec<String> = allow_list
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        let allow_all = allowed.is_empty() || allowed.iter().any(|origin| origin == "*");

        Self { allowed, allow_all }
    }

    pub fn allows_all(&self) -> bool {
        self.allow_all
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allow_all || self.allowed.iter().any(|allowed| allowed == origin)
    }

    /// Upgrade-time check. Requests without an `Origin` header are not
    /// browser cross-origin requests and are let through.
    pub fn check_request(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.is_origin_allowed(origin),
        }
    }
}
