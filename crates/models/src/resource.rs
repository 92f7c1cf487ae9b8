use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Users,
    Orders,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Users, ResourceKind::Orders];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::Orders => "orders",
        }
    }

    /// Listing route exposed by both the backend and the gateway, e.g. `/users`.
    pub fn path(self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_segments() {
        assert_eq!("users".parse::<ResourceKind>(), Ok(ResourceKind::Users));
        assert_eq!("orders".parse::<ResourceKind>(), Ok(ResourceKind::Orders));
        assert_eq!(ResourceKind::Orders.path(), "/orders");
    }

    #[test]
    fn rejects_unknown_and_differently_cased_names() {
        assert_eq!(
            "payments".parse::<ResourceKind>(),
            Err(ModelError::UnknownResource("payments".into()))
        );
        assert!("Users".parse::<ResourceKind>().is_err());
        assert!("".parse::<ResourceKind>().is_err());
    }
}
