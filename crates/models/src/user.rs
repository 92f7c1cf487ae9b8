use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::resource::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub age: u32,
}

impl Record for User {
    const KIND: ResourceKind = ResourceKind::Users;

    fn id(&self) -> u64 {
        self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            User { id: 1, name: "Henrique".into(), age: 28 },
            User { id: 2, name: "Amanda".into(), age: 31 },
        ]
    }
}
