use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::resource::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub product: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl Record for Order {
    const KIND: ResourceKind = ResourceKind::Orders;

    fn id(&self) -> u64 {
        self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            Order { id: 101, product: "Notebook".into(), user_id: 1 },
            Order { id: 102, product: "Headset".into(), user_id: 2 },
        ]
    }
}
