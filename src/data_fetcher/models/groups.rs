use serde::{Deserialize, Serialize};

/// A round (matchday, stage) of a competition.
///
/// `group_order_id` is the ordinal used to request the round's matches and to
/// decide which round comes next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "groupName", default)]
    pub group_name: Option<String>,
    #[serde(rename = "groupOrderID", default)]
    pub group_order_id: Option<i32>,
    #[serde(rename = "groupID", default)]
    pub group_id: Option<i64>,
}

impl Group {
    pub fn new(name: impl Into<String>, order_id: i32) -> Self {
        Group {
            group_name: Some(name.into()),
            group_order_id: Some(order_id),
            group_id: None,
        }
    }

    /// The ordinal, if present and positive.
    pub fn ordinal(&self) -> Option<i32> {
        self.group_order_id.filter(|id| *id > 0)
    }
}
