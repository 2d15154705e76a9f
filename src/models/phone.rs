use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone_id: Option<i32>,
    pub phone_number: String,
    pub phone_type_id: Option<i32>,
    #[serde(default)]
    pub client_id: i32,
}

impl Phone {
    /// An unsaved phone for the given client.
    pub fn new(client_id: i32, phone_number: &str, phone_type_id: Option<i32>) -> Self {
        Self {
            phone_id: None,
            phone_number: phone_number.to_string(),
            phone_type_id,
            client_id,
        }
    }
}
