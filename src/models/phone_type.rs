use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneType {
    pub phone_type_id: i32,
    #[serde(rename = "type", alias = "phoneType")]
    pub label: String,
}

impl PhoneType {
    pub fn new(phone_type_id: i32, label: &str) -> Self {
        Self {
            phone_type_id,
            label: label.to_string(),
        }
    }

    /// Built-in catalog used by the phone input.
    pub fn catalog() -> Vec<PhoneType> {
        vec![
            PhoneType::new(1, "Mobile"),
            PhoneType::new(2, "Home"),
            PhoneType::new(3, "Work"),
        ]
    }

    /// Label for a type id, "Unknown" when it is not in `types`.
    pub fn label_for(types: &[PhoneType], phone_type_id: Option<i32>) -> &str {
        phone_type_id
            .and_then(|id| types.iter().find(|t| t.phone_type_id == id))
            .map(|t| t.label.as_str())
            .unwrap_or("Unknown")
    }
}
