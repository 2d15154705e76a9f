use serde::{Deserialize, Serialize};

use super::Phone;

/// A client record as exchanged with the backend.
///
/// `client_id` is assigned by the backend; `0` marks a client that has not
/// been saved yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub client_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub is_archived: Option<bool>,
    #[serde(default)]
    pub phones: Vec<Phone>,
}

/// Create payload: a client without its id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub phones: Vec<Phone>,
}

impl Client {
    pub fn is_new(&self) -> bool {
        self.client_id == 0
    }

    pub fn archived(&self) -> bool {
        self.is_archived.unwrap_or(false)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_new_client(&self) -> NewClient {
        NewClient {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            is_archived: self.is_archived,
            phones: self.phones.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_client_body_omits_unset_optional_fields() {
        let client = NewClient {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: None,
            ..Default::default()
        };

        let body = serde_json::to_value(&client).unwrap();
        assert_eq!(
            body,
            json!({ "firstName": "Ada", "lastName": "Lovelace", "email": null })
        );
    }

    #[test]
    fn client_without_phones_field_deserializes_to_empty_list() {
        let client: Client = serde_json::from_value(json!({
            "clientId": 7,
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@navy.mil",
            "isArchived": null
        }))
        .unwrap();

        assert_eq!(client.client_id, 7);
        assert!(client.phones.is_empty());
        assert!(!client.archived());
        assert_eq!(client.full_name(), "Grace Hopper");
    }

    #[test]
    fn to_new_client_drops_only_the_id() {
        let client = Client {
            client_id: 12,
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            email: Some("alan@bletchley.uk".to_string()),
            is_archived: Some(true),
            phones: vec![Phone::new(12, "+44 20 7946 0000", Some(1))],
        };

        let new_client = client.to_new_client();
        assert_eq!(new_client.first_name, "Alan");
        assert_eq!(new_client.email.as_deref(), Some("alan@bletchley.uk"));
        assert_eq!(new_client.is_archived, Some(true));
        assert_eq!(new_client.phones, client.phones);
    }
}
