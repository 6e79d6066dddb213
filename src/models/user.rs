use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::{Map, Value};

const GROUPS_KEY: &str = "groups";

/// The profile record returned by `<api-base>/profile`, kept exactly as sent.
///
/// Only `groups` is ever interpreted, and only when submitter authorization
/// is enabled; views render whatever else the server includes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct User {
    profile: Value,
}

impl Default for User {
    fn default() -> Self {
        User {
            profile: Value::Object(Map::new()),
        }
    }
}

impl User {
    pub fn new(groups: Vec<String>, attributes: Option<Map<String, Value>>) -> Self {
        let mut profile = attributes.unwrap_or_default();
        profile.insert(GROUPS_KEY.to_string(), groups.into());
        User {
            profile: Value::Object(profile),
        }
    }

    pub fn profile(&self) -> &Value {
        &self.profile
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.profile.get(key)
    }

    /// Group memberships, in the order the server lists them.
    ///
    /// A missing or null `groups` field is no memberships. Anything other than
    /// a list of strings, or a profile that is not an object, is an error.
    pub fn groups(&self) -> Result<Vec<String>, serde_json::Error> {
        match &self.profile {
            Value::Object(fields) => match fields.get(GROUPS_KEY) {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(groups) => Vec::<String>::deserialize(groups),
            },
            _ => Err(serde_json::Error::custom("profile is not a JSON object")),
        }
    }

    /// Display name as sent by the server, if any.
    pub fn name(&self) -> Option<&str> {
        ["fullname", "user", "name", "email"]
            .iter()
            .find_map(|key| self.attribute(key).and_then(Value::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_fields_are_kept() {
        let user: User = serde_json::from_value(json!({
            "user": "jdoe",
            "email": "jdoe@example.org",
            "groups": ["opnfv-gerrit-functest-submitters", "opnfv-viewers"]
        }))
        .unwrap();
        assert_eq!(user.groups().unwrap().len(), 2);
        assert_eq!(user.attribute("email"), Some(&json!("jdoe@example.org")));
        assert_eq!(user.name(), Some("jdoe"));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["user"], "jdoe");
        assert_eq!(back["groups"][0], "opnfv-gerrit-functest-submitters");
    }

    #[test]
    fn test_missing_or_null_groups_are_empty() {
        let user: User = serde_json::from_value(json!({"user": "anon"})).unwrap();
        assert!(user.groups().unwrap().is_empty());

        let user: User = serde_json::from_value(json!({"groups": null})).unwrap();
        assert!(user.groups().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_groups_still_decode_the_profile() {
        let user: User = serde_json::from_value(json!({"user": "jdoe", "groups": [1, 2]})).unwrap();
        assert_eq!(user.name(), Some("jdoe"));
        assert!(user.groups().is_err());

        let user: User = serde_json::from_value(json!(["not", "an", "object"])).unwrap();
        assert_eq!(user.name(), None);
        assert!(user.groups().is_err());
    }

    #[test]
    fn test_new_builds_an_object_profile() {
        let user = User::new(vec!["a-b-c-submitters".to_string()], None);
        assert_eq!(user.groups().unwrap(), vec!["a-b-c-submitters"]);
        assert_eq!(User::default().profile(), &json!({}));
    }
}
