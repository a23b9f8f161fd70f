//! Editable settings draft
//!
//! The panel edits a local copy of the settings document. Permission rules
//! and environment variables are held as rows with stable ids so they can
//! be edited individually; everything else stays in the original document
//! and is written back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::SettingsBlob;

/// Row identifier
pub type RowId = Uuid;

/// Which permission list a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Allow,
    Deny,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    pub id: RowId,
    pub value: String,
}

impl PermissionRule {
    fn new(value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub id: RowId,
    pub key: String,
    pub value: String,
}

/// Editable half of an environment variable row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvField {
    Key,
    Value,
}

const PERMISSIONS: &str = "permissions";
const ENV: &str = "env";
const INCLUDE_CO_AUTHORED_BY: &str = "includeCoAuthoredBy";
const VERBOSE: &str = "verbose";
const CLEANUP_PERIOD_DAYS: &str = "cleanupPeriodDays";
const API_KEY_HELPER: &str = "apiKeyHelper";

/// Local, editable copy of the settings document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDraft {
    base: SettingsBlob,
    allow: Vec<PermissionRule>,
    deny: Vec<PermissionRule>,
    env: Vec<EnvVar>,
}

impl SettingsDraft {
    /// Split a settings document into editable rows
    pub fn from_blob(base: SettingsBlob) -> Self {
        let rules = |kind: RuleKind| -> Vec<PermissionRule> {
            base.get(PERMISSIONS)
                .and_then(|p| p.get(kind.as_str()))
                .and_then(Value::as_array)
                .map(|rules| {
                    rules
                        .iter()
                        .filter_map(Value::as_str)
                        .map(PermissionRule::new)
                        .collect()
                })
                .unwrap_or_default()
        };

        let env = base
            .get(ENV)
            .and_then(Value::as_object)
            .map(|vars| {
                vars.iter()
                    .map(|(key, value)| EnvVar {
                        id: Uuid::new_v4(),
                        key: key.clone(),
                        value: match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        },
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            allow: rules(RuleKind::Allow),
            deny: rules(RuleKind::Deny),
            env,
            base,
        }
    }

    pub fn rules(&self, kind: RuleKind) -> &[PermissionRule] {
        match kind {
            RuleKind::Allow => &self.allow,
            RuleKind::Deny => &self.deny,
        }
    }

    /// Append an empty rule, returning its id
    pub fn add_rule(&mut self, kind: RuleKind) -> RowId {
        let rule = PermissionRule::new("");
        let id = rule.id;
        self.rules_mut(kind).push(rule);
        id
    }

    /// Returns false if no rule has this id
    pub fn update_rule(&mut self, kind: RuleKind, id: RowId, value: impl Into<String>) -> bool {
        match self.rules_mut(kind).iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_rule(&mut self, kind: RuleKind, id: RowId) -> bool {
        let rules = self.rules_mut(kind);
        let before = rules.len();
        rules.retain(|r| r.id != id);
        rules.len() != before
    }

    pub fn env_vars(&self) -> &[EnvVar] {
        &self.env
    }

    /// Append an empty variable, returning its id
    pub fn add_env_var(&mut self) -> RowId {
        let id = Uuid::new_v4();
        self.env.push(EnvVar {
            id,
            key: String::new(),
            value: String::new(),
        });
        id
    }

    pub fn update_env_var(&mut self, id: RowId, field: EnvField, text: impl Into<String>) -> bool {
        let Some(var) = self.env.iter_mut().find(|v| v.id == id) else {
            return false;
        };
        match field {
            EnvField::Key => var.key = text.into(),
            EnvField::Value => var.value = text.into(),
        }
        true
    }

    pub fn remove_env_var(&mut self, id: RowId) -> bool {
        let before = self.env.len();
        self.env.retain(|v| v.id != id);
        self.env.len() != before
    }

    /// Raw value of a top-level setting
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.base.get(key)
    }

    /// Set a top-level setting; `None` removes it
    pub fn set_value(&mut self, key: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.base.insert(key.to_string(), value);
            }
            None => {
                self.base.remove(key);
            }
        }
    }

    /// On unless explicitly disabled
    pub fn include_co_authored_by(&self) -> bool {
        self.base.get(INCLUDE_CO_AUTHORED_BY) != Some(&Value::Bool(false))
    }

    pub fn set_include_co_authored_by(&mut self, enabled: bool) {
        self.set_value(INCLUDE_CO_AUTHORED_BY, Some(Value::Bool(enabled)));
    }

    /// Off unless explicitly enabled
    pub fn verbose(&self) -> bool {
        self.base.get(VERBOSE) == Some(&Value::Bool(true))
    }

    pub fn set_verbose(&mut self, enabled: bool) {
        self.set_value(VERBOSE, Some(Value::Bool(enabled)));
    }

    pub fn cleanup_period_days(&self) -> Option<u64> {
        self.base.get(CLEANUP_PERIOD_DAYS).and_then(Value::as_u64)
    }

    pub fn set_cleanup_period_days(&mut self, days: Option<u64>) {
        self.set_value(CLEANUP_PERIOD_DAYS, days.map(Value::from));
    }

    pub fn api_key_helper(&self) -> Option<&str> {
        self.base.get(API_KEY_HELPER).and_then(Value::as_str)
    }

    /// An empty script path removes the setting
    pub fn set_api_key_helper(&mut self, script: &str) {
        let value = (!script.is_empty()).then(|| Value::String(script.to_string()));
        self.set_value(API_KEY_HELPER, value);
    }

    /// Assemble the document to save
    ///
    /// Blank rules and env rows with a blank key or value are left out.
    /// Kept entries are written exactly as typed.
    pub fn to_blob(&self) -> SettingsBlob {
        let non_blank = |rules: &[PermissionRule]| -> Vec<String> {
            rules
                .iter()
                .filter(|r| !r.value.trim().is_empty())
                .map(|r| r.value.clone())
                .collect()
        };

        let env: SettingsBlob = self
            .env
            .iter()
            .filter(|v| !v.key.trim().is_empty() && !v.value.trim().is_empty())
            .map(|v| (v.key.clone(), Value::String(v.value.clone())))
            .collect();

        let mut blob = self.base.clone();
        blob.insert(
            PERMISSIONS.to_string(),
            json!({
                "allow": non_blank(&self.allow),
                "deny": non_blank(&self.deny),
            }),
        );
        blob.insert(ENV.to_string(), Value::Object(env));
        blob
    }

    /// Pretty JSON of the document that would be saved
    pub fn raw_json(&self) -> String {
        serde_json::to_string_pretty(&Value::Object(self.to_blob())).unwrap_or_default()
    }

    /// Adopt a saved document without regenerating row ids
    pub(crate) fn commit(&mut self, saved: SettingsBlob) {
        self.base = saved;
    }

    fn rules_mut(&mut self, kind: RuleKind) -> &mut Vec<PermissionRule> {
        match kind {
            RuleKind::Allow => &mut self.allow,
            RuleKind::Deny => &mut self.deny,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(value: Value) -> SettingsBlob {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn sample() -> SettingsDraft {
        SettingsDraft::from_blob(blob(json!({
            "permissions": {
                "allow": ["Bash(npm run test:*)", "Read(~/.zshrc)"],
                "deny": ["Bash(curl:*)"]
            },
            "env": { "CLAUDE_CODE_ENABLE_TELEMETRY": "0", "RETRIES": 3 },
            "model": "opus",
            "cleanupPeriodDays": 20
        })))
    }

    #[test]
    fn test_parses_rows() {
        let draft = sample();

        let allow: Vec<&str> = draft.rules(RuleKind::Allow).iter().map(|r| r.value.as_str()).collect();
        assert_eq!(allow, vec!["Bash(npm run test:*)", "Read(~/.zshrc)"]);
        assert_eq!(draft.rules(RuleKind::Deny).len(), 1);

        let env: Vec<(&str, &str)> = draft
            .env_vars()
            .iter()
            .map(|v| (v.key.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(env, vec![("CLAUDE_CODE_ENABLE_TELEMETRY", "0"), ("RETRIES", "3")]);
    }

    #[test]
    fn test_row_ids_unique() {
        let mut draft = sample();
        let added = draft.add_rule(RuleKind::Allow);

        let mut ids: Vec<RowId> = draft.rules(RuleKind::Allow).iter().map(|r| r.id).collect();
        ids.extend(draft.rules(RuleKind::Deny).iter().map(|r| r.id));
        ids.extend(draft.env_vars().iter().map(|v| v.id));
        let count = ids.len();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), count);
        assert!(ids.contains(&added));
    }

    #[test]
    fn test_malformed_sections_ignored() {
        let draft = SettingsDraft::from_blob(blob(json!({
            "permissions": { "allow": "Bash", "deny": [1, "Write"] },
            "env": ["A=B"]
        })));

        assert!(draft.rules(RuleKind::Allow).is_empty());
        assert_eq!(draft.rules(RuleKind::Deny)[0].value, "Write");
        assert!(draft.env_vars().is_empty());
    }

    #[test]
    fn test_rule_editing() {
        let mut draft = SettingsDraft::default();
        let id = draft.add_rule(RuleKind::Deny);

        assert!(draft.update_rule(RuleKind::Deny, id, "WebFetch"));
        assert!(!draft.update_rule(RuleKind::Allow, id, "WebFetch"));
        assert_eq!(draft.rules(RuleKind::Deny)[0].value, "WebFetch");

        assert!(draft.remove_rule(RuleKind::Deny, id));
        assert!(!draft.remove_rule(RuleKind::Deny, id));
        assert!(draft.rules(RuleKind::Deny).is_empty());
    }

    #[test]
    fn test_env_editing() {
        let mut draft = SettingsDraft::default();
        let id = draft.add_env_var();

        assert!(draft.update_env_var(id, EnvField::Key, "HTTPS_PROXY"));
        assert!(draft.update_env_var(id, EnvField::Value, "http://proxy:8080"));
        assert_eq!(draft.env_vars()[0].key, "HTTPS_PROXY");
        assert_eq!(draft.env_vars()[0].value, "http://proxy:8080");

        assert!(draft.remove_env_var(id));
        assert!(!draft.update_env_var(id, EnvField::Key, "X"));
    }

    #[test]
    fn test_to_blob_filters_blank_rows() {
        let mut draft = sample();
        let blank = draft.add_rule(RuleKind::Allow);
        draft.update_rule(RuleKind::Allow, blank, "   ");

        let half = draft.add_env_var();
        draft.update_env_var(half, EnvField::Key, "ONLY_KEY");
        let padded = draft.add_env_var();
        draft.update_env_var(padded, EnvField::Key, "PADDED");
        draft.update_env_var(padded, EnvField::Value, " spaced ");

        let saved = draft.to_blob();
        assert_eq!(
            saved["permissions"],
            json!({
                "allow": ["Bash(npm run test:*)", "Read(~/.zshrc)"],
                "deny": ["Bash(curl:*)"]
            })
        );
        assert_eq!(saved["env"]["PADDED"], " spaced ");
        assert!(saved["env"].get("ONLY_KEY").is_none());
        assert_eq!(saved["env"]["RETRIES"], "3");
    }

    #[test]
    fn test_to_blob_preserves_unknown_keys() {
        let saved = sample().to_blob();
        assert_eq!(saved["model"], "opus");
        assert_eq!(saved["cleanupPeriodDays"], 20);
    }

    #[test]
    fn test_empty_document_gains_sections() {
        let saved = SettingsDraft::default().to_blob();
        assert_eq!(saved["permissions"], json!({ "allow": [], "deny": [] }));
        assert_eq!(saved["env"], json!({}));
    }

    #[test]
    fn test_general_defaults() {
        let draft = SettingsDraft::default();
        assert!(draft.include_co_authored_by());
        assert!(!draft.verbose());
        assert_eq!(draft.cleanup_period_days(), None);
        assert_eq!(draft.api_key_helper(), None);
    }

    #[test]
    fn test_general_fields() {
        let mut draft = sample();
        draft.set_include_co_authored_by(false);
        draft.set_verbose(true);
        draft.set_cleanup_period_days(None);
        draft.set_api_key_helper("/bin/generate_temp_api_key.sh");

        let saved = draft.to_blob();
        assert_eq!(saved["includeCoAuthoredBy"], false);
        assert_eq!(saved["verbose"], true);
        assert!(saved.get("cleanupPeriodDays").is_none());
        assert_eq!(saved["apiKeyHelper"], "/bin/generate_temp_api_key.sh");

        draft.set_api_key_helper("");
        assert!(draft.to_blob().get("apiKeyHelper").is_none());
    }

    #[test]
    fn test_raw_json_matches_blob() {
        let draft = sample();
        let parsed: Value = serde_json::from_str(&draft.raw_json()).unwrap();
        assert_eq!(parsed, Value::Object(draft.to_blob()));
    }
}
