//! Action catalog definitions
//!
//! An action is identified by a unique `pattern` key and carries an effect
//! specification applied when its owning rule matches. Actions are created
//! through the administrative surface and read-only to the evaluator.

use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Arithmetic operator for computed effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// One operand of a computed effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Field path into the record
    Field { field: String },
    /// Numeric literal
    Literal { value: f64 },
}

/// Effect specification attached to an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EffectSpec {
    /// A fixed value
    Literal { value: Value },

    /// A string template with `{field.path}` placeholders substituted
    /// from the record
    Template { template: String },

    /// A small arithmetic expression over record fields and literals
    Computed {
        left: Operand,
        op: ArithOp,
        right: Operand,
    },
}

/// Action definition: a unique pattern key plus its effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    /// Unique pattern key identifying this action
    pub pattern: String,

    /// Effect applied when the owning rule matches
    pub effect: EffectSpec,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActionDef {
    /// Create an action with a literal effect
    pub fn literal(pattern: impl Into<String>, value: Value) -> Self {
        Self {
            pattern: pattern.into(),
            effect: EffectSpec::Literal { value },
            description: None,
        }
    }

    /// Create an action with a template effect
    pub fn template(pattern: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            effect: EffectSpec::Template {
                template: template.into(),
            },
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the action definition
    pub fn validate(&self) -> Result<()> {
        if self.pattern.trim().is_empty() {
            return Err(CoreError::Validation(
                "action pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_action() {
        let action = ActionDef::literal("notify_ops", Value::String("page".to_string()));
        assert_eq!(action.pattern, "notify_ops");
        assert!(action.validate().is_ok());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let action = ActionDef::literal("", Value::Null);
        assert!(action.validate().is_err());
    }

    #[test]
    fn test_effect_spec_serde_literal() {
        let json = r#"{"type": "literal", "value": 42}"#;
        let effect: EffectSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            effect,
            EffectSpec::Literal {
                value: Value::Number(42.0)
            }
        );
    }

    #[test]
    fn test_effect_spec_serde_template() {
        let json = r#"{"type": "template", "template": "Hello {user.name}"}"#;
        let effect: EffectSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            effect,
            EffectSpec::Template {
                template: "Hello {user.name}".to_string()
            }
        );
    }

    #[test]
    fn test_effect_spec_serde_computed() {
        let json = r#"{
            "type": "computed",
            "left": {"field": "order.total"},
            "op": "mul",
            "right": {"value": 0.1}
        }"#;
        let effect: EffectSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            effect,
            EffectSpec::Computed {
                left: Operand::Field {
                    field: "order.total".to_string()
                },
                op: ArithOp::Mul,
                right: Operand::Literal { value: 0.1 },
            }
        );
    }

    #[test]
    fn test_action_def_round_trip() {
        let action = ActionDef::template("greet", "Hi {user.name}")
            .with_description("Greets the user by name");
        let json = serde_json::to_string(&action).unwrap();
        let back: ActionDef = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
